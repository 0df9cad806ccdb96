//! Order Routing End-to-End Tests
//!
//! Full-stack tests: requests enter through the Axum router and leave
//! through the reqwest adapter to a local mock of the Alpaca REST API.
//! Covered flows:
//! - Messy client payloads arriving upstream in canonical wire shape
//! - Upstream rejections passing through with status and body intact
//! - Option position fallback and degraded listing behavior
//! - Validation failures stopping before any upstream call
//! - Snapshot caching collapsing repeated reads

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use broker_gateway::infrastructure::broker::alpaca::{
    AlpacaConfig, AlpacaEnvironment, AlpacaGateway,
};
use broker_gateway::infrastructure::http::{AppState, create_router};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build the full application wired to the mock brokerage.
fn test_app(server: &MockServer) -> Router {
    let config = AlpacaConfig::new(
        "test-key".to_string(),
        "test-secret".to_string(),
        AlpacaEnvironment::Paper,
    )
    .with_base_url(&server.uri());
    let gateway = Arc::new(AlpacaGateway::new(&config).expect("should create gateway"));

    create_router(AppState::new(gateway))
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

// ============================================
// Health
// ============================================

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let (status, body) = send(app, get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
}

// ============================================
// Order Submission
// ============================================

#[tokio::test]
async fn messy_submissions_reach_the_broker_in_canonical_shape() {
    let server = MockServer::start().await;
    let expected_wire = json!({
        "quantity": 2,
        "legs": [
            {
                "symbol": "AAPL240621C00190000",
                "qty": 1,
                "side": "buy",
                "type": "market",
                "position_intent": "buy_to_open"
            },
            {
                "symbol": "AAPL240621C00200000",
                "qty": 1,
                "side": "sell",
                "type": "market",
                "position_intent": "sell_to_open"
            }
        ],
        "order_class": "mleg",
        "order_type": "limit",
        "limit_price": 0.85,
        "time_in_force": "gtc",
        "extended_hours": false
    });
    Mock::given(method("POST"))
        .and(path("/v2/options/orders"))
        .and(body_json(expected_wire))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ord-1",
            "status": "accepted",
            "order_class": "mleg"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_app(&server);

    // Mixed-case symbols, string numbers, camelCase field names, and a
    // negative net price all arrive canonical upstream.
    let messy = json!({
        "legs": [
            {"symbol": "o:aapl240621c00190000", "qty": "1", "side": "buy"},
            {"symbol": "AAPL240621C00200000", "quantity": 1, "side": "sell"}
        ],
        "quantity": 2,
        "orderClass": "multi-leg",
        "limitPrice": "-0.85",
        "timeInForce": "gtc"
    });
    let (status, body) = send(app, post_json("/api/broker/alpaca/options/orders", &messy)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "ord-1");
    assert_eq!(body["status"], "accepted");
}

#[tokio::test]
async fn upstream_rejections_pass_through_with_status_and_body() {
    let server = MockServer::start().await;
    let rejection = json!({"code": 42210000, "message": "cost basis must be >= 0.01"});
    Mock::given(method("POST"))
        .and(path("/v2/options/orders"))
        .respond_with(ResponseTemplate::new(422).set_body_json(rejection.clone()))
        .mount(&server)
        .await;
    let app = test_app(&server);

    let order = json!({
        "legs": [{"symbol": "AAPL240621C00190000", "qty": 1, "side": "buy"}]
    });
    let (status, body) = send(app, post_json("/api/broker/alpaca/options/orders", &order)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, rejection);
}

#[tokio::test]
async fn empty_leg_submissions_never_reach_the_broker() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/options/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "never"})))
        .expect(0)
        .mount(&server)
        .await;
    let app = test_app(&server);

    let (status, body) = send(
        app,
        post_json("/api/broker/alpaca/options/orders", &json!({"legs": []})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "At least one leg is required"}));
}

// ============================================
// Option Positions
// ============================================

#[tokio::test]
async fn option_positions_fall_back_to_the_filtered_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/options/positions"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "endpoint not found"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/positions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"symbol": "AAPL", "qty": "10"},
            {"symbol": "O:SPY240920P00450000", "qty": "-1"},
            {"symbol": "TSLA240816C00250000", "qty": "2"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_app(&server);

    let (status, body) = send(app, get_request("/api/broker/alpaca/options/positions")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"positions": [
            {"symbol": "SPY240920P00450000", "qty": "-1"},
            {"symbol": "TSLA240816C00250000", "qty": "2"}
        ]})
    );
}

#[tokio::test]
async fn degraded_listings_yield_an_empty_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/options/positions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/positions"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "internal error"})),
        )
        .mount(&server)
        .await;
    let app = test_app(&server);

    let (status, body) = send(app, get_request("/api/broker/alpaca/options/positions")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"positions": []}));
}

#[tokio::test]
async fn primary_option_listing_failures_propagate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/options/positions"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"message": "try again later"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/positions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let app = test_app(&server);

    let (status, body) = send(app, get_request("/api/broker/alpaca/options/positions")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"message": "try again later"}));
}

// ============================================
// Snapshot Caching
// ============================================

#[tokio::test]
async fn account_snapshots_are_cached_across_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "acct-1",
            "buying_power": "20000"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_app(&server);

    let (status, first) = send(app.clone(), get_request("/api/broker/alpaca/account")).await;
    let (_, second) = send(app, get_request("/api/broker/alpaca/account")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(first["id"], "acct-1");
}

#[tokio::test]
async fn clock_reads_are_never_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/clock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_open": true})))
        .expect(2)
        .mount(&server)
        .await;
    let app = test_app(&server);

    send(app.clone(), get_request("/api/broker/alpaca/clock")).await;
    let (status, body) = send(app, get_request("/api/broker/alpaca/clock")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"is_open": true}));
}

//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API over the brokerage gateway. Routes delegate to the
//! application services and forward upstream JSON verbatim.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{MatchedPath, Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::application::cache::TtlCache;
use crate::application::ports::{BrokerGateway, OrderListQuery};
use crate::application::services::OptionPositionsService;
use crate::domain::{RawOrderRequest, normalize_order};
use crate::observability::metrics;

use super::response::ApiError;

/// Application state shared across handlers.
pub struct AppState<G>
where
    G: BrokerGateway,
{
    /// Gateway to the upstream brokerage.
    pub gateway: Arc<G>,
    /// Cached account snapshot.
    pub account_cache: Arc<TtlCache<Value>>,
    /// Cached, fallback-protected option position reads.
    pub positions: Arc<OptionPositionsService<G>>,
}

impl<G> AppState<G>
where
    G: BrokerGateway,
{
    /// Assemble state around a gateway instance.
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            account_cache: Arc::new(TtlCache::with_default_ttl("account")),
            positions: Arc::new(OptionPositionsService::new(Arc::clone(&gateway))),
            gateway,
        }
    }
}

impl<G> Clone for AppState<G>
where
    G: BrokerGateway,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            account_cache: Arc::clone(&self.account_cache),
            positions: Arc::clone(&self.positions),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<G>(state: AppState<G>) -> Router
where
    G: BrokerGateway + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/broker/alpaca/account", get(get_account))
        .route("/api/broker/alpaca/clock", get(get_clock))
        .route(
            "/api/broker/alpaca/options/positions",
            get(get_option_positions),
        )
        .route(
            "/api/broker/alpaca/options/orders",
            get(list_option_orders).post(submit_options_order),
        )
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Liveness probe.
async fn health_check() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// Account snapshot, cached for the snapshot TTL.
async fn get_account<G>(State(state): State<AppState<G>>) -> Result<Json<Value>, ApiError>
where
    G: BrokerGateway,
{
    if let Some(account) = state.account_cache.get() {
        return Ok(Json(account));
    }
    let account = state.gateway.account().await?;
    state.account_cache.store(account.clone());
    Ok(Json(account))
}

/// Market clock, uncached passthrough.
async fn get_clock<G>(State(state): State<AppState<G>>) -> Result<Json<Value>, ApiError>
where
    G: BrokerGateway,
{
    Ok(Json(state.gateway.clock().await?))
}

/// Option positions behind the cached fallback chain.
async fn get_option_positions<G>(State(state): State<AppState<G>>) -> Result<Json<Value>, ApiError>
where
    G: BrokerGateway,
{
    let positions = state.positions.get().await?;
    Ok(Json(json!({ "positions": positions })))
}

/// Option order listing, uncached.
async fn list_option_orders<G>(
    State(state): State<AppState<G>>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Value>, ApiError>
where
    G: BrokerGateway,
{
    let orders = state.gateway.option_orders(&query).await?;
    Ok(Json(json!({ "orders": orders })))
}

/// Normalize and route an options order, returning the upstream response
/// verbatim.
async fn submit_options_order<G>(
    State(state): State<AppState<G>>,
    payload: Result<Json<RawOrderRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError>
where
    G: BrokerGateway,
{
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let order = match normalize_order(&request) {
        Ok(order) => order,
        Err(err) => {
            metrics::record_order_submission("unknown", "rejected");
            return Err(err.into());
        }
    };

    match state.gateway.submit_options_order(&order).await {
        Ok(response) => {
            metrics::record_order_submission(order.order_class.as_str(), "submitted");
            Ok(Json(response))
        }
        Err(err) => {
            metrics::record_order_submission(order.order_class.as_str(), "failed");
            Err(err.into())
        }
    }
}

/// Log every handled request under a generated id and record its metrics.
async fn log_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.extensions().get::<MatchedPath>().map_or_else(
        || request.uri().path().to_string(),
        |matched| matched.as_str().to_string(),
    );

    let start = Instant::now();
    let response = next.run(request).await;
    let latency = start.elapsed();
    let status = response.status().as_u16();

    metrics::record_http_request(method.as_str(), &path, status, latency.as_secs_f64());
    tracing::info!(
        %request_id,
        %method,
        path = %path,
        status,
        latency_ms = latency.as_millis(),
        "request handled"
    );

    response
}

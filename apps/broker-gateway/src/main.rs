//! Broker Gateway Binary
//!
//! Starts the brokerage REST facade.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin broker-gateway
//! ```
//!
//! # Environment Variables
//!
//! ## Credentials (first match wins)
//! - `ALPACA_API_KEY` | `ALPACA_KEY_ID` | `APCA_API_KEY_ID`: Broker API key
//! - `ALPACA_API_SECRET` | `ALPACA_SECRET_KEY` | `APCA_API_SECRET_KEY`: Broker API secret
//!
//! ## Optional
//! - `ALPACA_PAPER`: `false` for live trading (default: true)
//! - `ALPACA_API_BASE` | `ALPACA_BASE_URL` | `APCA_API_BASE_URL`: Base URL override
//! - `PORT`: HTTP server port (default: 4000)
//! - `METRICS_ADDR`: Prometheus exporter address, e.g. `0.0.0.0:9090` (default: disabled)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use broker_gateway::infrastructure::broker::alpaca::{AlpacaConfig, AlpacaGateway};
use broker_gateway::infrastructure::http::{AppState, create_router};
use broker_gateway::observability::{MetricsConfig, init_metrics};
use tokio::net::TcpListener;
use tokio::signal;

/// Default HTTP server port.
const DEFAULT_PORT: u16 = 4000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    tracing::info!("Starting broker gateway");

    let config = AlpacaConfig::from_env();
    if !config.has_credentials() {
        tracing::warn!(
            "Alpaca credentials are not configured; upstream requests will fail until they are"
        );
    }
    tracing::info!(
        environment = %config.environment,
        base_url = %config.base_url,
        "Configuration loaded"
    );

    init_metrics_from_env();

    let gateway = Arc::new(AlpacaGateway::new(&config).context("failed to build Alpaca gateway")?);
    let app = create_router(AppState::new(gateway));

    let addr = SocketAddr::from(([0, 0, 0, 0], server_port()));
    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /api/broker/alpaca/account");
    tracing::info!("  GET  /api/broker/alpaca/clock");
    tracing::info!("  GET  /api/broker/alpaca/options/positions");
    tracing::info!("  GET  /api/broker/alpaca/options/orders");
    tracing::info!("  POST /api/broker/alpaca/options/orders");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated abnormally")?;

    tracing::info!("Broker gateway stopped");
    Ok(())
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses static directive strings that are compile-time constants guaranteed to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(
                    "broker_gateway=info"
                        .parse()
                        .expect("static directive 'broker_gateway=info' is valid"),
                )
                .add_directive(
                    "tower_http=info"
                        .parse()
                        .expect("static directive 'tower_http=info' is valid"),
                ),
        )
        .init();
}

/// Start the Prometheus exporter when `METRICS_ADDR` is set.
///
/// A bad address or a failed install logs a warning and the gateway runs
/// without an exporter; recording calls stay no-ops.
fn init_metrics_from_env() {
    let Ok(raw) = std::env::var("METRICS_ADDR") else {
        return;
    };

    match raw.parse::<SocketAddr>() {
        Ok(addr) => {
            let config = MetricsConfig::with_addr(addr);
            if let Err(e) = init_metrics(&config) {
                tracing::warn!(error = %e, "Failed to start metrics exporter, continuing without it");
            } else {
                tracing::info!(%addr, "Prometheus metrics exporter listening");
            }
        }
        Err(e) => {
            tracing::warn!(value = %raw, error = %e, "METRICS_ADDR is not a valid socket address, metrics disabled");
        }
    }
}

/// Resolve the HTTP port from `PORT`.
fn server_port() -> u16 {
    std::env::var("PORT")
        .unwrap_or_else(|_| DEFAULT_PORT.to_string())
        .parse()
        .unwrap_or(DEFAULT_PORT)
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed. Failure to install handlers
/// means the process cannot respond to termination signals, so failing fast
/// during startup beats an unresponsive process.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}

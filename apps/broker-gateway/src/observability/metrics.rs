//! Prometheus metrics for the broker gateway.
//!
//! Covers the HTTP surface, the snapshot caches, and the option position
//! fallback chain. Recording is a no-op until [`init_metrics`] installs
//! the exporter, so library code can call these helpers unconditionally.
//!
//! # Example
//!
//! ```ignore
//! use broker_gateway::observability::{MetricsConfig, init_metrics};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("Failed to initialize metrics");
//!
//! // Record a routed request
//! record_http_request("GET", "/api/broker/alpaca/clock", 200, 0.042);
//! ```

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for request latency measurements (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:9090".parse().expect("valid default address"),
            // Latency buckets from 1ms to 10s; upstream calls dominate.
            latency_buckets: vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// HTTP Surface Metrics
// ============================================================================

/// Record a handled HTTP request.
///
/// # Arguments
///
/// * `method` - Request method (e.g., "GET", "POST")
/// * `path` - Matched route path, not the raw URI
/// * `status` - Response status code
/// * `duration_seconds` - Time from receipt to response in seconds
pub fn record_http_request(method: &str, path: &str, status: u16, duration_seconds: f64) {
    counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_seconds);
}

// ============================================================================
// Snapshot Cache Metrics
// ============================================================================

/// Record a cache read served from a fresh entry.
///
/// # Arguments
///
/// * `cache` - Cache name (e.g., "account", `"option_positions"`)
pub fn record_cache_hit(cache: &str) {
    counter!(
        "snapshot_cache_hits_total",
        "cache" => cache.to_string()
    )
    .increment(1);
}

/// Record a cache read that found no fresh entry.
///
/// # Arguments
///
/// * `cache` - Cache name
pub fn record_cache_miss(cache: &str) {
    counter!(
        "snapshot_cache_misses_total",
        "cache" => cache.to_string()
    )
    .increment(1);
}

// ============================================================================
// Option Position Metrics
// ============================================================================

/// Record a fall back from the option positions endpoint to the full
/// position listing.
pub fn record_positions_fallback() {
    counter!("option_positions_fallback_total").increment(1);
}

/// Record a fallback failure that degraded the read to an empty snapshot.
pub fn record_positions_degraded() {
    counter!("option_positions_degraded_total").increment(1);
}

// ============================================================================
// Order Routing Metrics
// ============================================================================

/// Record an options order routed through the gateway.
///
/// # Arguments
///
/// * `order_class` - Normalized class (e.g., "simple", "mleg")
/// * `outcome` - Routing outcome (e.g., "submitted", "rejected", "failed")
pub fn record_order_submission(order_class: &str, outcome: &str) {
    counter!(
        "order_submissions_total",
        "order_class" => order_class.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

// ============================================================================
// Tests
// ============================================================================

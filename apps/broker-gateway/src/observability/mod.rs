//! Observability module for metrics and logging.
//!
//! Provides Prometheus metrics export for the gateway's HTTP surface,
//! snapshot caches, and order routing.

pub mod metrics;

pub use metrics::{MetricsConfig, MetricsError, init_metrics};

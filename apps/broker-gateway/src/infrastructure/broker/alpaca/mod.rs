//! Alpaca Markets Gateway Adapter
//!
//! Implementation of `BrokerGateway` for the Alpaca trading API with:
//! - Environment-aware base URLs (PAPER vs LIVE) with normalized overrides
//! - Credential discovery across the accumulated variable spellings
//! - Verbatim passthrough of upstream JSON, including error bodies
//! - Multi-leg options support

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;

pub use adapter::AlpacaGateway;
pub use config::{AlpacaConfig, AlpacaEnvironment, normalize_base_url};
pub use error::AlpacaError;

//! Broker Gateway Port (Driven Port)
//!
//! Interface to the upstream brokerage. The façade interprets almost nothing
//! it reads: snapshots flow back to clients verbatim, so `serde_json::Value`
//! is the honest type for most operations. Positions are the exception:
//! their symbols are inspected for filtering and canonicalization, the rest
//! passes through untouched.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::NormalizedOrder;

/// A broker-reported position.
///
/// Only the symbol is interpreted; every other field the broker sent is
/// carried opaquely and returned as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Contract or equity symbol.
    pub symbol: String,
    /// Everything else the broker reported.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

impl Position {
    /// Position with only a symbol set.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            rest: serde_json::Map::new(),
        }
    }
}

/// Query parameters for listing option orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderListQuery {
    /// Upstream status filter (for example `open` or `closed`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Maximum number of orders to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Gateway failure, carrying the upstream HTTP status where one exists.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The brokerage answered with an error status.
    #[error("Upstream responded {status}: {message}")]
    Upstream {
        /// HTTP status code from the brokerage.
        status: u16,
        /// Human-readable message.
        message: String,
        /// Raw error body, when the brokerage sent one.
        body: Option<Value>,
    },

    /// The request never produced a response.
    #[error("Transport error: {message}")]
    Transport {
        /// Error details.
        message: String,
    },

    /// The response body could not be interpreted.
    #[error("Decode error: {message}")]
    Decode {
        /// Error details.
        message: String,
    },
}

impl GatewayError {
    /// Whether this failure is an upstream 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Upstream { status: 404, .. })
    }

    /// Upstream HTTP status, when one exists.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Port for brokerage interactions.
#[async_trait]
pub trait BrokerGateway: Send + Sync {
    /// Fetch the account snapshot, verbatim.
    async fn account(&self) -> Result<Value, GatewayError>;

    /// Fetch the market clock, verbatim.
    async fn clock(&self) -> Result<Value, GatewayError>;

    /// List every position the broker reports, options and equities alike.
    async fn positions(&self) -> Result<Vec<Position>, GatewayError>;

    /// List positions from the specialized option-positions endpoint.
    async fn option_positions(&self) -> Result<Vec<Position>, GatewayError>;

    /// List option orders. Always yields an array, regardless of how the
    /// upstream wraps it.
    async fn option_orders(&self, query: &OrderListQuery) -> Result<Vec<Value>, GatewayError>;

    /// Submit a normalized options order, returning the upstream response
    /// verbatim.
    async fn submit_options_order(&self, order: &NormalizedOrder)
    -> Result<Value, GatewayError>;
}

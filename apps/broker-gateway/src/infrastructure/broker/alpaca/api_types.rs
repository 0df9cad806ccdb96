//! Alpaca API payload types.
//!
//! Upstream JSON flows back to clients verbatim, so only the payloads the
//! adapter actually inspects get types: error bodies (for the message) and
//! the shapes the order listing endpoint has been seen to produce.

use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// Error Types
// ============================================================================

/// Error response body from the Alpaca API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error code; Alpaca has emitted both numbers and strings here.
    #[serde(default)]
    pub code: Option<Value>,
    /// Error message.
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Order Listing Types
// ============================================================================

/// Payload shapes of the order listing endpoint.
///
/// A plain array is the documented form; some builds wrap it in an object
/// under an `orders` key. Both flatten to a `Vec<Value>`, and anything else
/// flattens to no orders.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrdersPayload {
    /// Documented form: a plain array.
    List(Vec<Value>),
    /// Object wrapper carrying the list under `orders`.
    Wrapped {
        /// The wrapped order list.
        #[serde(default)]
        orders: Vec<Value>,
    },
    /// Unrecognized payload.
    Other(Value),
}

impl OrdersPayload {
    /// Flatten to the order list.
    #[must_use]
    pub fn into_orders(self) -> Vec<Value> {
        match self {
            Self::List(orders) | Self::Wrapped { orders } => orders,
            Self::Other(_) => Vec::new(),
        }
    }
}

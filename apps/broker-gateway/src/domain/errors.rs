//! Validation errors for the order normalization pipeline.

use thiserror::Error;

/// Client-caused validation failures, raised before any upstream call.
///
/// These errors are independent of infrastructure concerns. The display
/// strings are returned to the caller verbatim, so they name the offending
/// leg by its one-based position in the submitted list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The order carried no legs at all.
    #[error("At least one leg is required")]
    EmptyLegs,

    /// A leg had a missing or blank symbol.
    #[error("Leg {} requires a symbol", .index + 1)]
    MissingSymbol {
        /// Zero-based position of the offending leg.
        index: usize,
    },

    /// A leg quantity failed to coerce to a positive, finite number.
    #[error("Leg {} requires a positive, finite qty", .index + 1)]
    InvalidLegQuantity {
        /// Zero-based position of the offending leg.
        index: usize,
    },

    /// The order-level quantity was not a positive whole number.
    #[error("Order quantity must be a positive whole number")]
    InvalidOrderQuantity,
}

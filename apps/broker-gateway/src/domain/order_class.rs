//! Order class selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an order is single-instrument or combines multiple legs atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderClass {
    /// Single-instrument order.
    Simple,
    /// Multi-leg order executed atomically.
    Mleg,
}

impl OrderClass {
    /// Resolve the order class from an explicit client hint and the leg count.
    ///
    /// An explicit `"multi-leg"` maps to [`Self::Mleg`]; any other explicit
    /// string maps to [`Self::Simple`]. Without a hint, more than one leg
    /// means multi-leg.
    ///
    /// The class only labels the order; the wire shape (nested leg array vs.
    /// flattened single leg) is decided by leg count alone, so an
    /// inconsistent hint never corrupts the payload structure.
    #[must_use]
    pub fn resolve(explicit: Option<&str>, leg_count: usize) -> Self {
        match explicit {
            Some("multi-leg") => Self::Mleg,
            Some(_) => Self::Simple,
            None if leg_count > 1 => Self::Mleg,
            None => Self::Simple,
        }
    }

    /// Canonical wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Mleg => "mleg",
        }
    }
}

impl Default for OrderClass {
    fn default() -> Self {
        Self::Simple
    }
}

impl fmt::Display for OrderClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

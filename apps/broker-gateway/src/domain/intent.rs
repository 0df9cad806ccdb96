//! Position intent resolution.
//!
//! Every normalized leg carries one of four canonical position intents. The
//! client may state one explicitly; otherwise the intent is inferred from the
//! leg side under the assumption that an unannotated leg opens a position.
//! Closing intents must always be stated by the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::leg::OrderSide;

/// Whether a leg opens or closes a position, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionIntent {
    /// Open a long position.
    BuyToOpen,
    /// Close a short position.
    BuyToClose,
    /// Open a short position.
    SellToOpen,
    /// Close a long position.
    SellToClose,
}

impl PositionIntent {
    /// Parse one of the four canonical wire strings.
    ///
    /// Anything else (including case variants) is treated as absent, so the
    /// side-based default applies.
    #[must_use]
    pub fn from_canonical(value: &str) -> Option<Self> {
        match value {
            "buy_to_open" => Some(Self::BuyToOpen),
            "buy_to_close" => Some(Self::BuyToClose),
            "sell_to_open" => Some(Self::SellToOpen),
            "sell_to_close" => Some(Self::SellToClose),
            _ => None,
        }
    }

    /// Resolve the effective intent for a leg.
    ///
    /// A recognized explicit intent always wins, even when it contradicts the
    /// side. A `buy` leg may legitimately be closing a short, and the caller
    /// is the only party that knows. Without one, the leg is assumed to open
    /// a position in the direction of its side.
    #[must_use]
    pub fn resolve(side: OrderSide, explicit: Option<&str>) -> Self {
        if let Some(intent) = explicit.and_then(Self::from_canonical) {
            return intent;
        }
        match side {
            OrderSide::Sell => Self::SellToOpen,
            OrderSide::Buy => Self::BuyToOpen,
        }
    }

    /// Returns true if this intent opens a position.
    #[must_use]
    pub const fn is_opening(&self) -> bool {
        matches!(self, Self::BuyToOpen | Self::SellToOpen)
    }

    /// Canonical wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BuyToOpen => "buy_to_open",
            Self::BuyToClose => "buy_to_close",
            Self::SellToOpen => "sell_to_open",
            Self::SellToClose => "sell_to_close",
        }
    }
}

impl fmt::Display for PositionIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

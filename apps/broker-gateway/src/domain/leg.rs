//! Per-leg validation and normalization.
//!
//! Client payloads are loosely typed: field spellings vary, numbers arrive
//! as strings, and most fields are optional. [`normalize_leg`] maps one raw
//! leg to the strict shape the brokerage API accepts, or fails with a
//! [`ValidationError`] naming the offending leg.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::ValidationError;
use super::fields::{LooseNumber, serialize_number, serialize_opt_number};
use super::intent::PositionIntent;
use super::symbol::to_bare_symbol;

/// Buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy side.
    Buy,
    /// Sell side.
    Sell,
}

impl OrderSide {
    /// Interpret a raw side string: exactly `"sell"` sells, anything else
    /// (including absence) buys.
    #[must_use]
    pub fn from_loose(value: Option<&str>) -> Self {
        match value {
            Some("sell") => Self::Sell,
            _ => Self::Buy,
        }
    }

    /// Canonical wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Market or limit execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Execute at the prevailing market price.
    Market,
    /// Execute at or better than a stated price.
    Limit,
}

impl OrderType {
    /// Parse an explicit `"market"`/`"limit"` hint; other strings are
    /// treated as absent.
    #[must_use]
    pub fn from_explicit(value: &str) -> Option<Self> {
        match value {
            "market" => Some(Self::Market),
            "limit" => Some(Self::Limit),
            _ => None,
        }
    }

    /// Resolve the effective type: a recognized explicit hint wins,
    /// otherwise the presence of a limit price implies `limit`.
    #[must_use]
    pub fn resolve(explicit: Option<&str>, limit_price: Option<f64>) -> Self {
        explicit
            .and_then(Self::from_explicit)
            .unwrap_or(if limit_price.is_some() {
                Self::Limit
            } else {
                Self::Market
            })
    }

    /// Canonical wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One leg as submitted by a client. Every accepted field spelling is
/// declared here; nothing downstream looks at alternate names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOrderLeg {
    /// Contract symbol, prefixed or bare.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Contract quantity.
    #[serde(default, alias = "quantity")]
    pub qty: Option<LooseNumber>,
    /// `"buy"` or `"sell"`.
    #[serde(default)]
    pub side: Option<String>,
    /// Explicit execution type hint.
    #[serde(default, rename = "type")]
    pub order_type: Option<String>,
    /// Per-leg limit price.
    #[serde(default, alias = "limitPrice")]
    pub limit_price: Option<LooseNumber>,
    /// Explicit position intent.
    #[serde(default, alias = "positionIntent")]
    pub position_intent: Option<String>,
}

/// A validated, canonical order leg in the brokerage API's shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLeg {
    /// Bare OCC (or equity) symbol, uppercase.
    pub symbol: String,
    /// Positive, finite quantity.
    #[serde(serialize_with = "serialize_number")]
    pub qty: f64,
    /// Buy or sell.
    pub side: OrderSide,
    /// Market or limit.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Limit price, present only on limit legs, value passed through
    /// unmodified (the order level is where signs are stripped).
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_number"
    )]
    pub limit_price: Option<f64>,
    /// Always present after normalization.
    pub position_intent: PositionIntent,
}

/// Validate and normalize one raw leg.
///
/// `index` is the zero-based position in the submitted leg list, used only
/// for error messages.
pub fn normalize_leg(raw: &RawOrderLeg, index: usize) -> Result<OrderLeg, ValidationError> {
    let symbol = raw.symbol.as_deref().unwrap_or("").trim().to_uppercase();
    let symbol = to_bare_symbol(&symbol).to_string();
    if symbol.is_empty() {
        return Err(ValidationError::MissingSymbol { index });
    }

    let qty = raw.qty.as_ref().map_or(0.0, LooseNumber::as_f64);
    if !qty.is_finite() || qty <= 0.0 {
        return Err(ValidationError::InvalidLegQuantity { index });
    }

    let side = OrderSide::from_loose(raw.side.as_deref());
    let raw_price = raw.limit_price.as_ref().map(LooseNumber::as_f64);
    let order_type = OrderType::resolve(raw.order_type.as_deref(), raw_price);
    let limit_price = match order_type {
        OrderType::Limit => raw_price,
        OrderType::Market => None,
    };
    let position_intent = PositionIntent::resolve(side, raw.position_intent.as_deref());

    Ok(OrderLeg {
        symbol,
        qty,
        side,
        order_type,
        limit_price,
        position_intent,
    })
}

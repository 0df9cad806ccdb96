//! Whole-order validation, shaping, and defaulting.
//!
//! [`normalize_order`] turns a loose client submission into the strict
//! request the brokerage API expects. The upstream API has two distinct
//! request shapes: multi-leg orders nest a leg array, single-leg orders
//! promote the sole leg's identity to the top level. Leg count alone decides
//! the shape; the order class field merely labels the order.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::ValidationError;
use super::fields::{LooseNumber, serialize_number, serialize_opt_number};
use super::intent::PositionIntent;
use super::leg::{OrderLeg, OrderSide, OrderType, RawOrderLeg, normalize_leg};
use super::order_class::OrderClass;

/// How long an order remains working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    /// Valid for the current trading day only.
    Day,
    /// Good until canceled.
    Gtc,
}

impl TimeInForce {
    /// Interpret a raw time-in-force string: exactly `"gtc"` persists,
    /// anything else (including absence) is a day order.
    #[must_use]
    pub fn from_loose(value: Option<&str>) -> Self {
        match value {
            Some("gtc") => Self::Gtc,
            _ => Self::Day,
        }
    }

    /// Canonical wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Gtc => "gtc",
        }
    }
}

impl Default for TimeInForce {
    fn default() -> Self {
        Self::Day
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An options order as submitted by a client. Every accepted field spelling
/// is declared here; nothing downstream looks at alternate names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOrderRequest {
    /// Order legs; at least one is required.
    #[serde(default)]
    pub legs: Vec<RawOrderLeg>,
    /// Order-level quantity (spread units).
    #[serde(default)]
    pub quantity: Option<LooseNumber>,
    /// Explicit order class hint.
    #[serde(default, alias = "orderClass")]
    pub order_class: Option<String>,
    /// Explicit execution type hint.
    #[serde(default, alias = "orderType")]
    pub order_type: Option<String>,
    /// Order-level limit price (net price for spreads).
    #[serde(default, alias = "limitPrice")]
    pub limit_price: Option<LooseNumber>,
    /// Time in force.
    #[serde(default, alias = "timeInForce")]
    pub time_in_force: Option<String>,
    /// Caller-supplied idempotency id, passed through untouched.
    #[serde(default, alias = "clientOrderId")]
    pub client_order_id: Option<String>,
    /// Whether the order may execute in extended hours.
    #[serde(default, alias = "extendedHours")]
    pub extended_hours: Option<bool>,
}

/// The two wire shapes the upstream API accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OrderPlacement {
    /// Flattened single-leg shape. The sole leg's identity is promoted to
    /// the top level instead of a nested leg list.
    Single {
        /// Contract symbol from the sole leg.
        symbol: String,
        /// Contract quantity: the explicit order-level quantity when given,
        /// otherwise the sole leg's.
        #[serde(serialize_with = "serialize_number")]
        qty: f64,
        /// Side from the sole leg.
        side: OrderSide,
        /// Intent from the sole leg.
        position_intent: PositionIntent,
    },
    /// Nested multi-leg shape.
    MultiLeg {
        /// Spread units, default 1.
        quantity: u32,
        /// The normalized legs, in submission order.
        legs: Vec<OrderLeg>,
    },
}

/// A validated, canonical order ready for submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedOrder {
    /// Single-leg or multi-leg wire shape.
    #[serde(flatten)]
    pub placement: OrderPlacement,
    /// Order class label, resolved independently of the shape.
    pub order_class: OrderClass,
    /// Market or limit.
    pub order_type: OrderType,
    /// Net limit price, non-negative, present only on limit orders.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_number"
    )]
    pub limit_price: Option<f64>,
    /// Day or good-til-canceled.
    pub time_in_force: TimeInForce,
    /// Caller-supplied idempotency id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    /// Extended-hours eligibility.
    pub extended_hours: bool,
}

impl NormalizedOrder {
    /// Number of legs in the order.
    #[must_use]
    pub fn leg_count(&self) -> usize {
        match &self.placement {
            OrderPlacement::Single { .. } => 1,
            OrderPlacement::MultiLeg { legs, .. } => legs.len(),
        }
    }

    /// Whether the order uses the nested multi-leg wire shape.
    #[must_use]
    pub const fn is_multi_leg(&self) -> bool {
        matches!(self.placement, OrderPlacement::MultiLeg { .. })
    }
}

/// Validate a loose order submission and assemble the canonical request.
///
/// Fails without side effects: callers must not contact the brokerage until
/// this returns `Ok`.
pub fn normalize_order(raw: &RawOrderRequest) -> Result<NormalizedOrder, ValidationError> {
    if raw.legs.is_empty() {
        return Err(ValidationError::EmptyLegs);
    }
    let legs = raw
        .legs
        .iter()
        .enumerate()
        .map(|(index, leg)| normalize_leg(leg, index))
        .collect::<Result<Vec<_>, _>>()?;

    let order_class = OrderClass::resolve(raw.order_class.as_deref(), legs.len());

    // Only a price that coerces to a finite number counts as supplied here;
    // leg-level type inference keys on presence alone. A single-leg order
    // with a per-leg price keeps its limit semantics after flattening.
    let order_price = raw
        .limit_price
        .as_ref()
        .map(LooseNumber::as_f64)
        .filter(|price| price.is_finite());
    let effective_price = if legs.len() == 1 {
        order_price.or(legs[0].limit_price.filter(|price| price.is_finite()))
    } else {
        order_price
    };
    let order_type = OrderType::resolve(raw.order_type.as_deref(), effective_price);
    let limit_price = match order_type {
        OrderType::Limit => effective_price.map(f64::abs),
        OrderType::Market => None,
    };

    let quantity = order_quantity(raw.quantity.as_ref())?;
    let time_in_force = TimeInForce::from_loose(raw.time_in_force.as_deref());
    let extended_hours = raw.extended_hours.unwrap_or(false);
    let client_order_id = raw.client_order_id.clone();

    let placement = if legs.len() > 1 {
        OrderPlacement::MultiLeg {
            quantity: quantity.unwrap_or(1),
            legs,
        }
    } else {
        let Some(leg) = legs.into_iter().next() else {
            return Err(ValidationError::EmptyLegs);
        };
        OrderPlacement::Single {
            symbol: leg.symbol,
            qty: quantity.map_or(leg.qty, f64::from),
            side: leg.side,
            position_intent: leg.position_intent,
        }
    };

    Ok(NormalizedOrder {
        placement,
        order_class,
        order_type,
        limit_price,
        time_in_force,
        client_order_id,
        extended_hours,
    })
}

/// Validate the optional order-level quantity.
///
/// Unlike the historical passthrough, the order level gets the same rigor as
/// legs: the value must be a finite, positive whole number.
fn order_quantity(raw: Option<&LooseNumber>) -> Result<Option<u32>, ValidationError> {
    let Some(value) = raw else {
        return Ok(None);
    };
    let qty = value.as_f64();
    if !qty.is_finite() || qty <= 0.0 || qty.fract() != 0.0 || qty > f64::from(u32::MAX) {
        return Err(ValidationError::InvalidOrderQuantity);
    }
    Ok(Some(qty as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_leg(symbol: &str, qty: f64, side: &str) -> RawOrderLeg {
        RawOrderLeg {
            symbol: Some(symbol.to_string()),
            qty: Some(LooseNumber::Num(qty)),
            side: Some(side.to_string()),
            ..RawOrderLeg::default()
        }
    }

    fn spread_request() -> RawOrderRequest {
        RawOrderRequest {
            legs: vec![
                raw_leg("AAPL240621C00190000", 1.0, "buy"),
                raw_leg("AAPL240621C00200000", 1.0, "sell"),
            ],
            ..RawOrderRequest::default()
        }
    }

    #[test]
    fn empty_legs_is_rejected_with_stable_message() {
        let raw = RawOrderRequest::default();
        let err = normalize_order(&raw).unwrap_err();
        assert_eq!(err, ValidationError::EmptyLegs);
        assert_eq!(err.to_string(), "At least one leg is required");
    }

    #[test]
    fn sole_leg_is_promoted_to_single_shape() {
        let raw = RawOrderRequest {
            legs: vec![raw_leg("aapl", 2.0, "buy")],
            ..RawOrderRequest::default()
        };
        let order = normalize_order(&raw).unwrap();

        assert_eq!(order.order_class, OrderClass::Simple);
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.time_in_force, TimeInForce::Day);
        assert!(!order.extended_hours);
        assert_eq!(
            order.placement,
            OrderPlacement::Single {
                symbol: "AAPL".to_string(),
                qty: 2.0,
                side: OrderSide::Buy,
                position_intent: PositionIntent::BuyToOpen,
            }
        );

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "symbol": "AAPL",
                "qty": 2,
                "side": "buy",
                "position_intent": "buy_to_open",
                "order_class": "simple",
                "order_type": "market",
                "time_in_force": "day",
                "extended_hours": false
            })
        );
    }

    #[test]
    fn two_legs_keep_multi_leg_shape_even_with_simple_class() {
        let mut raw = spread_request();
        raw.order_class = Some("simple".to_string());
        let order = normalize_order(&raw).unwrap();

        // Shape and class are decided independently: the hint is preserved
        // verbatim while the payload stays a leg array.
        assert_eq!(order.order_class, OrderClass::Simple);
        assert!(order.is_multi_leg());
        assert_eq!(order.leg_count(), 2);

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["order_class"], "simple");
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["legs"].as_array().unwrap().len(), 2);
        assert!(json.get("symbol").is_none());
    }

    #[test]
    fn class_defaults_from_leg_count() {
        let order = normalize_order(&spread_request()).unwrap();
        assert_eq!(order.order_class, OrderClass::Mleg);

        let raw = RawOrderRequest {
            legs: vec![raw_leg("AAPL", 1.0, "buy")],
            ..RawOrderRequest::default()
        };
        assert_eq!(normalize_order(&raw).unwrap().order_class, OrderClass::Simple);
    }

    #[test]
    fn explicit_multi_leg_class_forces_mleg_label() {
        let raw = RawOrderRequest {
            legs: vec![raw_leg("AAPL", 1.0, "buy")],
            order_class: Some("multi-leg".to_string()),
            ..RawOrderRequest::default()
        };
        let order = normalize_order(&raw).unwrap();
        assert_eq!(order.order_class, OrderClass::Mleg);
        // Still flattened: one leg never produces a leg array
        assert!(!order.is_multi_leg());
    }

    #[test]
    fn leg_failures_propagate_with_position() {
        let mut raw = spread_request();
        raw.legs[1].qty = Some(LooseNumber::Num(0.0));
        assert_eq!(
            normalize_order(&raw),
            Err(ValidationError::InvalidLegQuantity { index: 1 })
        );
    }

    #[test]
    fn explicit_quantity_overrides_sole_leg_qty() {
        let raw = RawOrderRequest {
            legs: vec![raw_leg("AAPL", 1.0, "buy")],
            quantity: Some(LooseNumber::Num(5.0)),
            ..RawOrderRequest::default()
        };
        let order = normalize_order(&raw).unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["qty"], 5);
    }

    #[test]
    fn multi_leg_quantity_defaults_to_one() {
        let order = normalize_order(&spread_request()).unwrap();
        assert_eq!(
            serde_json::to_value(&order).unwrap()["quantity"],
            serde_json::json!(1)
        );

        let mut raw = spread_request();
        raw.quantity = Some(LooseNumber::Text("3".to_string()));
        let order = normalize_order(&raw).unwrap();
        assert_eq!(
            serde_json::to_value(&order).unwrap()["quantity"],
            serde_json::json!(3)
        );
    }

    #[test]
    fn fractional_or_unparseable_quantity_is_rejected() {
        let mut raw = spread_request();
        raw.quantity = Some(LooseNumber::Num(2.5));
        assert_eq!(
            normalize_order(&raw),
            Err(ValidationError::InvalidOrderQuantity)
        );

        raw.quantity = Some(LooseNumber::Text("several".to_string()));
        assert_eq!(
            normalize_order(&raw),
            Err(ValidationError::InvalidOrderQuantity)
        );

        raw.quantity = Some(LooseNumber::Num(0.0));
        assert!(normalize_order(&raw).is_err());

        raw.quantity = Some(LooseNumber::Num(-2.0));
        assert!(normalize_order(&raw).is_err());
    }

    #[test]
    fn order_limit_price_is_made_non_negative() {
        let mut raw = spread_request();
        raw.limit_price = Some(LooseNumber::Num(-1.85));
        let order = normalize_order(&raw).unwrap();
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.limit_price, Some(1.85));
    }

    #[test]
    fn unparseable_limit_price_is_treated_as_absent() {
        let mut raw = spread_request();
        raw.limit_price = Some(LooseNumber::Text("n/a".to_string()));
        let order = normalize_order(&raw).unwrap();
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.limit_price, None);

        // Explicit limit type with a bad price: omitted rather than zeroed
        raw.order_type = Some("limit".to_string());
        let order = normalize_order(&raw).unwrap();
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.limit_price, None);
    }

    #[test]
    fn explicit_market_type_drops_the_price() {
        let mut raw = spread_request();
        raw.order_type = Some("market".to_string());
        raw.limit_price = Some(LooseNumber::Num(2.10));
        let order = normalize_order(&raw).unwrap();
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.limit_price, None);
        assert!(serde_json::to_value(&order).unwrap().get("limit_price").is_none());
    }

    #[test]
    fn single_leg_price_survives_flattening() {
        let mut leg = raw_leg("AAPL240621C00190000", 1.0, "buy");
        leg.limit_price = Some(LooseNumber::Num(1.5));
        let raw = RawOrderRequest {
            legs: vec![leg],
            ..RawOrderRequest::default()
        };
        let order = normalize_order(&raw).unwrap();
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.limit_price, Some(1.5));
    }

    #[test]
    fn time_in_force_recognizes_only_gtc() {
        let mut raw = spread_request();
        raw.time_in_force = Some("gtc".to_string());
        assert_eq!(
            normalize_order(&raw).unwrap().time_in_force,
            TimeInForce::Gtc
        );

        raw.time_in_force = Some("GTC".to_string());
        assert_eq!(
            normalize_order(&raw).unwrap().time_in_force,
            TimeInForce::Day
        );

        raw.time_in_force = None;
        assert_eq!(
            normalize_order(&raw).unwrap().time_in_force,
            TimeInForce::Day
        );
    }

    #[test]
    fn passthrough_fields_are_preserved() {
        let mut raw = spread_request();
        raw.client_order_id = Some("desk-42".to_string());
        raw.extended_hours = Some(true);
        let order = normalize_order(&raw).unwrap();
        assert_eq!(order.client_order_id.as_deref(), Some("desk-42"));
        assert!(order.extended_hours);
    }

    #[test]
    fn accepts_camel_case_aliases() {
        let raw: RawOrderRequest = serde_json::from_value(serde_json::json!({
            "legs": [{"symbol": "AAPL", "qty": 1, "side": "buy", "limitPrice": "1.20", "positionIntent": "buy_to_close"}],
            "orderClass": "multi-leg",
            "orderType": "limit",
            "limitPrice": 1.20,
            "timeInForce": "gtc",
            "clientOrderId": "ui-7",
            "extendedHours": true
        }))
        .unwrap();
        let order = normalize_order(&raw).unwrap();

        assert_eq!(order.order_class, OrderClass::Mleg);
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.limit_price, Some(1.20));
        assert_eq!(order.time_in_force, TimeInForce::Gtc);
        assert_eq!(order.client_order_id.as_deref(), Some("ui-7"));
        assert!(order.extended_hours);
        assert_eq!(
            order.placement,
            OrderPlacement::Single {
                symbol: "AAPL".to_string(),
                qty: 1.0,
                side: OrderSide::Buy,
                position_intent: PositionIntent::BuyToClose,
            }
        );
    }

    #[test]
    fn multi_leg_wire_shape_nests_normalized_legs() {
        let mut raw = spread_request();
        raw.limit_price = Some(LooseNumber::Num(0.85));
        raw.quantity = Some(LooseNumber::Num(2.0));
        let order = normalize_order(&raw).unwrap();

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "quantity": 2,
                "legs": [
                    {
                        "symbol": "AAPL240621C00190000",
                        "qty": 1,
                        "side": "buy",
                        "type": "market",
                        "position_intent": "buy_to_open"
                    },
                    {
                        "symbol": "AAPL240621C00200000",
                        "qty": 1,
                        "side": "sell",
                        "type": "market",
                        "position_intent": "sell_to_open"
                    }
                ],
                "order_class": "mleg",
                "order_type": "limit",
                "limit_price": 0.85,
                "time_in_force": "day",
                "extended_hours": false
            })
        );
    }
}

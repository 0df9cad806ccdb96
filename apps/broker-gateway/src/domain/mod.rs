//! Domain Layer
//!
//! The innermost layer: pure order-normalization logic with zero
//! infrastructure dependencies. Everything here is synchronous, deterministic,
//! and testable without a network.
//!
//! # Modules
//!
//! - [`symbol`]: prefixed-symbol canonicalization and OCC pattern matching
//! - [`intent`]: position intent resolution
//! - [`order_class`]: simple vs. multi-leg order class mapping
//! - [`fields`]: loose field coercion (numbers-as-strings, free-form enums)
//! - [`leg`]: per-leg validation and normalization
//! - [`order`]: whole-order validation, shaping, and defaulting

pub mod errors;
pub mod fields;
pub mod intent;
pub mod leg;
pub mod order;
pub mod order_class;
pub mod symbol;

pub use errors::ValidationError;
pub use fields::LooseNumber;
pub use intent::PositionIntent;
pub use leg::{OrderLeg, OrderSide, OrderType, RawOrderLeg, normalize_leg};
pub use order::{
    NormalizedOrder, OrderPlacement, RawOrderRequest, TimeInForce, normalize_order,
};
pub use order_class::OrderClass;
pub use symbol::{is_occ_symbol, to_bare_symbol};

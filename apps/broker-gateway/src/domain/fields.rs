//! Loose field coercion for client payloads.
//!
//! Desk clients have historically sent numeric fields as JSON numbers or as
//! numeric strings, and the upstream API tolerates both. [`LooseNumber`]
//! accepts either on the way in; the serializer helpers write integral
//! values back out without a fractional part, matching the formatting the
//! upstream API has always received.

use serde::{Deserialize, Serializer};

/// A number that may arrive as a JSON number or a numeric string.
///
/// Coercion never fails: a string that does not parse becomes NaN, which the
/// downstream finiteness checks reject with a validation error instead of a
/// deserialization error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    /// Plain JSON number.
    Num(f64),
    /// Numeric string such as `"2"` or `"1.25"`.
    Text(String),
}

impl LooseNumber {
    /// Coerce to `f64`, yielding NaN for unparseable strings.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Num(value) => *value,
            Self::Text(text) => text.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

impl From<f64> for LooseNumber {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

/// Serialize an integral float as a JSON integer, anything else as-is.
///
/// Non-finite values fall through to `serialize_f64`, which `serde_json`
/// renders as `null`, the same treatment the upstream API already expects
/// for absent numbers.
pub fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    #[allow(clippy::cast_possible_truncation)]
    if value.is_finite() && value.fract() == 0.0 {
        if *value >= 0.0 && *value <= u64::MAX as f64 {
            return serializer.serialize_u64(*value as u64);
        }
        if *value < 0.0 && *value >= i64::MIN as f64 {
            return serializer.serialize_i64(*value as i64);
        }
    }
    serializer.serialize_f64(*value)
}

/// [`serialize_number`] lifted over `Option`, for optional wire fields.
pub fn serialize_opt_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(inner) => serialize_number(inner, serializer),
        None => serializer.serialize_none(),
    }
}

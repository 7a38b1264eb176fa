//! Permissive field coercion used by the payload `Deserialize` impls.
//!
//! Signaling peers are loose about types: one sends `"sdpMLineIndex": 0`,
//! another sends `"sdpMLineIndex": "0"`, a third leaves it out. Every
//! payload field therefore goes through one of these `deserialize_with`
//! helpers, which accept any JSON value and fall back to an empty default
//! instead of failing the whole frame.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Renders a scalar as text. Null, arrays and objects become `""`.
pub(crate) fn coerce_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Reads an integer out of a number or numeric string, else 0.
pub(crate) fn coerce_int(value: Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        Value::Bool(b) => i64::from(b),
        Value::Null | Value::Array(_) | Value::Object(_) => 0,
    }
}

/// Any JSON value as text, via [`coerce_string`].
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(coerce_string)
}

/// Integer code mapped through `T::from`.
pub(crate) fn code<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<i64>,
{
    Value::deserialize(deserializer).map(|v| T::from(coerce_int(v)))
}

/// A nested record, present only when the member is a JSON object.
pub(crate) fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => {
            T::deserialize(value).map(Some).map_err(D::Error::custom)
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_string_passes_strings_through() {
        assert_eq!(coerce_string(json!("abc")), "abc");
    }

    #[test]
    fn test_coerce_string_renders_scalars() {
        assert_eq!(coerce_string(json!(0)), "0");
        assert_eq!(coerce_string(json!(-12)), "-12");
        assert_eq!(coerce_string(json!(true)), "true");
    }

    #[test]
    fn test_coerce_string_defaults_for_compound_and_null() {
        assert_eq!(coerce_string(Value::Null), "");
        assert_eq!(coerce_string(json!([1, 2])), "");
        assert_eq!(coerce_string(json!({"a": 1})), "");
    }

    #[test]
    fn test_coerce_int_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_int(json!(1)), 1);
        assert_eq!(coerce_int(json!(" 7 ")), 7);
        assert_eq!(coerce_int(json!(2.9)), 2);
    }

    #[test]
    fn test_coerce_int_defaults_to_zero() {
        assert_eq!(coerce_int(json!("streamer")), 0);
        assert_eq!(coerce_int(Value::Null), 0);
        assert_eq!(coerce_int(json!({})), 0);
    }
}

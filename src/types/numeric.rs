//! Coercion of the API's numeric-as-string fields.
//!
//! Balances arrive as decimal strings (`"123.45"`), though plain JSON numbers are
//! accepted as well.

use serde_json::{Map, Value};

use crate::error::LemonError;

/// Read `key` from `map` and coerce it to `f64`.
///
/// # Example
///
/// ```rust
/// use lemon_markets_client::types::numeric_field;
///
/// let state = serde_json::json!({"balance": "123.45"});
/// let balance = numeric_field(state.as_object().unwrap(), "balance").unwrap();
/// assert_eq!(balance, 123.45);
/// ```
pub fn numeric_field(map: &Map<String, Value>, key: &str) -> Result<f64, LemonError> {
    match map.get(key) {
        None | Some(Value::Null) => Err(LemonError::MissingField(key.to_string())),
        Some(value) => coerce_f64(value).ok_or_else(|| LemonError::InvalidNumber {
            field: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_string_and_number_values() {
        let map = object(json!({"balance": "100.50", "cash_to_invest": 42}));
        assert_eq!(numeric_field(&map, "balance").unwrap(), 100.5);
        assert_eq!(numeric_field(&map, "cash_to_invest").unwrap(), 42.0);
    }

    #[test]
    fn test_missing_and_null_are_missing_field() {
        let map = object(json!({"balance": null}));
        assert!(matches!(
            numeric_field(&map, "balance"),
            Err(LemonError::MissingField(field)) if field == "balance"
        ));
        assert!(matches!(
            numeric_field(&map, "cash_to_invest"),
            Err(LemonError::MissingField(_))
        ));
    }

    #[test]
    fn test_non_numeric_value() {
        let map = object(json!({"balance": "lots", "flag": true}));
        match numeric_field(&map, "balance") {
            Err(LemonError::InvalidNumber { field, value }) => {
                assert_eq!(field, "balance");
                assert_eq!(value, "\"lots\"");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(numeric_field(&map, "flag").is_err());
    }
}

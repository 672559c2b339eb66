//! Lenient field access on JSON trees.
//!
//! Missing keys, `null` values, empty strings and empty arrays are all treated
//! the same way: as absent.

use serde_json::Value;

/// Non-empty string value of `key`.
pub fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// String value of `key`, or `default` when absent.
pub fn string_or(value: &Value, key: &str, default: &str) -> String {
    str_field(value, key).unwrap_or(default).to_string()
}

/// Scalar value of `key` rendered as text (strings verbatim, numbers and booleans formatted).
pub fn scalar_text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Elements of the array at `key`; anything that is not an array yields nothing.
pub fn array_items<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// First element of the array at `key`, if any.
pub fn first_item<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    array_items(value, key).first()
}

/// Array at `key` for a required container.
///
/// `Ok(None)` when the key is absent or `null`, `Err` with the JSON type name
/// when the key holds something other than an array.
pub fn container<'a>(value: &'a Value, key: &str) -> Result<Option<&'a [Value]>, &'static str> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items.as_slice())),
        Some(other) => Err(type_name(other)),
    }
}

/// JSON type name for diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_str_field_treats_blank_as_missing() {
        let v = json!({"a": "x", "b": "  ", "c": null, "d": 4});
        assert_eq!(str_field(&v, "a"), Some("x"));
        assert_eq!(str_field(&v, "b"), None);
        assert_eq!(str_field(&v, "c"), None);
        assert_eq!(str_field(&v, "d"), None);
        assert_eq!(string_or(&v, "missing", "dflt"), "dflt");
    }

    #[test]
    fn test_scalar_text() {
        let v = json!({"n": 7.5, "s": "9.8", "o": {}});
        assert_eq!(scalar_text(&v, "n").as_deref(), Some("7.5"));
        assert_eq!(scalar_text(&v, "s").as_deref(), Some("9.8"));
        assert_eq!(scalar_text(&v, "o"), None);
    }

    #[test]
    fn test_array_helpers() {
        let v = json!({"list": [1, 2], "obj": {"k": 1}, "empty": []});
        assert_eq!(array_items(&v, "list").len(), 2);
        assert!(array_items(&v, "obj").is_empty());
        assert!(first_item(&v, "empty").is_none());
        assert_eq!(first_item(&v, "list"), Some(&json!(1)));
    }

    #[test]
    fn test_container_shapes() {
        let v = json!({"ok": [], "bad": "nope", "nil": null});
        assert_eq!(container(&v, "ok"), Ok(Some(&[][..])));
        assert_eq!(container(&v, "nil"), Ok(None));
        assert_eq!(container(&v, "missing"), Ok(None));
        assert_eq!(container(&v, "bad"), Err("string"));
    }
}

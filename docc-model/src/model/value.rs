//! Duck-typed accessors over raw JSON objects.
//!
//! Fields with an unexpected type are treated as missing, never as errors.

use serde_json::{Map, Value};

pub(crate) type Object = Map<String, Value>;

/// Textual form of a scalar JSON value. Containers and `null` have none.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub(crate) fn string(obj: &Object, key: &str) -> Option<String> {
    obj.get(key).and_then(scalar_to_string)
}

/// Like [`string`], but an empty string counts as absent.
pub(crate) fn non_empty(obj: &Object, key: &str) -> Option<String> {
    string(obj, key).filter(|s| !s.is_empty())
}

pub(crate) fn array<'a>(obj: &'a Object, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// Largest magnitude at which every whole `f64` is exactly representable.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Also accepts whole-number floats such as `3.0` and numeric strings.
pub(crate) fn integer(obj: &Object, key: &str) -> Option<i64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| whole_float(n.as_f64()?)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn whole_float(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT).then_some(f as i64)
}

pub(crate) fn kind(obj: &Object) -> Option<&str> {
    obj.get("type").and_then(Value::as_str)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: &Value) -> &Object {
        value.as_object().unwrap()
    }

    #[test]
    fn test_wrong_types_read_as_missing() {
        let value = json!({"title": ["x"], "url": null, "items": "nope"});
        let obj = object(&value);
        assert_eq!(string(obj, "title"), None);
        assert_eq!(string(obj, "url"), None);
        assert!(array(obj, "items").is_empty());
    }

    #[test]
    fn test_numeric_strings_parse_as_integers() {
        let value = json!({"a": 3, "b": " 4 ", "c": "four", "d": 2.5});
        let obj = object(&value);
        assert_eq!(integer(obj, "a"), Some(3));
        assert_eq!(integer(obj, "b"), Some(4));
        assert_eq!(integer(obj, "c"), None);
        assert_eq!(integer(obj, "d"), None);
    }

    #[test]
    fn test_whole_floats_parse_as_integers() {
        let value = json!({"level": 3.0, "negative": -1.0, "huge": 1e300});
        let obj = object(&value);
        assert_eq!(integer(obj, "level"), Some(3));
        assert_eq!(integer(obj, "negative"), Some(-1));
        assert_eq!(integer(obj, "huge"), None);
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let value = json!({"name": "", "other": 7});
        let obj = object(&value);
        assert_eq!(non_empty(obj, "name"), None);
        assert_eq!(non_empty(obj, "other").as_deref(), Some("7"));
    }
}

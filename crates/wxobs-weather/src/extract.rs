//! Defaulting accessors for loosely shaped JSON documents.
//!
//! Each step of a path may be missing or have the wrong type; the walk
//! stops there and the caller gets the default instead of an error.

use serde_json::Value;

/// Follow `path` through nested objects.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Number at `path`, or `0.0` when absent, null, or not numeric.
///
/// Numeric strings are accepted.
pub fn number_at(value: &Value, path: &[&str]) -> f64 {
    match lookup(value, path) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// String at `path`, or an empty string when absent or not a string.
pub fn string_at(value: &Value, path: &[&str]) -> String {
    lookup(value, path)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Quantitative value in the NWS `{ "value": ..., "unitCode": ... }` shape.
pub fn measurement(properties: &Value, key: &str) -> f64 {
    number_at(properties, &[key, "value"])
}

//! Helper functions for safe JSON parsing
//!
//! These functions provide safe access to JSON values with proper error
//! handling, avoiding unwrap() and providing clear error messages.

use crate::error::{RenderError, RenderResult};
use serde_json::Value;

/// Safely get a f64 value from a JSON object
pub fn get_f64(obj: &Value, key: &str) -> RenderResult<f64> {
    match obj.get(key) {
        None => Err(RenderError::MissingField(key.to_string())),
        Some(v) => v.as_f64().ok_or_else(|| {
            RenderError::InvalidValue(key.to_string(), format!("Expected f64, got: {:?}", v))
        }),
    }
}

/// Safely get a f64 value from a JSON object with default
pub fn get_f64_or(obj: &Value, key: &str, default: f64) -> f64 {
    obj.get(key).and_then(|v| v.as_f64()).unwrap_or(default)
}

/// Safely get an optional f64 value from a JSON object
pub fn get_f64_opt(obj: &Value, key: &str) -> Option<f64> {
    obj.get(key).and_then(|v| v.as_f64())
}

/// Safely get a string value from a JSON object
pub fn get_str<'a>(obj: &'a Value, key: &str) -> RenderResult<&'a str> {
    match obj.get(key) {
        None => Err(RenderError::MissingField(key.to_string())),
        Some(v) => v.as_str().ok_or_else(|| {
            RenderError::InvalidValue(key.to_string(), format!("Expected string, got: {:?}", v))
        }),
    }
}

/// Safely get a string value from a JSON object with default
pub fn get_str_or<'a>(obj: &'a Value, key: &str, default: &'a str) -> &'a str {
    obj.get(key).and_then(|v| v.as_str()).unwrap_or(default)
}

/// Safely get an optional string value from a JSON object
pub fn get_str_opt<'a>(obj: &'a Value, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(|v| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_f64() {
        let v = json!({"top_margin": 150.0});
        assert_eq!(get_f64(&v, "top_margin").unwrap(), 150.0);
        assert!(get_f64(&v, "missing").is_err());
        assert_eq!(get_f64_or(&v, "missing", 100.0), 100.0);
    }

    #[test]
    fn test_get_str() {
        let v = json!({"content": "<p>x</p>"});
        assert_eq!(get_str(&v, "content").unwrap(), "<p>x</p>");
        assert!(get_str(&v, "nope").is_err());
        assert_eq!(get_str_or(&v, "nope", "fallback"), "fallback");
    }
}

//! Flux Standard Action shape checks
//!
//! These checks are advisory. The factories never call them; they exist for
//! consumers and tests that want to confirm a value is a standard message.

use serde_json::Value;

use crate::shape::is_plain_object;
use crate::{Error, Result};

/// Keys a standard message may carry
pub const VALID_KEYS: [&str; 4] = ["type", "payload", "error", "meta"];

/// Check that a value has the standard message shape
pub fn validate(value: &Value) -> Result<()> {
    let Value::Object(map) = value else {
        return Err(Error::invalid_message("expected a plain object"));
    };

    match map.get("type") {
        Some(Value::String(_)) => {}
        Some(other) => {
            return Err(Error::invalid_message(format!(
                "'type' must be a string, found {}",
                other
            )));
        }
        None => return Err(Error::invalid_message("missing 'type'")),
    }

    let unknown: Vec<&str> = map
        .keys()
        .map(String::as_str)
        .filter(|key| !VALID_KEYS.contains(key))
        .collect();
    if !unknown.is_empty() {
        return Err(Error::invalid_message(format!(
            "unexpected keys: {}",
            unknown.join(", ")
        )));
    }

    Ok(())
}

/// Returns true if the value has the standard message shape
pub fn is_fsa(value: &Value) -> bool {
    is_plain_object(value) && validate(value).is_ok()
}

/// Returns true if the value is a standard message flagged as an error
pub fn is_error(value: &Value) -> bool {
    is_fsa(value) && value.get("error") == Some(&Value::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_messages() {
        assert!(is_fsa(&json!({"type": "TYPE"})));
        assert!(is_fsa(&json!({"type": "TYPE", "payload": {"foo": "bar"}})));
        assert!(is_fsa(&json!({"type": "TYPE", "payload": 1, "meta": {}, "error": true})));
    }

    #[test]
    fn test_invalid_messages() {
        assert!(!is_fsa(&json!(null)));
        assert!(!is_fsa(&json!([{"type": "TYPE"}])));
        assert!(!is_fsa(&json!({"payload": 1})));
        assert!(!is_fsa(&json!({"type": 1})));
        assert!(!is_fsa(&json!({"type": "TYPE", "data": 1})));
    }

    #[test]
    fn test_validate_messages() {
        let err = validate(&json!({"type": "TYPE", "data": 1, "extra": 2})).unwrap_err();
        assert!(err.to_string().contains("unexpected keys: data, extra"));

        let err = validate(&json!({"type": null})).unwrap_err();
        assert!(err.to_string().contains("'type' must be a string"));

        let err = validate(&json!({})).unwrap_err();
        assert!(err.to_string().contains("missing 'type'"));
    }

    #[test]
    fn test_is_error() {
        assert!(is_error(&json!({"type": "TYPE", "error": true})));
        assert!(!is_error(&json!({"type": "TYPE", "error": false})));
        assert!(!is_error(&json!({"type": "TYPE", "error": "true"})));
        assert!(!is_error(&json!({"type": "TYPE"})));
        assert!(!is_error(&json!({"error": true})));
    }
}

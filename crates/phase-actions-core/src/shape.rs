//! Type classification helpers for loosely typed option and message values

use serde_json::Value;

/// Returns true if the value is a record-like JSON object.
///
/// Arrays, `null` and primitives are not plain objects.
pub fn is_plain_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Returns true if no value is present at all.
///
/// An explicit `null` is a value and therefore not undefined.
pub fn is_undefined(value: Option<&Value>) -> bool {
    value.is_none()
}

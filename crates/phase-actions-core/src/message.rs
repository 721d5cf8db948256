//! Standard action messages
//!
//! A message is the `{type, payload?, meta?, error?}` record produced by
//! invoking a descriptor.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Result, fsa};

/// A structured action message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Message {
    /// Action type identifier of the descriptor that produced this message
    #[serde(rename = "type")]
    pub action_type: String,

    /// Payload, absent when the payload creator produced nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    /// Metadata, present only when a meta creator produced a value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,

    /// Set when the payload represents a failure
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl Message {
    /// Create a message with only a type
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: None,
            meta: None,
            error: false,
        }
    }

    /// Set the payload
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Set the metadata
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Mark as an error message
    pub fn with_error(mut self) -> Self {
        self.error = true;
        self
    }

    /// Whether the message carries a failure
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Parse a message from a JSON value, checking the standard shape first
    pub fn from_value(value: Value) -> Result<Self> {
        fsa::validate(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Convert into a JSON object with only the keys that are set
    pub fn into_value(self) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::String(self.action_type));
        if let Some(payload) = self.payload {
            map.insert("payload".to_string(), payload);
        }
        if let Some(meta) = self.meta {
            map.insert("meta".to_string(), meta);
        }
        if self.error {
            map.insert("error".to_string(), Value::Bool(true));
        }
        Value::Object(map)
    }
}

impl From<Message> for Value {
    fn from(message: Message) -> Self {
        message.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_value_omits_unset_keys() {
        let value = Message::new("TYPE").into_value();
        assert_eq!(value, json!({"type": "TYPE"}));

        let value = Message::new("TYPE")
            .with_payload(json!({"foo": "bar"}))
            .with_meta(json!(1))
            .with_error()
            .into_value();
        assert_eq!(
            value,
            json!({"type": "TYPE", "payload": {"foo": "bar"}, "meta": 1, "error": true})
        );
    }

    #[test]
    fn test_serialize_matches_into_value() {
        let message = Message::new("TYPE_START").with_payload(json!(5));
        let serialized = serde_json::to_value(&message).unwrap();
        assert_eq!(serialized, message.into_value());
    }

    #[test]
    fn test_from_value() {
        let message = Message::from_value(json!({"type": "TYPE", "payload": [1, 2]})).unwrap();
        assert_eq!(message.action_type, "TYPE");
        assert_eq!(message.payload, Some(json!([1, 2])));
        assert_eq!(message.meta, None);
        assert!(!message.is_error());

        let message =
            Message::from_value(json!({"type": "TYPE_ERROR", "error": true})).unwrap();
        assert!(message.is_error());
    }

    #[test]
    fn test_from_value_rejects_bad_shape() {
        let result = Message::from_value(json!({"type": "TYPE", "extra": 1}));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("extra"));

        assert!(Message::from_value(json!({"payload": 1})).is_err());
        assert!(Message::from_value(json!("TYPE")).is_err());
    }
}

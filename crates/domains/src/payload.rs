//! Loosely-typed request payloads.
//!
//! Bodies are kept as JSON objects until an entity factory validates them, so
//! that an absent field and a field of the wrong type stay distinguishable.

use serde_json::{Map, Value};

use crate::error::{PayloadError, PayloadKind};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON body. Anything other than an object is treated as empty.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Adds or overrides a field, e.g. path parameters and the caller's id.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Extracts `keys` as strings. Every field is checked for presence before
    /// any field is checked for type.
    pub fn require_strings<const N: usize>(
        &self,
        keys: [&str; N],
        kind: PayloadKind,
    ) -> Result<[String; N], PayloadError> {
        if keys.iter().any(|key| is_missing(self.0.get(*key))) {
            return Err(PayloadError::missing(kind));
        }

        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        for (slot, key) in values.iter_mut().zip(keys) {
            match self.0.get(key) {
                Some(Value::String(s)) => *slot = s.clone(),
                _ => return Err(PayloadError::mismatch(kind)),
            }
        }
        Ok(values)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayloadViolation;
    use serde_json::json;

    #[test]
    fn extracts_strings_in_key_order() {
        let payload = Payload::from_value(json!({ "a": "1", "b": "2" }));
        let [b, a] = payload
            .require_strings(["b", "a"], PayloadKind::AddComment)
            .unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("1", "2"));
    }

    #[test]
    fn missing_wins_over_type_mismatch() {
        let payload = Payload::from_value(json!({ "a": 123 }));
        let err = payload
            .require_strings(["a", "b"], PayloadKind::AddComment)
            .unwrap_err();
        assert_eq!(err.violation, PayloadViolation::MissingProperty);
    }

    #[test]
    fn null_and_empty_count_as_missing() {
        let payload = Payload::from_value(json!({ "a": null, "b": "" }));
        assert!(payload.require_strings(["a"], PayloadKind::AddReply).is_err());
        let err = payload
            .require_strings(["b"], PayloadKind::AddReply)
            .unwrap_err();
        assert_eq!(err.violation, PayloadViolation::MissingProperty);
    }

    #[test]
    fn non_string_is_a_type_mismatch() {
        let payload = Payload::from_value(json!({ "content": { "content": "x" } }));
        let err = payload
            .require_strings(["content"], PayloadKind::AddReply)
            .unwrap_err();
        assert_eq!(err.violation, PayloadViolation::TypeMismatch);
    }

    #[test]
    fn non_object_body_is_empty() {
        let payload = Payload::from_value(json!(["title"]));
        assert_eq!(payload, Payload::new());
    }

    #[test]
    fn with_overrides_body_fields() {
        let payload = Payload::from_value(json!({ "owner": "spoofed" })).with("owner", "user-123");
        assert_eq!(payload.get("owner"), Some(&json!("user-123")));
    }
}

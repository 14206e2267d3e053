//! # Message Resolution
//!
//! Every violation carries a generic default text. A rule may override it
//! per message key; an override replaces the default verbatim (no
//! templating). Bound-specific keys (`min`, `max`, `min_length`,
//! `max_length`) take precedence over their category key (`range`,
//! `length`), which in turn takes precedence over the default.

use serde::{Deserialize, Serialize};

/// Per-rule message overrides, keyed by violation category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_mismatch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_error: Option<String>,
}

/// Lookup key into [`Messages`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Required,
    TypeMismatch,
    Range,
    Min,
    Max,
    Length,
    MinLength,
    MaxLength,
    Pattern,
    AllowedValues,
    CustomError,
}

impl MessageKey {
    /// The category key consulted when this key has no override.
    pub fn fallback(&self) -> Option<MessageKey> {
        match self {
            MessageKey::Min | MessageKey::Max => Some(MessageKey::Range),
            MessageKey::MinLength | MessageKey::MaxLength => Some(MessageKey::Length),
            _ => None,
        }
    }
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the override for `key`.
    pub fn with(mut self, key: MessageKey, text: impl Into<String>) -> Self {
        *self.slot_mut(key) = Some(text.into());
        self
    }

    /// Returns the override stored for exactly `key`, without fallback.
    pub fn get(&self, key: MessageKey) -> Option<&str> {
        let slot = match key {
            MessageKey::Required => &self.required,
            MessageKey::TypeMismatch => &self.type_mismatch,
            MessageKey::Range => &self.range,
            MessageKey::Min => &self.min,
            MessageKey::Max => &self.max,
            MessageKey::Length => &self.length,
            MessageKey::MinLength => &self.min_length,
            MessageKey::MaxLength => &self.max_length,
            MessageKey::Pattern => &self.pattern,
            MessageKey::AllowedValues => &self.allowed_values,
            MessageKey::CustomError => &self.custom_error,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, key: MessageKey) -> &mut Option<String> {
        match key {
            MessageKey::Required => &mut self.required,
            MessageKey::TypeMismatch => &mut self.type_mismatch,
            MessageKey::Range => &mut self.range,
            MessageKey::Min => &mut self.min,
            MessageKey::Max => &mut self.max,
            MessageKey::Length => &mut self.length,
            MessageKey::MinLength => &mut self.min_length,
            MessageKey::MaxLength => &mut self.max_length,
            MessageKey::Pattern => &mut self.pattern,
            MessageKey::AllowedValues => &mut self.allowed_values,
            MessageKey::CustomError => &mut self.custom_error,
        }
    }

    /// Returns the override for `key`, falling back to its category key.
    pub fn lookup(&self, key: MessageKey) -> Option<&str> {
        self.get(key)
            .or_else(|| key.fallback().and_then(|k| self.get(k)))
    }
}

/// Resolves the final message text for a violation.
pub fn resolve(messages: Option<&Messages>, key: MessageKey, default: String) -> String {
    messages
        .and_then(|m| m.lookup(key))
        .map_or(default, str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_table_uses_default() {
        assert_eq!(
            resolve(None, MessageKey::Required, "Field is required".into()),
            "Field is required"
        );
    }

    #[test]
    fn test_absent_key_uses_default() {
        let m = Messages::new().with(MessageKey::Pattern, "bad format");
        assert_eq!(
            resolve(Some(&m), MessageKey::Required, "Field is required".into()),
            "Field is required"
        );
    }

    #[test]
    fn test_override_is_verbatim() {
        let m = Messages::new().with(MessageKey::Required, "The name field is mandatory");
        assert_eq!(
            resolve(Some(&m), MessageKey::Required, "Field is required".into()),
            "The name field is mandatory"
        );
    }

    #[test]
    fn test_bound_key_falls_back_to_category() {
        let m = Messages::new().with(MessageKey::Range, "out of range");
        assert_eq!(m.lookup(MessageKey::Min), Some("out of range"));
        assert_eq!(m.lookup(MessageKey::Max), Some("out of range"));
        assert_eq!(m.lookup(MessageKey::MinLength), None);
    }

    #[test]
    fn test_bound_key_beats_category() {
        let m = Messages::new()
            .with(MessageKey::Length, "wrong length")
            .with(MessageKey::MinLength, "too short");
        assert_eq!(m.lookup(MessageKey::MinLength), Some("too short"));
        assert_eq!(m.lookup(MessageKey::MaxLength), Some("wrong length"));
    }

    #[test]
    fn test_deserialize_partial_table() {
        let m: Messages =
            serde_json::from_str(r#"{"required": "X", "custom_error": "Y"}"#).unwrap();
        assert_eq!(m.get(MessageKey::Required), Some("X"));
        assert_eq!(m.get(MessageKey::CustomError), Some("Y"));
        assert_eq!(m.get(MessageKey::Range), None);
    }
}

//! Note domain model.
//!
//! # Responsibility
//! - Define the named text record shared by store, persistence and HTTP layers.
//! - Keep the serialized shape identical to the persisted JSON document.
//!
//! # Invariants
//! - `name` is fixed at creation; only `text` is mutable through the store.
//! - The JSON shape is exactly `{ "name": string, "text": string }`.

use serde::{Deserialize, Serialize};

/// Named text record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Note {
    /// Unique identifier within one store.
    pub name: String,
    /// Mutable note body.
    pub text: String,
}

impl Note {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Note;

    #[test]
    fn serializes_to_name_text_object() {
        let note = Note::new("a", "hello");
        let value = serde_json::to_value(&note).expect("note should serialize");
        assert_eq!(value, serde_json::json!({ "name": "a", "text": "hello" }));
    }

    #[test]
    fn rejects_objects_missing_text() {
        let result = serde_json::from_str::<Note>(r#"{ "name": "a" }"#);
        assert!(result.is_err());
    }
}

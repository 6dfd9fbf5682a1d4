use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use crate::types::{FieldName, Label, Turn};

/// One materialized dataset row, keyed by column name in source order.
pub type Row = IndexMap<FieldName, Value>;

/// Normalized calibration example produced from a dialogue turn pair or a Q/A row.
///
/// Serialized field order is part of the on-disk format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalExample {
    /// User-side utterance, trimmed and non-empty.
    pub user: String,
    /// Assistant-side utterance, trimmed and non-empty.
    pub assistant: String,
    /// Intent or topic tag; empty when the source carries none.
    pub intent: Label,
    /// Emotion tag; empty when the source carries none.
    pub emotion: Label,
}

impl CanonicalExample {
    /// Build an example, returning `None` when either side is blank after trimming.
    pub fn new(
        user: impl AsRef<str>,
        assistant: impl AsRef<str>,
        intent: impl Into<Label>,
        emotion: impl Into<Label>,
    ) -> Option<Self> {
        let user = user.as_ref().trim();
        let assistant = assistant.as_ref().trim();
        if user.is_empty() || assistant.is_empty() {
            return None;
        }
        Some(Self {
            user: user.to_string(),
            assistant: assistant.to_string(),
            intent: intent.into(),
            emotion: emotion.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_both_sides() {
        let example = CanonicalExample::new("  hello ", "\thi there\n", "greeting", "").unwrap();
        assert_eq!(example.user, "hello");
        assert_eq!(example.assistant, "hi there");
        assert_eq!(example.intent, "greeting");
        assert_eq!(example.emotion, "");
    }

    #[test]
    fn new_rejects_blank_sides() {
        assert!(CanonicalExample::new("   ", "reply", "", "").is_none());
        assert!(CanonicalExample::new("question", "", "", "").is_none());
    }

    #[test]
    fn serializes_keys_in_canonical_order() {
        let example = CanonicalExample::new("a", "b", "c", "d").unwrap();
        let encoded = serde_json::to_string(&example).unwrap();
        assert_eq!(
            encoded,
            r#"{"user":"a","assistant":"b","intent":"c","emotion":"d"}"#
        );
    }
}

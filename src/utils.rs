//! Text helpers shared by the coalescer and the listifier.

use serde_json::Value;

/// Convert a JSON value into its text form, or `None` for null.
///
/// Strings are returned untrimmed. Arrays and objects render as compact JSON.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Split `text` on `separator`, trimming each piece and dropping blank ones.
pub fn split_trimmed(text: &str, separator: &str) -> Vec<String> {
    text.split(separator)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_to_text_renders_scalars_and_structures() {
        assert_eq!(value_to_text(&Value::Null), None);
        assert_eq!(value_to_text(&json!("  keep  ")).as_deref(), Some("  keep  "));
        assert_eq!(value_to_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(value_to_text(&json!(7)).as_deref(), Some("7"));
        assert_eq!(value_to_text(&json!(["a", 1])).as_deref(), Some(r#"["a",1]"#));
        assert_eq!(value_to_text(&json!({"k": "v"})).as_deref(), Some(r#"{"k":"v"}"#));
    }

    #[test]
    fn split_trimmed_drops_blank_segments() {
        assert_eq!(
            split_trimmed(" a |  | b|", "|"),
            vec!["a".to_string(), "b".to_string()]
        );
        assert!(split_trimmed("   ", "|").is_empty());
    }
}

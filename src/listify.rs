//! Normalization of loosely encoded dialogue fields into turn sequences.
//!
//! Corpora store multi-turn content as real arrays, JSON-encoded arrays,
//! `__eou__`-delimited strings, or newline-joined blobs. String values run
//! through an ordered chain of strategies; the first one that recognizes the
//! encoding wins and later ones are never consulted.

use serde_json::Value;

use crate::constants::listify::EOU_DELIMITER;
use crate::types::Turn;
use crate::utils::{split_trimmed, value_to_text};

/// A single string decoding strategy. `None` defers to the next strategy.
type ListStrategy = fn(&str) -> Option<Vec<Turn>>;

/// String strategies in precedence order. The last one always succeeds.
const STRING_STRATEGIES: [ListStrategy; 4] = [
    parse_json_list,
    split_on_eou_delimiter,
    split_on_newlines,
    wrap_whole,
];

/// Normalize an optional field value into an ordered sequence of strings.
///
/// Never fails: malformed encodings fall through to the next strategy.
pub fn listify(value: Option<&Value>) -> Vec<Turn> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(element_text).collect(),
        Some(Value::String(text)) => listify_text(text),
        Some(other) => value_to_text(other).into_iter().collect(),
    }
}

/// Decode a string-encoded field. Blank input yields an empty sequence.
pub fn listify_text(text: &str) -> Vec<Turn> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    STRING_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(text))
        .unwrap_or_default()
}

/// Array elements keep their exact text; trimming happens at pairing time.
fn element_text(value: &Value) -> Turn {
    value_to_text(value).unwrap_or_default()
}

fn parse_json_list(text: &str) -> Option<Vec<Turn>> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Array(items) => Some(items.iter().map(element_text).collect()),
        _ => None,
    }
}

fn split_on_eou_delimiter(text: &str) -> Option<Vec<Turn>> {
    text.contains(EOU_DELIMITER)
        .then(|| split_trimmed(text, EOU_DELIMITER))
}

fn split_on_newlines(text: &str) -> Option<Vec<Turn>> {
    let lines = split_trimmed(text, "\n");
    (lines.len() > 1).then_some(lines)
}

fn wrap_whole(text: &str) -> Option<Vec<Turn>> {
    Some(vec![text.to_string()])
}

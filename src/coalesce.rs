//! First-match field selection across dataset schema variants.

use crate::record::RawRecord;
use crate::utils::value_to_text;

/// Return the first candidate field whose trimmed text is non-empty.
///
/// Candidates are tried in order, so the slice encodes priority across
/// schema variants. Returns an empty string when nothing matches.
pub fn pick_first<R: RawRecord + ?Sized>(record: &R, candidates: &[&str]) -> String {
    candidates
        .iter()
        .filter_map(|name| record.field(name))
        .filter_map(value_to_text)
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Like [`pick_first`], falling back to `default` when no candidate matches.
pub fn pick_first_or<R: RawRecord + ?Sized>(
    record: &R,
    candidates: &[&str],
    default: &str,
) -> String {
    let picked = pick_first(record, candidates);
    if picked.is_empty() {
        default.to_string()
    } else {
        picked
    }
}

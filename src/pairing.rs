//! Adjacent-turn pairing with best-effort label attachment.
//!
//! Turn `i` becomes the user side and turn `i + 1` the assistant side. Labels
//! are only loosely aligned in the source corpora: the label at `i + 1` (the
//! assistant turn) is preferred, then the label at `i`, then nothing. This is a
//! heuristic; a dataset that labels the first turn of each pair is mislabeled
//! by it.

use crate::data::CanonicalExample;
use crate::types::{Label, Turn};

/// Iterate the canonical examples formed by each adjacent turn pair.
///
/// Yields at most `turns.len() - 1` examples; pairs with a blank side are skipped.
pub fn turn_pairs<'a>(
    turns: &'a [Turn],
    intents: &'a [Label],
    emotions: &'a [Label],
) -> impl Iterator<Item = CanonicalExample> + 'a {
    turns.windows(2).enumerate().filter_map(move |(idx, pair)| {
        CanonicalExample::new(
            &pair[0],
            &pair[1],
            label_for_pair(intents, idx),
            label_for_pair(emotions, idx),
        )
    })
}

/// Collect every example produced by [`turn_pairs`].
pub fn pair_turns(turns: &[Turn], intents: &[Label], emotions: &[Label]) -> Vec<CanonicalExample> {
    turn_pairs(turns, intents, emotions).collect()
}

/// Label for the pair starting at `pair_idx`: index `pair_idx + 1`, else `pair_idx`, else empty.
pub fn label_for_pair(labels: &[Label], pair_idx: usize) -> Label {
    labels
        .get(pair_idx + 1)
        .or_else(|| labels.get(pair_idx))
        .map(|label| label.trim().to_string())
        .unwrap_or_default()
}

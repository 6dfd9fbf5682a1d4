//! Row-by-row extraction of canonical examples.
//!
//! A run uses one strategy for every row; strategies are chosen per dataset,
//! never inferred from row shape. Rows that cannot produce an example are
//! skipped silently (logged at `debug`), and extraction stops as soon as the
//! example limit is reached.

use tracing::{debug, info};

use crate::coalesce::{pick_first, pick_first_or};
use crate::config::example_limit;
use crate::constants::{counseling, dialogue};
use crate::data::CanonicalExample;
use crate::listify::listify;
use crate::pairing::turn_pairs;
use crate::record::RawRecord;
use crate::types::Turn;

/// Candidate field lists for multi-turn dialogue rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialogueFields {
    /// Fields that may hold the utterance sequence, highest priority first.
    pub conversation: &'static [&'static str],
    /// Fields that may hold per-turn intent labels.
    pub intent: &'static [&'static str],
    /// Fields that may hold per-turn emotion labels.
    pub emotion: &'static [&'static str],
}

impl Default for DialogueFields {
    fn default() -> Self {
        Self {
            conversation: dialogue::CONVERSATION_FIELDS,
            intent: dialogue::INTENT_FIELDS,
            emotion: dialogue::EMOTION_FIELDS,
        }
    }
}

/// Candidate field lists for single-turn question/answer rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuestionAnswerFields {
    /// Fields that may hold the user text.
    pub user: &'static [&'static str],
    /// Fields that may hold the assistant text.
    pub assistant: &'static [&'static str],
    /// Fields that may hold an intent or topic tag.
    pub intent: &'static [&'static str],
    /// Intent used when no intent field is populated.
    pub default_intent: &'static str,
}

impl Default for QuestionAnswerFields {
    fn default() -> Self {
        Self {
            user: counseling::USER_FIELDS,
            assistant: counseling::ASSISTANT_FIELDS,
            intent: counseling::INTENT_FIELDS,
            default_intent: counseling::DEFAULT_INTENT,
        }
    }
}

/// How rows of one dataset are turned into examples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Each row holds a dialogue; every adjacent turn pair becomes an example.
    MultiTurn(DialogueFields),
    /// Each row holds one user/assistant exchange.
    QuestionAnswer(QuestionAnswerFields),
}

impl ExtractionStrategy {
    /// Multi-turn strategy with the built-in DailyDialog-style field lists.
    pub fn multi_turn() -> Self {
        Self::MultiTurn(DialogueFields::default())
    }

    /// Q/A strategy with the built-in counseling field lists.
    pub fn question_answer() -> Self {
        Self::QuestionAnswer(QuestionAnswerFields::default())
    }

    fn label(&self) -> &'static str {
        match self {
            Self::MultiTurn(_) => "multi_turn",
            Self::QuestionAnswer(_) => "question_answer",
        }
    }
}

/// Counters describing one extraction run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Rows inspected before the run finished or hit the limit.
    pub rows_seen: usize,
    /// Rows that produced no example.
    pub rows_skipped: usize,
    /// Examples in the returned collection.
    pub examples: usize,
    /// True when extraction stopped early because the limit was reached.
    pub limit_reached: bool,
}

/// Examples produced by a run plus its counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Extracted examples in source order.
    pub examples: Vec<CanonicalExample>,
    /// Run counters.
    pub stats: ExtractionStats,
}

/// Applies one [`ExtractionStrategy`] across a row iterator.
#[derive(Clone, Debug)]
pub struct RowExtractor {
    strategy: ExtractionStrategy,
    limit: Option<usize>,
}

impl RowExtractor {
    /// Create an unbounded extractor.
    pub fn new(strategy: ExtractionStrategy) -> Self {
        Self {
            strategy,
            limit: None,
        }
    }

    /// Cap the collection size; `0` or negative means no cap.
    pub fn with_max_examples(mut self, max_examples: i64) -> Self {
        self.limit = example_limit(max_examples);
        self
    }

    /// Cap the collection size; `None` or `Some(0)` means no cap.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|&max| max > 0);
        self
    }

    /// Active example cap.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Extract examples, discarding run counters.
    pub fn extract<I>(&self, rows: I) -> Vec<CanonicalExample>
    where
        I: IntoIterator,
        I::Item: RawRecord,
    {
        self.extract_with_stats(rows).examples
    }

    /// Extract examples and report run counters.
    pub fn extract_with_stats<I>(&self, rows: I) -> Extraction
    where
        I: IntoIterator,
        I::Item: RawRecord,
    {
        let mut examples = Vec::new();
        let mut stats = ExtractionStats::default();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if self.is_full(&examples) {
                stats.limit_reached = true;
                break;
            }
            stats.rows_seen += 1;

            let before = examples.len();
            match &self.strategy {
                ExtractionStrategy::MultiTurn(fields) => {
                    self.extract_dialogue_row(&row, fields, row_idx, &mut examples)
                }
                ExtractionStrategy::QuestionAnswer(fields) => {
                    extract_question_answer_row(&row, fields, row_idx, &mut examples)
                }
            }
            if examples.len() == before {
                stats.rows_skipped += 1;
            }
        }
        if !stats.limit_reached && self.is_full(&examples) {
            stats.limit_reached = true;
        }

        stats.examples = examples.len();
        info!(
            "[calibration:extract] {} extraction finished (rows={}, skipped={}, examples={}, limit_reached={})",
            self.strategy.label(),
            stats.rows_seen,
            stats.rows_skipped,
            stats.examples,
            stats.limit_reached
        );
        Extraction { examples, stats }
    }

    fn is_full(&self, examples: &[CanonicalExample]) -> bool {
        self.limit.is_some_and(|max| examples.len() >= max)
    }

    fn extract_dialogue_row<R: RawRecord>(
        &self,
        row: &R,
        fields: &DialogueFields,
        row_idx: usize,
        examples: &mut Vec<CanonicalExample>,
    ) {
        let turns = first_listed(row, fields.conversation);
        if turns.len() < 2 {
            debug!(
                "[calibration:extract] skipping row {row_idx}: {} turn(s), need at least 2",
                turns.len()
            );
            return;
        }
        let intents = first_listed(row, fields.intent);
        let emotions = first_listed(row, fields.emotion);

        let remaining = self
            .limit
            .map(|max| max.saturating_sub(examples.len()))
            .unwrap_or(usize::MAX);
        let before = examples.len();
        examples.extend(turn_pairs(&turns, &intents, &emotions).take(remaining));
        if examples.len() == before {
            debug!("[calibration:extract] skipping row {row_idx}: every turn pair had a blank side");
        }
    }
}

fn extract_question_answer_row<R: RawRecord>(
    row: &R,
    fields: &QuestionAnswerFields,
    row_idx: usize,
    examples: &mut Vec<CanonicalExample>,
) {
    let user = pick_first(row, fields.user);
    let assistant = pick_first(row, fields.assistant);
    let intent = pick_first_or(row, fields.intent, fields.default_intent);
    match CanonicalExample::new(user, assistant, intent, String::new()) {
        Some(example) => examples.push(example),
        None => debug!("[calibration:extract] skipping row {row_idx}: missing user or assistant text"),
    }
}

/// Listify the first candidate field that yields at least one element.
///
/// Candidates are never merged; a later field is only read when every earlier
/// one is absent or empty.
pub fn first_listed<R: RawRecord + ?Sized>(row: &R, candidates: &[&str]) -> Vec<Turn> {
    candidates
        .iter()
        .map(|name| listify(row.field(name)))
        .find(|items| !items.is_empty())
        .unwrap_or_default()
}

/// Extract multi-turn dialogue examples with the built-in field lists.
pub fn extract_dialogue_examples<I>(rows: I, max_examples: i64) -> Vec<CanonicalExample>
where
    I: IntoIterator,
    I::Item: RawRecord,
{
    RowExtractor::new(ExtractionStrategy::multi_turn())
        .with_max_examples(max_examples)
        .extract(rows)
}

/// Extract single-turn counseling examples with the built-in field lists.
pub fn extract_question_answer_examples<I>(rows: I, max_examples: i64) -> Vec<CanonicalExample>
where
    I: IntoIterator,
    I::Item: RawRecord,
{
    RowExtractor::new(ExtractionStrategy::question_answer())
        .with_max_examples(max_examples)
        .extract(rows)
}

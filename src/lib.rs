#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Reusable CLI runners behind the preparation binaries.
pub mod apps;
/// First-match field selection across schema variants.
pub mod coalesce;
/// Preparation configuration types.
pub mod config;
/// Centralized constants: candidate field lists, delimiters, defaults.
pub mod constants;
/// Canonical example and row types.
pub mod data;
/// Row extraction strategies and the extraction loop.
pub mod extract;
/// Turn sequence normalization.
pub mod listify;
/// JSON persistence of example collections.
pub mod output;
/// Adjacent-turn pairing with label attachment.
pub mod pairing;
/// End-to-end preparation runs.
pub mod prepare;
/// Read-only record access used by the core.
pub mod record;
/// Dataset sources and file readers.
pub mod source;
/// Input transports used by sources (filesystem today).
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Text helpers.
pub mod utils;

mod errors;

pub use coalesce::{pick_first, pick_first_or};
pub use config::{CounselingPrepareConfig, DialoguePrepareConfig, example_limit};
pub use data::{CanonicalExample, Row};
pub use errors::CalibrationError;
pub use extract::{
    DialogueFields, Extraction, ExtractionStats, ExtractionStrategy, QuestionAnswerFields,
    RowExtractor, extract_dialogue_examples, extract_question_answer_examples,
};
pub use listify::{listify, listify_text};
pub use output::{read_examples, to_json_string, write_examples};
pub use pairing::{label_for_pair, pair_turns, turn_pairs};
pub use prepare::{PrepareReport, prepare_counseling, prepare_dialogue};
pub use record::RawRecord;
pub use source::{DatasetFormat, DatasetSource, InMemoryDatasetSource, LocalDatasetSource};
#[cfg(feature = "huggingface")]
pub use source::HuggingFaceDatasetSource;
pub use types::{CandidatePath, DatasetId, FieldName, Label, SourceId, Turn};

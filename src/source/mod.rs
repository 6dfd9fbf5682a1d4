//! Dataset loading interfaces used by the preparation runners.
//!
//! Ownership model:
//! - `DatasetSource` materializes every row of one dataset in memory.
//! - `LocalDatasetSource` tries root-relative candidate files in order and
//!   reports only the last failure when none of them load.
//! - `HuggingFaceDatasetSource` (feature `huggingface`) downloads every shard
//!   of a split through `hf-hub` and hands them to the same file readers.
//!
//! The extractor never sees any of this; it only receives rows.

use std::path::Path;

use crate::constants::source::{
    CSV_EXTENSIONS, JSON_EXTENSIONS, JSON_LINES_EXTENSIONS, PARQUET_EXTENSIONS,
};
use crate::data::Row;
use crate::errors::CalibrationError;
use crate::types::SourceId;

/// File readers for each supported dataset format.
pub mod formats;
/// Local directory source with candidate-path fallback.
pub mod local;
#[cfg(feature = "huggingface")]
/// Hugging Face Hub backed source.
pub mod huggingface;

pub use formats::read_dataset_file;
pub use local::LocalDatasetSource;
#[cfg(feature = "huggingface")]
pub use huggingface::HuggingFaceDatasetSource;

/// On-disk encodings the loaders understand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetFormat {
    /// A JSON document holding an array of row objects.
    Json,
    /// One JSON row object per line.
    JsonLines,
    /// Comma-separated table with a header row.
    Csv,
    /// Parquet shard (feature `huggingface`).
    Parquet,
}

impl DatasetFormat {
    /// Detect the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let matches = |known: &[&str]| known.iter().any(|candidate| *candidate == ext);
        if matches(JSON_EXTENSIONS) {
            Some(Self::Json)
        } else if matches(JSON_LINES_EXTENSIONS) {
            Some(Self::JsonLines)
        } else if matches(CSV_EXTENSIONS) {
            Some(Self::Csv)
        } else if matches(PARQUET_EXTENSIONS) {
            Some(Self::Parquet)
        } else {
            None
        }
    }
}

/// Producer of fully materialized dataset rows.
pub trait DatasetSource {
    /// Stable identifier used in logs and errors.
    fn id(&self) -> &str;
    /// Load every row.
    ///
    /// Returns `CalibrationError::DatasetUnavailable` when no load strategy
    /// succeeds; a dataset that loads with zero rows is not an error.
    fn load_rows(&self) -> Result<Vec<Row>, CalibrationError>;
}

/// Source over rows that are already in memory.
pub struct InMemoryDatasetSource {
    id: SourceId,
    rows: Vec<Row>,
}

impl InMemoryDatasetSource {
    /// Create a source from prebuilt rows.
    pub fn new(id: impl Into<SourceId>, rows: Vec<Row>) -> Self {
        Self {
            id: id.into(),
            rows,
        }
    }
}

impl DatasetSource for InMemoryDatasetSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load_rows(&self) -> Result<Vec<Row>, CalibrationError> {
        Ok(self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_detection_is_case_insensitive() {
        assert_eq!(DatasetFormat::from_path(Path::new("a.JSON")), Some(DatasetFormat::Json));
        assert_eq!(
            DatasetFormat::from_path(Path::new("dir/a.ndjson")),
            Some(DatasetFormat::JsonLines)
        );
        assert_eq!(DatasetFormat::from_path(Path::new("a.Csv")), Some(DatasetFormat::Csv));
        assert_eq!(
            DatasetFormat::from_path(Path::new("train-00000.parquet")),
            Some(DatasetFormat::Parquet)
        );
        assert_eq!(DatasetFormat::from_path(Path::new("README.md")), None);
        assert_eq!(DatasetFormat::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn in_memory_source_returns_its_rows() {
        let mut row = Row::new();
        row.insert("dialog".to_string(), json!("a __eou__ b"));
        let source = InMemoryDatasetSource::new("memory", vec![row.clone()]);
        assert_eq!(source.id(), "memory");
        assert_eq!(source.load_rows().unwrap(), vec![row]);
    }
}

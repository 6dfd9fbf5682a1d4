use std::io;

use thiserror::Error;

use crate::types::{DatasetId, SourceId};

/// Error type for dataset loading, configuration, and output persistence failures.
///
/// Row-level problems never surface here; the extractor skips those rows.
#[derive(Debug, Error)]
pub enum CalibrationError {
    /// Every load strategy failed; carries the last underlying cause.
    #[error("failed to load dataset '{dataset}'; last error: {last_error}")]
    DatasetUnavailable {
        dataset: DatasetId,
        last_error: String,
    },
    /// One loader could not read its input.
    #[error("data source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable { source_id: SourceId, reason: String },
    /// File extension or document shape has no reader.
    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),
    /// Invalid or incomplete run configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

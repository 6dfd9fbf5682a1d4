//! End-to-end preparation runs: load rows, extract, write the example file.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{CounselingPrepareConfig, DialoguePrepareConfig};
use crate::errors::CalibrationError;
use crate::extract::{ExtractionStats, ExtractionStrategy, RowExtractor};
use crate::output::write_examples;
use crate::source::{DatasetSource, LocalDatasetSource};

/// Outcome of one preparation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrepareReport {
    /// File the examples were written to.
    pub output: PathBuf,
    /// Extraction counters; `stats.examples` is the number of saved examples.
    pub stats: ExtractionStats,
}

/// Load every row from `source`, extract with `strategy`, and write the result to `output`.
pub fn prepare_from_source(
    source: &dyn DatasetSource,
    strategy: ExtractionStrategy,
    max_examples: i64,
    output: &Path,
) -> Result<PrepareReport, CalibrationError> {
    let rows = source.load_rows()?;
    let extraction = RowExtractor::new(strategy)
        .with_max_examples(max_examples)
        .extract_with_stats(&rows);
    write_examples(output, &extraction.examples)?;
    info!(
        "[calibration:prepare] saved {} examples from '{}' to {}",
        extraction.stats.examples,
        source.id(),
        output.display()
    );
    Ok(PrepareReport {
        output: output.to_path_buf(),
        stats: extraction.stats,
    })
}

/// Prepare multi-turn examples from a local DailyDialog-style download.
pub fn prepare_dialogue(config: &DialoguePrepareConfig) -> Result<PrepareReport, CalibrationError> {
    let source = LocalDatasetSource::new(config.dataset_id.clone(), config.dataset_root.clone())
        .with_candidates(config.file_candidates.iter().cloned())
        .with_excluded([config.output.clone()]);
    prepare_from_source(
        &source,
        ExtractionStrategy::multi_turn(),
        config.max_examples,
        &config.output,
    )
}

/// Prepare Q/A examples from a local directory, or from the Hub when no directory is set.
pub fn prepare_counseling(
    config: &CounselingPrepareConfig,
) -> Result<PrepareReport, CalibrationError> {
    let source = counseling_source(config)?;
    prepare_from_source(
        &*source,
        ExtractionStrategy::question_answer(),
        config.max_examples,
        &config.output,
    )
}

fn counseling_source(
    config: &CounselingPrepareConfig,
) -> Result<Box<dyn DatasetSource>, CalibrationError> {
    if let Some(root) = &config.dataset_root {
        return Ok(Box::new(
            LocalDatasetSource::new(config.dataset_id.clone(), root.clone())
                .with_candidates(config.local_candidates())
                .with_excluded([config.output.clone()]),
        ));
    }
    hub_source(config)
}

#[cfg(feature = "huggingface")]
fn hub_source(config: &CounselingPrepareConfig) -> Result<Box<dyn DatasetSource>, CalibrationError> {
    use crate::source::HuggingFaceDatasetSource;

    let token = std::env::var("HF_TOKEN").ok().filter(|token| !token.is_empty());
    Ok(Box::new(
        HuggingFaceDatasetSource::new(config.dataset_id.clone(), config.split.clone())
            .with_token(token),
    ))
}

#[cfg(not(feature = "huggingface"))]
fn hub_source(config: &CounselingPrepareConfig) -> Result<Box<dyn DatasetSource>, CalibrationError> {
    Err(CalibrationError::Configuration(format!(
        "fetching '{}' from the Hugging Face Hub requires the `huggingface` feature; pass a local dataset root instead",
        config.dataset_id
    )))
}

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use super::{DatasetSource, read_dataset_file};
use crate::constants::source::LOCAL_SOURCE_ID;
use crate::data::Row;
use crate::errors::CalibrationError;
use crate::transport::fs::DatasetFileScan;
use crate::types::{CandidatePath, DatasetId};

/// Dataset stored under a local directory, loaded from the first candidate file that works.
#[derive(Clone, Debug)]
pub struct LocalDatasetSource {
    dataset_id: DatasetId,
    root: PathBuf,
    candidates: Vec<CandidatePath>,
    excluded: Vec<PathBuf>,
}

impl LocalDatasetSource {
    /// Create a source that auto-detects its file under `root`.
    pub fn new(dataset_id: impl Into<DatasetId>, root: impl Into<PathBuf>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            root: root.into(),
            candidates: vec![String::new()],
            excluded: Vec::new(),
        }
    }

    /// Replace the root-relative candidates. An empty entry auto-detects.
    pub fn with_candidates<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CandidatePath>,
    {
        self.candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    /// Files auto-detection must never pick, such as a previous run's output.
    pub fn with_excluded<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.excluded = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Candidates in the order they are tried.
    pub fn candidates(&self) -> &[CandidatePath] {
        &self.candidates
    }

    /// Expand a candidate into the concrete files to try, in order.
    fn resolve(&self, candidate: &str) -> Vec<Result<PathBuf, CalibrationError>> {
        if candidate.trim().is_empty() {
            let files = self.scanned_files();
            if files.is_empty() {
                return vec![Err(CalibrationError::SourceUnavailable {
                    source_id: LOCAL_SOURCE_ID.to_string(),
                    reason: format!("no dataset files found under {}", self.root.display()),
                })];
            }
            return files.into_iter().map(Ok).collect();
        }
        let path = self.root.join(candidate);
        if !path.is_file() {
            return vec![Err(CalibrationError::SourceUnavailable {
                source_id: LOCAL_SOURCE_ID.to_string(),
                reason: format!("{} does not exist", path.display()),
            })];
        }
        vec![Ok(path)]
    }

    fn scanned_files(&self) -> Vec<PathBuf> {
        let excluded: Vec<PathBuf> = self
            .excluded
            .iter()
            .filter_map(|path| fs::canonicalize(path).ok())
            .collect();
        DatasetFileScan::new(&self.root)
            .dataset_files()
            .into_iter()
            .filter(|path| !fs::canonicalize(path).is_ok_and(|resolved| excluded.contains(&resolved)))
            .collect()
    }
}

impl DatasetSource for LocalDatasetSource {
    fn id(&self) -> &str {
        &self.dataset_id
    }

    fn load_rows(&self) -> Result<Vec<Row>, CalibrationError> {
        let mut last_error = None;
        for candidate in &self.candidates {
            for attempt in self.resolve(candidate) {
                let loaded =
                    attempt.and_then(|path| read_dataset_file(&path).map(|rows| (path, rows)));
                match loaded {
                    Ok((path, rows)) => {
                        info!(
                            "[calibration:local] loaded dataset using file path: '{}' ({} rows from {})",
                            candidate,
                            rows.len(),
                            path.display()
                        );
                        if rows.is_empty() {
                            warn!(
                                "[calibration:local] dataset '{}' loaded zero rows",
                                self.dataset_id
                            );
                        }
                        return Ok(rows);
                    }
                    Err(err) => {
                        warn!(
                            "[calibration:local] candidate '{}' failed for dataset '{}': {err}",
                            candidate, self.dataset_id
                        );
                        last_error = Some(err);
                    }
                }
            }
        }
        Err(CalibrationError::DatasetUnavailable {
            dataset: self.dataset_id.clone(),
            last_error: last_error
                .map(|err| err.to_string())
                .unwrap_or_else(|| "no candidate file paths configured".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn first_loadable_candidate_wins() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("data.csv"), "dialog\n\"a __eou__ b\"\n").unwrap();
        fs::write(temp.path().join("dailydialog.csv"), "dialog\nx\ny\n").unwrap();

        let source = LocalDatasetSource::new("daily", temp.path())
            .with_candidates(["DailyDialog.csv", "data.csv", "dailydialog.csv"]);
        let rows = source.load_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["dialog"], serde_json::json!("a __eou__ b"));
    }

    #[test]
    fn unreadable_candidates_fall_through() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("broken.json"), "{oops").unwrap();
        fs::write(temp.path().join("rows.jsonl"), "{\"text\": \"ok\"}\n").unwrap();

        let source = LocalDatasetSource::new("mixed", temp.path())
            .with_candidates(["broken.json", "rows.jsonl"]);
        assert_eq!(source.load_rows().unwrap().len(), 1);
    }

    #[test]
    fn empty_candidate_auto_detects_dataset_files() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("notes.txt"), "skip me").unwrap();
        fs::write(temp.path().join("train.jsonl"), "{\"text\": \"one\"}\n{\"text\": \"two\"}\n").unwrap();

        let source = LocalDatasetSource::new("auto", temp.path());
        assert_eq!(source.candidates(), &[String::new()]);
        assert_eq!(source.load_rows().unwrap().len(), 2);
    }

    #[test]
    fn auto_detect_moves_past_unreadable_files() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a_broken.json"), "{oops").unwrap();
        fs::write(temp.path().join("b_rows.jsonl"), "{\"text\": \"ok\"}\n").unwrap();

        let rows = LocalDatasetSource::new("auto", temp.path()).load_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["text"], serde_json::json!("ok"));
    }

    #[test]
    fn auto_detect_skips_excluded_output_files() {
        let temp = tempdir().unwrap();
        let output = temp.path().join("a_examples.json");
        fs::write(&output, r#"[{"user": "u", "assistant": "a", "intent": "", "emotion": ""}]"#)
            .unwrap();
        fs::write(temp.path().join("b_dialogs.csv"), "dialog\n\"x __eou__ y\"\n").unwrap();

        let rows = LocalDatasetSource::new("auto", temp.path())
            .with_excluded([output])
            .load_rows()
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains_key("dialog"));
    }

    #[test]
    fn auto_detect_with_only_broken_files_is_a_dataset_failure() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.json"), "{oops").unwrap();
        fs::write(temp.path().join("b.json"), "[1, 2").unwrap();

        let err = LocalDatasetSource::new("broken", temp.path()).load_rows().unwrap_err();
        assert!(matches!(err, CalibrationError::DatasetUnavailable { .. }));
    }

    #[test]
    fn all_candidates_failing_reports_the_last_cause() {
        let temp = tempdir().unwrap();
        let source = LocalDatasetSource::new("missing", temp.path())
            .with_candidates(["first.csv", "second.csv"]);
        let err = source.load_rows().unwrap_err();
        match err {
            CalibrationError::DatasetUnavailable { dataset, last_error } => {
                assert_eq!(dataset, "missing");
                assert!(last_error.contains("second.csv"));
                assert!(!last_error.contains("first.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_candidates_is_a_dataset_failure() {
        let temp = tempdir().unwrap();
        let source =
            LocalDatasetSource::new("none", temp.path()).with_candidates(Vec::<String>::new());
        assert!(matches!(
            source.load_rows().unwrap_err(),
            CalibrationError::DatasetUnavailable { .. }
        ));
    }
}

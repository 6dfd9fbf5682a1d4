use std::path::PathBuf;

use crate::constants::prepare;
use crate::types::{CandidatePath, DatasetId};

/// Translate a caller-supplied example cap: `0` or negative means unlimited.
pub fn example_limit(max_examples: i64) -> Option<usize> {
    if max_examples <= 0 {
        None
    } else {
        Some(usize::try_from(max_examples).unwrap_or(usize::MAX))
    }
}

/// Settings for preparing multi-turn DailyDialog-style examples.
#[derive(Clone, Debug)]
pub struct DialoguePrepareConfig {
    /// Dataset identifier used in logs and errors.
    pub dataset_id: DatasetId,
    /// Directory holding the downloaded dataset files.
    pub dataset_root: PathBuf,
    /// Root-relative files tried in order; an empty entry auto-detects.
    pub file_candidates: Vec<CandidatePath>,
    /// Example cap; `0` or negative exports everything.
    pub max_examples: i64,
    /// Output JSON path.
    pub output: PathBuf,
}

impl DialoguePrepareConfig {
    /// Replace the candidate list with one explicit file when `file_path` is non-empty.
    pub fn with_file_path(mut self, file_path: impl Into<CandidatePath>) -> Self {
        let file_path = file_path.into();
        if !file_path.trim().is_empty() {
            self.file_candidates = vec![file_path];
        }
        self
    }

    /// Effective example cap.
    pub fn limit(&self) -> Option<usize> {
        example_limit(self.max_examples)
    }
}

impl Default for DialoguePrepareConfig {
    fn default() -> Self {
        Self {
            dataset_id: prepare::DAILYDIALOG_DATASET_ID.to_string(),
            dataset_root: PathBuf::from(prepare::DAILYDIALOG_DATASET_ROOT),
            file_candidates: prepare::DAILYDIALOG_FILE_CANDIDATES
                .iter()
                .map(|candidate| candidate.to_string())
                .collect(),
            max_examples: prepare::DAILYDIALOG_MAX_EXAMPLES,
            output: PathBuf::from(prepare::DAILYDIALOG_OUTPUT),
        }
    }
}

/// Settings for preparing single-turn counseling Q/A examples.
#[derive(Clone, Debug)]
pub struct CounselingPrepareConfig {
    /// Hugging Face dataset id.
    pub dataset_id: DatasetId,
    /// Split name, e.g. `train`.
    pub split: String,
    /// Local directory with already-downloaded files. Takes precedence over the Hub.
    pub dataset_root: Option<PathBuf>,
    /// Example cap; `0` or negative exports everything.
    pub max_examples: i64,
    /// Output JSON path.
    pub output: PathBuf,
}

impl CounselingPrepareConfig {
    /// Effective example cap.
    pub fn limit(&self) -> Option<usize> {
        example_limit(self.max_examples)
    }

    /// Root-relative files tried in order when loading from `dataset_root`.
    pub fn local_candidates(&self) -> Vec<CandidatePath> {
        let split = self.split.trim();
        if split.is_empty() {
            return vec![String::new()];
        }
        vec![
            format!("{split}.jsonl"),
            format!("{split}.json"),
            format!("{split}.csv"),
            String::new(),
        ]
    }
}

impl Default for CounselingPrepareConfig {
    fn default() -> Self {
        Self {
            dataset_id: prepare::COUNSELING_DATASET_ID.to_string(),
            split: prepare::COUNSELING_SPLIT.to_string(),
            dataset_root: None,
            max_examples: prepare::COUNSELING_MAX_EXAMPLES,
            output: PathBuf::from(prepare::COUNSELING_OUTPUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_limit_treats_non_positive_as_unbounded() {
        assert_eq!(example_limit(0), None);
        assert_eq!(example_limit(-1), None);
        assert_eq!(example_limit(1), Some(1));
        assert_eq!(example_limit(2000), Some(2000));
    }

    #[test]
    fn dialogue_defaults_match_dailydialog_layout() {
        let config = DialoguePrepareConfig::default();
        assert_eq!(config.max_examples, 2000);
        assert_eq!(config.limit(), Some(2000));
        assert_eq!(
            config.file_candidates,
            vec!["DailyDialog.csv", "dailydialog.csv", "data.csv", ""]
        );
        assert_eq!(config.output, PathBuf::from("data/dailydialog_examples.json"));
    }

    #[test]
    fn explicit_file_path_replaces_candidates() {
        let config = DialoguePrepareConfig::default().with_file_path("train.jsonl");
        assert_eq!(config.file_candidates, vec!["train.jsonl"]);

        let untouched = DialoguePrepareConfig::default().with_file_path("  ");
        assert_eq!(untouched.file_candidates.len(), 4);
    }

    #[test]
    fn counseling_candidates_follow_split_then_auto_detect() {
        let config = CounselingPrepareConfig::default();
        assert_eq!(config.dataset_id, "Amod/mental_health_counseling_conversations");
        assert_eq!(config.limit(), Some(3000));
        assert_eq!(
            config.local_candidates(),
            vec!["train.jsonl", "train.json", "train.csv", ""]
        );

        let no_split = CounselingPrepareConfig {
            split: String::new(),
            ..CounselingPrepareConfig::default()
        };
        assert_eq!(no_split.local_candidates(), vec![""]);
    }
}

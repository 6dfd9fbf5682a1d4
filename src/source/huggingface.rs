use std::ffi::OsStr;
use std::path::Path;

use hf_hub::api::sync::{ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};
use tracing::{info, warn};

use super::{DatasetFormat, DatasetSource, read_dataset_file};
use crate::constants::source::{HUGGINGFACE_RETRIES, HUGGINGFACE_SOURCE_ID};
use crate::data::Row;
use crate::errors::CalibrationError;
use crate::types::DatasetId;

/// Dataset split fetched from the Hugging Face Hub through the hf-hub cache.
#[derive(Clone, Debug)]
pub struct HuggingFaceDatasetSource {
    dataset_id: DatasetId,
    split: String,
    token: Option<String>,
}

impl HuggingFaceDatasetSource {
    /// Create a source for `dataset_id` and `split` (e.g. `train`).
    pub fn new(dataset_id: impl Into<DatasetId>, split: impl Into<String>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            split: split.into(),
            token: None,
        }
    }

    /// Use an access token for gated or private datasets.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn unavailable(reason: String) -> CalibrationError {
        CalibrationError::SourceUnavailable {
            source_id: HUGGINGFACE_SOURCE_ID.to_string(),
            reason,
        }
    }

    fn repo_api(&self) -> Result<ApiRepo, CalibrationError> {
        let api = ApiBuilder::new()
            .with_progress(true)
            .with_retries(HUGGINGFACE_RETRIES)
            .with_token(self.token.clone())
            .build()
            .map_err(|err| Self::unavailable(format!("failed building hf-hub client: {err}")))?;
        Ok(api.repo(Repo::new(self.dataset_id.clone(), RepoType::Dataset)))
    }

    fn remote_siblings(&self, repo_api: &ApiRepo) -> Result<Vec<String>, CalibrationError> {
        info!(
            "[calibration:hf] reading remote file list for dataset {}",
            self.dataset_id
        );
        let repo_info = repo_api
            .info()
            .map_err(|err| Self::unavailable(format!("failed reading hf-hub repository info: {err}")))?;
        Ok(repo_info
            .siblings
            .into_iter()
            .map(|sibling| sibling.rfilename)
            .collect())
    }

    fn fetch(&self, repo_api: &ApiRepo, remote_path: &str) -> Result<Vec<Row>, CalibrationError> {
        let local_path = repo_api.get(remote_path).map_err(|err| {
            Self::unavailable(format!("failed downloading '{remote_path}' from hf-hub: {err}"))
        })?;
        let rows = read_dataset_file(&local_path)?;
        info!(
            "[calibration:hf] loaded {} rows from {}/{}",
            rows.len(),
            self.dataset_id,
            remote_path
        );
        Ok(rows)
    }

    /// Concatenate every shard of the split; one failing shard fails the load.
    fn load_shards(&self, repo_api: &ApiRepo, shards: &[String]) -> Result<Vec<Row>, CalibrationError> {
        let mut rows = Vec::new();
        for remote_path in shards {
            rows.extend(self.fetch(repo_api, remote_path)?);
        }
        Ok(rows)
    }

    fn load_first(&self, repo_api: &ApiRepo, files: &[String]) -> Result<Vec<Row>, String> {
        let mut last_error = None;
        for remote_path in files {
            match self.fetch(repo_api, remote_path) {
                Ok(rows) => return Ok(rows),
                Err(err) => {
                    warn!("[calibration:hf] candidate '{remote_path}' failed: {err}");
                    last_error = Some(err.to_string());
                }
            }
        }
        Err(last_error.unwrap_or_else(|| format!("no loadable files for split '{}'", self.split)))
    }
}

impl DatasetSource for HuggingFaceDatasetSource {
    fn id(&self) -> &str {
        &self.dataset_id
    }

    fn load_rows(&self) -> Result<Vec<Row>, CalibrationError> {
        let dataset_failure = |last_error: String| CalibrationError::DatasetUnavailable {
            dataset: self.dataset_id.clone(),
            last_error,
        };
        let repo_api = self
            .repo_api()
            .map_err(|err| dataset_failure(err.to_string()))?;
        let siblings = self
            .remote_siblings(&repo_api)
            .map_err(|err| dataset_failure(err.to_string()))?;

        match resolve_remote_candidates_from_siblings(&siblings, &self.split) {
            RemoteFiles::Split(shards) => {
                info!(
                    "[calibration:hf] split '{}' of {} has {} shard(s)",
                    self.split,
                    self.dataset_id,
                    shards.len()
                );
                self.load_shards(&repo_api, &shards)
                    .map_err(|err| dataset_failure(err.to_string()))
            }
            RemoteFiles::Fallback(files) => {
                warn!(
                    "[calibration:hf] no files named for split '{}' in {}; using the first loadable file",
                    self.split, self.dataset_id
                );
                self.load_first(&repo_api, &files).map_err(dataset_failure)
            }
        }
    }
}

/// Remote files chosen for one split.
#[derive(Clone, Debug, PartialEq, Eq)]
enum RemoteFiles {
    /// Shards named for the split, sorted; together they form the split.
    Split(Vec<String>),
    /// Nothing is named for the split; loadable files to try one at a time, sorted.
    Fallback(Vec<String>),
}

fn resolve_remote_candidates_from_siblings(siblings: &[String], split: &str) -> RemoteFiles {
    let (mut matching, mut rest): (Vec<String>, Vec<String>) = siblings
        .iter()
        .filter(|name| DatasetFormat::from_path(Path::new(name.as_str())).is_some())
        .cloned()
        .partition(|name| split_matches(name, split));
    if matching.is_empty() {
        rest.sort();
        return RemoteFiles::Fallback(rest);
    }
    matching.sort();
    RemoteFiles::Split(matching)
}

/// True when a repository path names `split` as a directory, a file stem, or a shard prefix.
fn split_matches(remote_path: &str, split: &str) -> bool {
    if split.is_empty() {
        return true;
    }
    let path = Path::new(remote_path);
    let in_split_dir = path.parent().is_some_and(|parent| {
        parent
            .components()
            .any(|component| component.as_os_str() == OsStr::new(split))
    });
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(remote_path);
    in_split_dir
        || file_name.contains(&format!("-{split}-"))
        || file_name.starts_with(&format!("{split}-"))
        || file_name.starts_with(&format!("{split}."))
}

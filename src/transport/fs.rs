use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::source::DatasetFormat;

/// Filesystem transport that discovers loadable dataset files under a root.
pub struct DatasetFileScan {
    root: PathBuf,
}

impl DatasetFileScan {
    /// Create a scan rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// All files with a supported dataset extension, in sorted path order.
    pub fn dataset_files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_dataset_file(path))
            .collect()
    }
}

/// True if the path has an extension some loader understands.
pub fn is_dataset_file(path: &Path) -> bool {
    DatasetFormat::from_path(path).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn scan_returns_supported_files_in_sorted_order() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("README.md"), "docs").unwrap();
        fs::write(root.join("b.jsonl"), "{}").unwrap();
        fs::write(root.join("a.csv"), "x\n1\n").unwrap();
        fs::write(root.join("nested").join("c.JSON"), "[]").unwrap();

        let found = DatasetFileScan::new(root).dataset_files();
        let names: Vec<String> = found
            .iter()
            .map(|path| path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.csv", "b.jsonl", "nested/c.JSON"]);
        assert_eq!(found[0], root.join("a.csv"));
    }

    #[test]
    fn scan_of_missing_root_is_empty() {
        let temp = tempdir().unwrap();
        let scan = DatasetFileScan::new(temp.path().join("absent"));
        assert!(scan.dataset_files().is_empty());
        assert!(!is_dataset_file(Path::new("notes.txt")));
    }
}

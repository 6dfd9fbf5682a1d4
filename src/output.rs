//! On-disk example collections.
//!
//! The file is a UTF-8 JSON array of `{user, assistant, intent, emotion}`
//! objects, indented by two spaces, with non-ASCII text written verbatim and
//! no trailing newline.

use std::fs;
use std::path::Path;

use crate::data::CanonicalExample;
use crate::errors::CalibrationError;

/// Render examples in the on-disk JSON layout.
pub fn to_json_string(examples: &[CanonicalExample]) -> Result<String, CalibrationError> {
    Ok(serde_json::to_string_pretty(examples)?)
}

/// Parse examples from the on-disk JSON layout.
pub fn from_json_str(raw: &str) -> Result<Vec<CanonicalExample>, CalibrationError> {
    Ok(serde_json::from_str(raw)?)
}

/// Write examples to `path`, creating parent directories as needed.
pub fn write_examples(path: &Path, examples: &[CanonicalExample]) -> Result<(), CalibrationError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json_string(examples)?)?;
    Ok(())
}

/// Read a previously written example file.
pub fn read_examples(path: &Path) -> Result<Vec<CanonicalExample>, CalibrationError> {
    from_json_str(&fs::read_to_string(path)?)
}

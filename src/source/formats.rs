use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use super::DatasetFormat;
use crate::constants::source::{JSON_ROW_ARRAY_KEYS, JSON_ROW_KEY};
use crate::data::Row;
use crate::errors::CalibrationError;

/// Read every row of a dataset file, dispatching on its extension.
pub fn read_dataset_file(path: &Path) -> Result<Vec<Row>, CalibrationError> {
    let format = DatasetFormat::from_path(path).ok_or_else(|| {
        CalibrationError::UnsupportedFormat(format!(
            "no loader for {} (expected json, jsonl, ndjson, csv, or parquet)",
            path.display()
        ))
    })?;
    match format {
        DatasetFormat::Json => read_json(path),
        DatasetFormat::JsonLines => read_json_lines(path),
        DatasetFormat::Csv => read_csv(path),
        DatasetFormat::Parquet => read_parquet(path),
    }
}

/// Read a JSON document of rows.
///
/// Accepts a top-level array, or an object wrapping the array under `rows`
/// or `data`. Files named `.json` that actually hold one object per line are
/// read as JSON lines.
pub fn read_json(path: &Path) -> Result<Vec<Row>, CalibrationError> {
    let raw = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&raw) {
        Ok(document) => rows_from_document(path, document),
        Err(document_err) => parse_json_lines(path, &raw).map_err(|_| document_err.into()),
    }
}

/// Read one JSON row object per non-blank line.
pub fn read_json_lines(path: &Path) -> Result<Vec<Row>, CalibrationError> {
    let raw = fs::read_to_string(path)?;
    parse_json_lines(path, &raw)
}

/// Read a CSV table; header names become field names and every cell is a string.
pub fn read_csv(path: &Path) -> Result<Vec<Row>, CalibrationError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name.to_string(), Value::String(cell.to_string())))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(feature = "huggingface")]
/// Read every row of a parquet shard as JSON objects.
pub fn read_parquet(path: &Path) -> Result<Vec<Row>, CalibrationError> {
    use parquet::file::reader::{FileReader, SerializedFileReader};

    let unavailable = |reason: String| CalibrationError::SourceUnavailable {
        source_id: path.display().to_string(),
        reason,
    };
    let file = fs::File::open(path)?;
    let reader = SerializedFileReader::new(file)
        .map_err(|err| unavailable(format!("failed reading parquet shard: {err}")))?;
    let iter = reader
        .get_row_iter(None)
        .map_err(|err| unavailable(format!("failed iterating parquet shard: {err}")))?;

    let mut rows = Vec::new();
    for (position, row) in iter.enumerate() {
        let row = row.map_err(|err| unavailable(format!("failed reading parquet row {position}: {err}")))?;
        match row_object(row.to_json_value()) {
            Some(row) => rows.push(row),
            None => warn!(
                "[calibration:formats] skipping non-object parquet row {position} in {}",
                path.display()
            ),
        }
    }
    Ok(rows)
}

#[cfg(not(feature = "huggingface"))]
/// Parquet needs the `huggingface` feature.
pub fn read_parquet(path: &Path) -> Result<Vec<Row>, CalibrationError> {
    Err(CalibrationError::UnsupportedFormat(format!(
        "{} is parquet; rebuild with the `huggingface` feature to read it",
        path.display()
    )))
}

fn rows_from_document(path: &Path, document: Value) -> Result<Vec<Row>, CalibrationError> {
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut object) => JSON_ROW_ARRAY_KEYS
            .iter()
            .find_map(|key| match object.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| {
                CalibrationError::UnsupportedFormat(format!(
                    "{} is a JSON object without a `rows` or `data` array",
                    path.display()
                ))
            })?,
        _ => {
            return Err(CalibrationError::UnsupportedFormat(format!(
                "{} does not hold a JSON array of rows",
                path.display()
            )));
        }
    };
    Ok(collect_rows(path, items))
}

fn parse_json_lines(path: &Path, raw: &str) -> Result<Vec<Row>, CalibrationError> {
    let mut items = Vec::new();
    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        items.push(serde_json::from_str::<Value>(line)?);
    }
    Ok(collect_rows(path, items))
}

fn collect_rows(path: &Path, items: Vec<Value>) -> Vec<Row> {
    let total = items.len();
    let rows: Vec<Row> = items.into_iter().filter_map(row_object).collect();
    if rows.len() < total {
        warn!(
            "[calibration:formats] skipped {} non-object entries in {}",
            total - rows.len(),
            path.display()
        );
    }
    rows
}

/// Unwrap a row object, including datasets-server `{"row": {...}}` envelopes.
fn row_object(value: Value) -> Option<Row> {
    let Value::Object(mut object) = value else {
        return None;
    };
    if matches!(object.get(JSON_ROW_KEY), Some(Value::Object(_)))
        && let Some(Value::Object(inner)) = object.remove(JSON_ROW_KEY)
    {
        return Some(inner.into_iter().collect());
    }
    Some(object.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn json_arrays_and_envelopes_are_read() {
        let temp = tempdir().unwrap();
        let array = temp.path().join("rows.json");
        fs::write(&array, r#"[{"dialog": ["a", "b"]}, 7, {"row": {"Context": "c"}}]"#).unwrap();
        let rows = read_dataset_file(&array).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["dialog"], json!(["a", "b"]));
        assert_eq!(rows[1]["Context"], json!("c"));

        let envelope = temp.path().join("envelope.json");
        fs::write(&envelope, r#"{"data": [{"text": "x"}]}"#).unwrap();
        assert_eq!(read_dataset_file(&envelope).unwrap().len(), 1);
    }

    #[test]
    fn json_files_holding_json_lines_fall_back_to_line_parsing() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("combined_dataset.json");
        fs::write(
            &path,
            "{\"Context\": \"one\", \"Response\": \"r1\"}\n\n{\"Context\": \"two\", \"Response\": \"r2\"}\n",
        )
        .unwrap();
        let rows = read_dataset_file(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["Context"], json!("two"));
    }

    #[test]
    fn malformed_json_reports_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            read_dataset_file(&path).unwrap_err(),
            CalibrationError::Json(_)
        ));

        let scalar = temp.path().join("scalar.json");
        fs::write(&scalar, "42").unwrap();
        assert!(matches!(
            read_dataset_file(&scalar).unwrap_err(),
            CalibrationError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn csv_headers_name_string_fields_in_column_order() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("DailyDialog.csv");
        fs::write(
            &path,
            "dialog,act,emotion\n\"Hi __eou__ Hello\",\"[1, 2]\",\"[0, 0]\"\n",
        )
        .unwrap();
        let rows = read_dataset_file(&path).unwrap();
        assert_eq!(rows.len(), 1);
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, vec!["dialog", "act", "emotion"]);
        assert_eq!(rows[0]["dialog"], json!("Hi __eou__ Hello"));
        assert_eq!(rows[0]["act"], json!("[1, 2]"));
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        let err = read_dataset_file(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, CalibrationError::UnsupportedFormat(msg) if msg.contains("notes.txt")));
    }
}

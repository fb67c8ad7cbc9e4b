// File: src/persistence.rs
use crate::core::types::GradeReport;
use crate::error::GradeError;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads the expected list: a non-empty JSON array of strings.
pub fn load_expected(path: &Path) -> Result<Vec<String>, GradeError> {
    let file = File::open(path)?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    expected_from_value(value)
}

/// Parses the `expected` form field the way the upload endpoint receives it.
pub fn parse_expected(raw: &str) -> Result<Vec<String>, GradeError> {
    let value: Value = serde_json::from_str(if raw.trim().is_empty() { "[]" } else { raw })?;
    expected_from_value(value)
}

fn expected_from_value(value: Value) -> Result<Vec<String>, GradeError> {
    let entries = match value {
        Value::Array(entries) => entries,
        _ => return Err(GradeError::MissingData("expected list must be a JSON array".into())),
    };
    if entries.is_empty() {
        return Err(GradeError::MissingData("expected list is empty".into()));
    }
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            Value::String(sentence) => Ok(sentence),
            _ => Err(GradeError::MissingData(format!("entry {} is not a string", i + 1))),
        })
        .collect()
}

/// Writes the report next to its final location, then renames it into place.
pub fn save_report(report: &GradeReport, path: &Path) -> Result<(), GradeError> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| GradeError::Io(e.error))?;
    Ok(())
}

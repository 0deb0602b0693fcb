//! JSON serialization of records

use crate::model::PageRecord;
use crate::output::OutputResult;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Pretty-printed JSON for any record
pub fn to_json_string<T: Serialize>(value: &T) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes a record as pretty-printed JSON
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> OutputResult<()> {
    fs::write(path, to_json_string(value)?)?;
    Ok(())
}

/// Reads a page record previously written with [`write_json`]
pub fn read_page(path: &Path) -> OutputResult<PageRecord> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

//! Input record files for the CLI.

use serde::Deserialize;
use std::path::Path;
use uploadpost_builder::FileBinaries;
use uploadpost_client::InputRecord;
use uploadpost_core::Fields;
use uploadpost_error::{ConfigError, ConfigErrorKind};

/// One record as written in a records file.
///
/// Every key except `binary` is a field value. `binary` maps property names
/// to files on disk:
///
/// ```json
/// [{
///   "operation": "uploadVideo",
///   "user": "alice",
///   "title": "Launch",
///   "platform": ["tiktok", "youtube"],
///   "video": "data",
///   "binary": { "data": { "path": "clip.mp4", "mimeType": "video/mp4" } }
/// }]
/// ```
#[derive(Debug, Deserialize)]
struct RecordEntry {
    #[serde(default)]
    binary: FileBinaries,
    #[serde(flatten)]
    fields: Fields,
}

/// Parse records from JSON text: an array of records or a single record.
///
/// # Errors
///
/// Returns error if the text is not a record or array of records.
#[track_caller]
pub fn parse_records(contents: &str) -> Result<Vec<InputRecord>, ConfigError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<RecordEntry>),
        One(RecordEntry),
    }

    let entries = match serde_json::from_str(contents)
        .map_err(|e| ConfigError::new(ConfigErrorKind::InvalidRecords(e.to_string())))?
    {
        OneOrMany::Many(entries) => entries,
        OneOrMany::One(entry) => vec![entry],
    };
    Ok(entries
        .into_iter()
        .map(|entry| InputRecord::new(entry.fields).with_binaries(entry.binary))
        .collect())
}

/// Read records from a JSON file.
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed.
#[track_caller]
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<InputRecord>, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::new(ConfigErrorKind::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    })?;
    parse_records(&contents)
}

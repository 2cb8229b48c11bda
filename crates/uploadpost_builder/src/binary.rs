//! Binary attachment resolution supplied by the host runtime.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, instrument};
use uploadpost_core::Attachment;
use uploadpost_error::{BinaryError, BinaryErrorKind};

/// Resolves a logical binary property name to file contents.
///
/// Failures are reported to the builder, which logs them and omits the field.
pub trait BinaryResolver: Send + Sync {
    /// Look up the attachment registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when nothing is registered under the name or the
    /// contents cannot be read.
    fn resolve(&self, name: &str) -> Result<Attachment, BinaryError>;
}

/// Resolver for records that carry no binary data.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBinaries;

impl BinaryResolver for NoBinaries {
    fn resolve(&self, name: &str) -> Result<Attachment, BinaryError> {
        Err(BinaryError::new(BinaryErrorKind::NotFound(name.to_string())))
    }
}

/// Resolver backed by attachments already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBinaries {
    files: HashMap<String, Attachment>,
}

impl InMemoryBinaries {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attachment under a property name.
    pub fn with(mut self, name: impl Into<String>, attachment: Attachment) -> Self {
        self.files.insert(name.into(), attachment);
        self
    }

    /// Register an attachment in place.
    pub fn insert(&mut self, name: impl Into<String>, attachment: Attachment) {
        self.files.insert(name.into(), attachment);
    }
}

impl BinaryResolver for InMemoryBinaries {
    fn resolve(&self, name: &str) -> Result<Attachment, BinaryError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| BinaryError::new(BinaryErrorKind::NotFound(name.to_string())))
    }
}

/// Where a file-backed binary property lives on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileBinary {
    /// Path to the file
    pub path: PathBuf,
    /// File name to send; defaults to the property name
    #[serde(default)]
    pub file_name: Option<String>,
    /// MIME type to send
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Resolver that reads binary properties from files on demand.
///
/// Deserializes from a map of property name to `{ path, fileName, mimeType }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FileBinaries {
    entries: HashMap<String, FileBinary>,
}

impl FileBinaries {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file under a property name.
    pub fn with(mut self, name: impl Into<String>, binary: FileBinary) -> Self {
        self.entries.insert(name.into(), binary);
        self
    }
}

impl BinaryResolver for FileBinaries {
    #[instrument(skip(self))]
    fn resolve(&self, name: &str) -> Result<Attachment, BinaryError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| BinaryError::new(BinaryErrorKind::NotFound(name.to_string())))?;
        let bytes = std::fs::read(&entry.path).map_err(|e| {
            BinaryError::new(BinaryErrorKind::Io {
                name: name.to_string(),
                message: e.to_string(),
            })
        })?;
        debug!(path = %entry.path.display(), size = bytes.len(), "Read binary property");
        let file_name = entry.file_name.clone().unwrap_or_else(|| name.to_string());
        Ok(Attachment::new(bytes, file_name, entry.mime_type.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn in_memory_resolves_registered_names() {
        let binaries = InMemoryBinaries::new().with(
            "data",
            Attachment::new(vec![7], "a.png", Some("image/png".to_string())),
        );
        assert_eq!(binaries.resolve("data").unwrap().filename(), "a.png");
        let err = binaries.resolve("other").unwrap_err();
        assert!(matches!(err.kind(), BinaryErrorKind::NotFound(n) if n == "other"));
    }

    #[test]
    fn file_binaries_read_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"frame").unwrap();

        let binaries = FileBinaries::new().with(
            "video",
            FileBinary {
                path: file.path().to_path_buf(),
                file_name: None,
                mime_type: Some("video/mp4".to_string()),
            },
        );
        let attachment = binaries.resolve("video").unwrap();
        assert_eq!(attachment.bytes(), b"frame");
        assert_eq!(attachment.filename(), "video");
        assert_eq!(attachment.content_type().as_deref(), Some("video/mp4"));
    }

    #[test]
    fn file_binaries_report_io_failures() {
        let binaries = FileBinaries::new().with(
            "gone",
            FileBinary {
                path: PathBuf::from("/definitely/not/here.bin"),
                file_name: Some("here.bin".to_string()),
                mime_type: None,
            },
        );
        let err = binaries.resolve("gone").unwrap_err();
        assert!(matches!(err.kind(), BinaryErrorKind::Io { name, .. } if name == "gone"));
    }

    #[test]
    fn file_binaries_deserialize_from_record_shape() {
        let binaries: FileBinaries = serde_json::from_value(serde_json::json!({
            "data": { "path": "/tmp/x.jpg", "fileName": "x.jpg", "mimeType": "image/jpeg" }
        }))
        .unwrap();
        assert!(binaries.entries.contains_key("data"));
    }
}

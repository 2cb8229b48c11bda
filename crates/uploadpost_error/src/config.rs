//! Configuration and input-file error types.

/// Ways loading configuration or record files can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A file could not be read.
    #[display("Failed to read {}: {}", path, message)]
    Read {
        /// Path that was requested
        path: String,
        /// Underlying I/O error text
        message: String,
    },
    /// The configuration file is not valid TOML for the expected schema.
    #[display("Invalid TOML: {}", _0)]
    InvalidToml(String),
    /// A records file is not a JSON record or array of records.
    #[display("Invalid records JSON: {}", _0)]
    InvalidRecords(String),
    /// No usable API key is configured.
    #[display("No API key configured. Set UPLOAD_POST_API_KEY or api_key in the config file")]
    MissingApiKey,
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use uploadpost_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("UPLOAD_POST_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given kind at the current location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}

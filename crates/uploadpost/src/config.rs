//! Client configuration loaded from TOML.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};
use uploadpost_client::{DEFAULT_BASE_URL, PollSettings, UploadPostClient, UploadPostNode};
use uploadpost_core::Credentials;
use uploadpost_error::{ConfigError, ConfigErrorKind, UploadPostResult};

/// Top-level configuration.
///
/// ```toml
/// base_url = "https://api.upload-post.com/api"
/// api_key = "..."
/// request_timeout_seconds = 120
///
/// [polling]
/// interval_seconds = 10
/// timeout_seconds = 600
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(default, setter(into))]
pub struct UploadPostConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    base_url: String,
    /// API key; usually supplied through `UPLOAD_POST_API_KEY` instead
    #[serde(default)]
    #[builder(setter(into, strip_option))]
    api_key: Option<String>,
    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    request_timeout_seconds: u64,
    /// Completion polling defaults
    #[serde(default)]
    polling: PollingConfig,
}

impl Default for UploadPostConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            request_timeout_seconds: default_request_timeout(),
            polling: PollingConfig::default(),
        }
    }
}

/// Completion polling defaults, used when a record does not set its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PollingConfig {
    /// Seconds between status checks
    #[serde(default = "default_poll_interval")]
    interval_seconds: u64,
    /// Seconds before polling gives up
    #[serde(default = "default_poll_timeout")]
    timeout_seconds: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_poll_interval(),
            timeout_seconds: default_poll_timeout(),
        }
    }
}

impl From<PollingConfig> for PollSettings {
    fn from(config: PollingConfig) -> Self {
        PollSettings::new(config.interval_seconds, config.timeout_seconds)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    120
}

fn default_poll_interval() -> u64 {
    10
}

fn default_poll_timeout() -> u64 {
    600
}

impl UploadPostConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or TOML is invalid.
    #[track_caller]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is invalid.
    #[track_caller]
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::new(ConfigErrorKind::InvalidToml(e.to_string())))
    }

    /// Default config file location: `<config dir>/uploadpost/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("uploadpost").join("config.toml"))
    }

    /// Load from an explicit path, else the default location when it
    /// exists, else built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns error if a file that should be read cannot be parsed.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            debug!(path = %path.display(), "Loading configuration");
            return Self::from_file(path);
        }
        match Self::default_path().filter(|path| path.is_file()) {
            Some(path) => {
                debug!(path = %path.display(), "Loading default configuration");
                Self::from_file(path)
            }
            None => {
                debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Apply command-line or environment overrides.
    pub fn with_overrides(mut self, api_key: Option<String>, base_url: Option<String>) -> Self {
        if let Some(api_key) = api_key {
            self.api_key = Some(api_key);
        }
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        self
    }

    /// Stored credentials.
    ///
    /// # Errors
    ///
    /// Returns error when no API key is configured.
    #[track_caller]
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .map(Credentials::new)
            .ok_or_else(|| ConfigError::new(ConfigErrorKind::MissingApiKey))
    }

    /// Build an HTTP client from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error when the API key is missing or the client cannot be built.
    pub fn client(&self) -> UploadPostResult<UploadPostClient> {
        Ok(UploadPostClient::new(
            self.credentials()?,
            &self.base_url,
            Duration::from_secs(self.request_timeout_seconds),
        )?)
    }

    /// Build a record executor from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error when the client cannot be built.
    pub fn node(&self) -> UploadPostResult<UploadPostNode> {
        Ok(UploadPostNode::new(self.client()?, self.polling.into()))
    }
}

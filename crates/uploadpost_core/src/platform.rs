//! Destination platforms.

use serde::{Deserialize, Serialize};
use uploadpost_error::{ValidationError, ValidationErrorKind};

/// A social network the API can publish to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    /// Facebook pages
    Facebook,
    /// Instagram
    Instagram,
    /// LinkedIn profiles and organization pages
    Linkedin,
    /// Pinterest boards
    Pinterest,
    /// Reddit subreddits
    Reddit,
    /// Threads
    Threads,
    /// TikTok
    Tiktok,
    /// X (formerly Twitter)
    X,
    /// YouTube
    Youtube,
}

impl Platform {
    /// Parse a platform identifier, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::UnknownPlatform`] for identifiers outside
    /// the supported set.
    #[track_caller]
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        value
            .trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| ValidationError::new(ValidationErrorKind::UnknownPlatform(value.to_string())))
    }
}

//! Operations, HTTP methods, and payload containers.

use serde::{Deserialize, Serialize};
use uploadpost_error::{ValidationError, ValidationErrorKind};

/// A single supported API action.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    /// Upload one or more photos
    UploadPhotos,
    /// Upload a single video
    UploadVideo,
    /// Upload a text post
    UploadText,
    /// Check the status of an asynchronous upload
    GetStatus,
    /// List past uploads
    GetHistory,
    /// Aggregated analytics for a profile
    GetAnalytics,
    /// List scheduled posts
    ListScheduled,
    /// Cancel a scheduled post
    CancelScheduled,
    /// Change the date of a scheduled post
    EditScheduled,
    /// List profiles
    ListUsers,
    /// Create a profile
    CreateUser,
    /// Delete a profile
    DeleteUser,
    /// Generate a connection URL for a profile
    GenerateJwt,
    /// Validate a connection token
    ValidateJwt,
}

impl Operation {
    /// Parse an operation selector such as `uploadPhotos`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::UnknownOperation`] for unsupported selectors.
    #[track_caller]
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        value
            .trim()
            .parse()
            .map_err(|_| ValidationError::new(ValidationErrorKind::UnknownOperation(value.to_string())))
    }

    /// True for the three content-upload operations.
    pub fn is_upload(self) -> bool {
        matches!(
            self,
            Operation::UploadPhotos | Operation::UploadVideo | Operation::UploadText
        )
    }

    /// True when the operation needs the profile `user` field.
    pub fn needs_user(self) -> bool {
        self.is_upload() || self == Operation::GenerateJwt
    }
}

/// HTTP method of an outbound request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// DELETE
    Delete,
}

/// Which container carries the payload of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PayloadKind {
    /// JSON request body
    JsonBody,
    /// URL query string
    QueryString,
    /// multipart/form-data body
    MultipartForm,
}

//! Crate-level error wrapper.

use crate::{BinaryError, ConfigError, HttpError, ValidationError};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum UploadPostErrorKind {
    /// Field values violated a request precondition
    Validation(ValidationError),
    /// Outbound HTTP call failed
    Http(HttpError),
    /// Configuration could not be loaded
    Config(ConfigError),
    /// Binary attachment could not be resolved
    Binary(BinaryError),
}

impl std::fmt::Display for UploadPostErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadPostErrorKind::Validation(e) => write!(f, "{}", e),
            UploadPostErrorKind::Http(e) => write!(f, "{}", e),
            UploadPostErrorKind::Config(e) => write!(f, "{}", e),
            UploadPostErrorKind::Binary(e) => write!(f, "{}", e),
        }
    }
}

/// Upload-Post error with kind discrimination.
#[derive(Debug)]
pub struct UploadPostError(Box<UploadPostErrorKind>);

impl UploadPostError {
    /// Create a new error from a kind.
    pub fn new(kind: UploadPostErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &UploadPostErrorKind {
        &self.0
    }

    /// True when the error came from request validation.
    pub fn is_validation(&self) -> bool {
        matches!(*self.0, UploadPostErrorKind::Validation(_))
    }

    /// True when the error came from the HTTP transport.
    pub fn is_transport(&self) -> bool {
        matches!(*self.0, UploadPostErrorKind::Http(_))
    }
}

impl std::fmt::Display for UploadPostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Upload-Post Error: {}", self.0)
    }
}

impl std::error::Error for UploadPostError {}

impl<T> From<T> for UploadPostError
where
    T: Into<UploadPostErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Upload-Post operations.
pub type UploadPostResult<T> = std::result::Result<T, UploadPostError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HttpErrorKind, ValidationErrorKind};

    #[test]
    fn validation_error_converts_and_reports_kind() {
        let err: UploadPostError =
            ValidationError::new(ValidationErrorKind::MissingField("user".to_string())).into();
        assert!(err.is_validation());
        assert!(!err.is_transport());
        assert!(err.to_string().contains("Missing required field: user"));
    }

    #[test]
    fn http_error_converts_and_keeps_status() {
        let http = HttpError::new(HttpErrorKind::Status {
            status: 401,
            body: "unauthorized".to_string(),
        });
        assert_eq!(http.status(), Some(401));
        let err: UploadPostError = http.into();
        assert!(err.is_transport());
    }

    #[test]
    fn mutually_exclusive_names_every_field() {
        let kind = ValidationErrorKind::MutuallyExclusive {
            field: "X Poll Options".to_string(),
            conflicting: vec!["X Card URI".to_string(), "X Quote Tweet ID".to_string()],
        };
        let text = kind.to_string();
        assert!(text.contains("X Poll Options"));
        assert!(text.contains("X Card URI, X Quote Tweet ID"));
    }
}

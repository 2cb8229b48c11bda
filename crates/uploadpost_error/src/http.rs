//! HTTP transport error types.

/// Ways an outbound HTTP call can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HttpErrorKind {
    /// The request could not be sent or the connection failed.
    #[display("Request failed: {}", _0)]
    Request(String),
    /// The API answered with a non-success status code.
    #[display("API error (status {}): {}", status, body)]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body text
        body: String,
    },
    /// The response body was not valid JSON.
    #[display("Failed to decode response: {}", _0)]
    Decode(String),
}

/// HTTP error with source location.
///
/// # Examples
///
/// ```
/// use uploadpost_error::{HttpError, HttpErrorKind};
///
/// let err = HttpError::new(HttpErrorKind::Request("Connection refused".to_string()));
/// assert!(format!("{}", err).contains("Connection refused"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", kind, line, file)]
pub struct HttpError {
    /// The kind of error that occurred
    pub kind: HttpErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given kind at the current location.
    #[track_caller]
    pub fn new(kind: HttpErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HttpErrorKind {
        &self.kind
    }

    /// HTTP status code, when the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            HttpErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

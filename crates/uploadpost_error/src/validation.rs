//! Validation error types raised while building a request.

/// Ways a set of field values can fail request validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// A field was set together with fields it cannot be combined with.
    #[display(
        "{} cannot be used with: {}. These fields are mutually exclusive.",
        field,
        conflicting.join(", ")
    )]
    MutuallyExclusive {
        /// The field whose presence excludes the others
        field: String,
        /// Every conflicting field that was also set
        conflicting: Vec<String>,
    },
    /// Poll option count outside the accepted range.
    #[display("X Poll Options must contain between 2 and 4 non-empty options. Found: {}", found)]
    PollOptionCount {
        /// Number of non-empty options supplied
        found: usize,
    },
    /// One or more poll options exceed the per-option length limit.
    #[display("X Poll Options cannot exceed 25 characters each. Invalid options: {}", options.join(", "))]
    PollOptionTooLong {
        /// The offending options
        options: Vec<String>,
    },
    /// Poll duration outside the accepted range of minutes.
    #[display(
        "X Poll Duration must be between 5 and 10080 minutes (5 minutes to 7 days). Provided: {}",
        provided
    )]
    PollDuration {
        /// The duration that was supplied
        provided: i64,
    },
    /// A numeric index field was negative.
    #[display("{} must be zero or greater. Provided: {}", field, value)]
    NegativeIndex {
        /// Field name
        field: String,
        /// The value that was supplied
        value: i64,
    },
    /// A required field was absent or empty.
    #[display("Missing required field: {}", _0)]
    MissingField(String),
    /// A field held a value of the wrong shape.
    #[display("Invalid value for {}: {} ({})", field, value, reason)]
    InvalidField {
        /// Field name
        field: String,
        /// The value that was supplied
        value: String,
        /// Why it was rejected
        reason: String,
    },
    /// The operation selector did not name a supported operation.
    #[display("Unknown operation: {}", _0)]
    UnknownOperation(String),
    /// A platform identifier outside the supported enumeration.
    #[display("Unknown platform: {}", _0)]
    UnknownPlatform(String),
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use uploadpost_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::PollOptionCount { found: 5 });
/// assert!(format!("{}", err).contains("Found: 5"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }
}

impl From<ValidationErrorKind> for ValidationError {
    #[track_caller]
    fn from(kind: ValidationErrorKind) -> Self {
        Self::new(kind)
    }
}

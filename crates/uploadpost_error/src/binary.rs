//! Binary attachment resolution errors.
//!
//! These never abort a request on their own: the builder logs them and omits
//! the field. They are still typed so resolvers can report what went wrong.

/// Kinds of binary resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BinaryErrorKind {
    /// No binary attachment is registered under the name.
    #[display("No binary data found for property '{}'", _0)]
    NotFound(String),
    /// The attachment exists but could not be read.
    #[display("Could not read binary data for property '{}': {}", name, message)]
    Io {
        /// Logical attachment name
        name: String,
        /// Underlying error message
        message: String,
    },
}

/// Binary resolution error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Binary Error: {} at line {} in {}", kind, line, file)]
pub struct BinaryError {
    /// The kind of error that occurred
    pub kind: BinaryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BinaryError {
    /// Create a new binary error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BinaryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BinaryErrorKind {
        &self.kind
    }
}

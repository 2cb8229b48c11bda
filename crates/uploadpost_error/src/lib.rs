//! Error types for the Upload-Post client library.
//!
//! Every error carries the file and line where it was created, captured with
//! `#[track_caller]`. Crate-specific errors convert into [`UploadPostError`]
//! through the generic `From` implementation.

#![warn(missing_docs)]

mod binary;
mod config;
mod error;
mod http;
mod validation;

pub use binary::{BinaryError, BinaryErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{UploadPostError, UploadPostErrorKind, UploadPostResult};
pub use http::{HttpError, HttpErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};

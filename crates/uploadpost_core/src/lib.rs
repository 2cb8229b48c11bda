//! Core data types for the Upload-Post client library.
//!
//! This crate provides the vocabulary shared by the request builder and the
//! HTTP client: platforms, operations, payload values, and the finished
//! [`UploadRequest`].

#![warn(missing_docs)]

mod credentials;
mod fields;
mod operation;
mod payload;
mod platform;
mod request;

pub use credentials::Credentials;
pub use fields::Fields;
pub use operation::{Method, Operation, PayloadKind};
pub use payload::{Attachment, MediaItem, Payload, PayloadBuilder, PayloadValue};
pub use platform::Platform;
pub use request::{AUTHORIZATION, AuthScheme, UploadRequest};

//! Upload-Post API client.
//!
//! Publishes photos, videos, and text posts to social networks through the
//! Upload-Post REST API, and manages the profiles and schedules behind them.
//!
//! # Architecture
//!
//! - [`uploadpost_error`]: location-tracked error types
//! - [`uploadpost_core`]: platforms, operations, field values, and requests
//! - [`uploadpost_builder`]: pure request construction and validation
//! - [`uploadpost_client`]: HTTP transport, completion polling, and record execution
//!
//! # Example
//!
//! ```no_run
//! use uploadpost::{Credentials, Fields, NoBinaries, Operation, Platform, RequestBuilder};
//!
//! let builder = RequestBuilder::new(Credentials::new("api-key"));
//! let fields = Fields::new()
//!     .with("user", "alice")
//!     .with("title", "Hello world")
//!     .with("scheduledDate", "2024-01-01T10:00:00");
//! let request = builder
//!     .build(Operation::UploadText, &[Platform::X], &fields, &NoBinaries)
//!     .unwrap();
//! assert_eq!(request.path(), "/upload_text");
//! ```

#![warn(missing_docs)]

pub mod cli;
mod config;
mod logging;
mod records;

pub use config::{PollingConfig, UploadPostConfig, UploadPostConfigBuilder};
pub use logging::init_tracing;
pub use records::{load_records, parse_records};

pub use uploadpost_builder::{
    BinaryResolver, FileBinaries, FileBinary, InMemoryBinaries, NoBinaries, RequestBuilder,
    normalize_date,
};
pub use uploadpost_client::{
    FinalStatus, InputRecord, OutputRecord, PollSettings, StatusFetcher, UploadPostClient,
    UploadPostNode, poll,
};
pub use uploadpost_core::{
    Attachment, Credentials, Fields, MediaItem, Method, Operation, Payload, PayloadKind,
    PayloadValue, Platform, UploadRequest,
};
pub use uploadpost_error::{
    BinaryError, ConfigError, ConfigErrorKind, HttpError, HttpErrorKind, UploadPostError,
    UploadPostErrorKind, UploadPostResult, ValidationError, ValidationErrorKind,
};

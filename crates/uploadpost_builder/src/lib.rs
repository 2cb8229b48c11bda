//! Request construction for the Upload-Post API.
//!
//! [`RequestBuilder::build`] turns an operation, a platform selection, and a
//! bag of field values into a finished [`UploadRequest`](uploadpost_core::UploadRequest).
//! It performs no network I/O.
//!
//! # Pipeline
//!
//! 1. Route the operation to a method, path, and payload container
//! 2. Drop platforms outside the operation's allow-list
//! 3. Fold the ordered resolution steps into an immutable payload builder
//! 4. Freeze the payload for its container and attach the Authorization header
//!
//! Per-platform behaviour lives in [`PlatformRules`], selected by an
//! exhaustive match over [`Platform`](uploadpost_core::Platform).

#![warn(missing_docs)]

mod binary;
mod builder;
mod context;
mod media;
mod operations;
mod platforms;
mod route;
mod schedule;
mod upload;
mod validation;

pub use binary::{BinaryResolver, FileBinaries, FileBinary, InMemoryBinaries, NoBinaries};
pub use builder::RequestBuilder;
pub use context::{Entries, Step, StepContext};
pub use media::{is_url, resolve_media};
pub use platforms::{Override, PlatformRules, rules_for};
pub use route::{Route, allowed_platforms, payload_kind_for, route};
pub use schedule::normalize_date;
pub use validation::{
    POLL_DURATION_DEFAULT, POLL_DURATION_RANGE, POLL_OPTION_MAX_CHARS, POLL_OPTIONS_RANGE,
    check_exclusive, check_non_negative, check_poll_duration, parse_poll_options,
};

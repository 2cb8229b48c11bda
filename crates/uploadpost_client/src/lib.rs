//! HTTP transport and completion polling for the Upload-Post API.
//!
//! [`UploadPostClient`] sends a built [`UploadRequest`](uploadpost_core::UploadRequest)
//! over `reqwest`. [`poll`] waits for an asynchronous upload to reach a
//! terminal status, and [`UploadPostNode`] ties building, sending, and
//! polling together for a batch of input records.

#![warn(missing_docs)]

mod client;
mod node;
mod poller;

pub use client::{DEFAULT_BASE_URL, UploadPostClient};
pub use node::{InputRecord, OutputRecord, PairedItem, UploadPostNode};
pub use poller::{FinalStatus, PollSettings, StatusFetcher, TERMINAL_STATUSES, poll};

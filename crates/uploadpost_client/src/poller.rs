//! Completion polling for asynchronous uploads.

use async_trait::async_trait;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};
use uploadpost_error::HttpError;

/// Status values after which a job will not change state.
pub const TERMINAL_STATUSES: [&str; 4] = ["success", "completed", "failed", "error"];

const MIN_INTERVAL_SECONDS: u64 = 1;
const MIN_TIMEOUT_SECONDS: u64 = 5;

/// Source of upload status bodies.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    /// Fetch the current status body for an upload.
    ///
    /// # Errors
    ///
    /// Transport failures propagate unchanged; the poller does not retry.
    async fn fetch_status(&self, request_id: &str) -> Result<JsonValue, HttpError>;
}

/// Poll timing in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PollSettings {
    /// Seconds between status checks, at least 1
    interval_seconds: u64,
    /// Seconds before giving up, at least 5
    timeout_seconds: u64,
}

impl PollSettings {
    /// Create poll settings.
    pub fn new(interval_seconds: u64, timeout_seconds: u64) -> Self {
        Self {
            interval_seconds,
            timeout_seconds,
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::new(10, 600)
    }
}

/// Terminal outcome of a poll.
#[derive(Debug, Clone, PartialEq)]
pub enum FinalStatus {
    /// The job reported success
    Completed(JsonValue),
    /// The job reported failure
    Failed(JsonValue),
    /// No terminal status arrived before the timeout
    TimedOut(JsonValue),
}

impl FinalStatus {
    /// Classify a status body, returning `None` while the job is still running.
    pub fn classify(body: JsonValue) -> Option<Self> {
        if body.get("success").and_then(JsonValue::as_bool) == Some(true) {
            return Some(FinalStatus::Completed(body));
        }
        let status = body
            .get("status")
            .and_then(JsonValue::as_str)
            .map(str::to_ascii_lowercase)?;
        match status.as_str() {
            "success" | "completed" => Some(FinalStatus::Completed(body)),
            "failed" | "error" => Some(FinalStatus::Failed(body)),
            _ => None,
        }
    }

    /// The body that ended the poll.
    pub fn body(&self) -> &JsonValue {
        match self {
            FinalStatus::Completed(body) | FinalStatus::Failed(body) | FinalStatus::TimedOut(body) => {
                body
            }
        }
    }

    /// Consume the status, returning its body.
    pub fn into_body(self) -> JsonValue {
        match self {
            FinalStatus::Completed(body) | FinalStatus::Failed(body) | FinalStatus::TimedOut(body) => {
                body
            }
        }
    }

    /// True when the poll gave up.
    pub fn is_timed_out(&self) -> bool {
        matches!(self, FinalStatus::TimedOut(_))
    }
}

/// Poll an upload's status until it is terminal or the timeout elapses.
///
/// Each iteration sleeps for `max(1, interval_seconds)`, then checks the
/// elapsed time against `max(5, timeout_seconds)` before fetching. A timeout
/// is a normal result carrying `{success: false, message, request_id}`.
///
/// # Errors
///
/// Returns the fetcher's error for a failed status check.
#[instrument(skip(fetcher))]
pub async fn poll(
    request_id: &str,
    interval_seconds: u64,
    timeout_seconds: u64,
    fetcher: &dyn StatusFetcher,
) -> Result<FinalStatus, HttpError> {
    let interval = Duration::from_secs(interval_seconds.max(MIN_INTERVAL_SECONDS));
    let timeout = Duration::from_secs(timeout_seconds.max(MIN_TIMEOUT_SECONDS));
    let start = Instant::now();
    let mut checks: u32 = 0;

    loop {
        tokio::time::sleep(interval).await;

        if start.elapsed() > timeout {
            warn!(request_id, checks, "Polling timed out");
            return Ok(FinalStatus::TimedOut(json!({
                "success": false,
                "message": "Polling timed out",
                "request_id": request_id,
            })));
        }

        let body = fetcher.fetch_status(request_id).await?;
        checks += 1;
        debug!(request_id, checks, status = ?body.get("status"), "Polled status");

        if let Some(status) = FinalStatus::classify(body) {
            info!(request_id, checks, "Upload reached terminal status");
            return Ok(status);
        }
    }
}

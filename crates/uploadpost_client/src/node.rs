//! Per-record execution: build, send, optionally poll.

use crate::{PollSettings, UploadPostClient, poll};
use derive_getters::Getters;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{error, info, instrument};
use uploadpost_builder::{BinaryResolver, NoBinaries, RequestBuilder};
use uploadpost_core::Fields;
use uploadpost_error::UploadPostResult;

/// One input record: field values plus the binaries they may reference.
pub struct InputRecord {
    fields: Fields,
    binaries: Box<dyn BinaryResolver>,
}

impl InputRecord {
    /// Create a record with no binary data.
    pub fn new(fields: Fields) -> Self {
        Self {
            fields,
            binaries: Box::new(NoBinaries),
        }
    }

    /// Attach a binary resolver.
    pub fn with_binaries(mut self, binaries: impl BinaryResolver + 'static) -> Self {
        self.binaries = Box::new(binaries);
        self
    }

    /// Field values.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Binary resolver for this record.
    pub fn binaries(&self) -> &dyn BinaryResolver {
        self.binaries.as_ref()
    }
}

impl std::fmt::Debug for InputRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputRecord")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Back-reference to the input record an output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Getters)]
pub struct PairedItem {
    /// Index of the originating input record
    item: usize,
}

/// One output record per input record.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    /// Direct API response, or the last polled status body
    json: JsonValue,
    /// Originating input record
    paired_item: PairedItem,
}

impl OutputRecord {
    /// Create an output record for input `index`.
    pub fn new(json: JsonValue, index: usize) -> Self {
        Self {
            json,
            paired_item: PairedItem { item: index },
        }
    }
}

/// Runs input records against the API one after another.
#[derive(Debug, Clone)]
pub struct UploadPostNode {
    builder: RequestBuilder,
    client: UploadPostClient,
    poll_defaults: PollSettings,
}

impl UploadPostNode {
    /// Create a node. `poll_defaults` apply when a record sets no
    /// `pollInterval` / `pollTimeout`.
    pub fn new(client: UploadPostClient, poll_defaults: PollSettings) -> Self {
        Self {
            builder: RequestBuilder::new(client.credentials().clone()),
            client,
            poll_defaults,
        }
    }

    /// The request builder used for every record.
    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Execute records strictly in order.
    ///
    /// A failing record yields its error in place and does not stop the
    /// records after it.
    pub async fn execute(&self, records: &[InputRecord]) -> Vec<UploadPostResult<OutputRecord>> {
        let mut results = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let result = self.execute_record(index, record).await;
            if let Err(e) = &result {
                error!(index, error = %e, "Record failed");
            }
            results.push(result);
        }
        results
    }

    /// Execute a single record.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the request cannot be built, or a
    /// transport error when the submission or a status check fails.
    #[instrument(skip(self, record))]
    pub async fn execute_record(
        &self,
        index: usize,
        record: &InputRecord,
    ) -> UploadPostResult<OutputRecord> {
        let fields = record.fields();
        let request = self.builder.build_record(fields, record.binaries())?;
        let operation = *request.operation();

        info!(%operation, upload = operation.is_upload(), path = %request.path(), "Executing operation");
        let response = self.client.send(&request).await?;

        let wait = operation.is_upload() && fields.flag("waitForCompletion").unwrap_or(false);
        let json = match (wait, request_id(&response)) {
            (true, Some(request_id)) => {
                let interval = seconds(fields, "pollInterval")
                    .unwrap_or(*self.poll_defaults.interval_seconds());
                let timeout = seconds(fields, "pollTimeout")
                    .unwrap_or(*self.poll_defaults.timeout_seconds());
                poll(&request_id, interval, timeout, &self.client)
                    .await?
                    .into_body()
            }
            _ => response,
        };

        Ok(OutputRecord::new(json, index))
    }
}

/// `request_id` from a submission response, as text.
fn request_id(response: &JsonValue) -> Option<String> {
    match response.get("request_id")? {
        JsonValue::String(id) if !id.is_empty() => Some(id.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-negative whole seconds from a field.
fn seconds(fields: &Fields, name: &str) -> Option<u64> {
    fields.integer(name).map(|value| value.max(0) as u64)
}

//! Offline request building.

use crate::{UploadPostConfig, load_records};
use serde_json::{Value as JsonValue, json};
use std::path::Path;
use tracing::{info, instrument, warn};
use uploadpost_builder::RequestBuilder;
use uploadpost_core::Credentials;

/// Build every record and render the requests, secrets masked.
///
/// Records that fail validation render as `{ "error", "pairedItem" }`.
#[instrument(skip(config))]
pub fn handle_build_command(config: &UploadPostConfig, input: &Path) -> anyhow::Result<JsonValue> {
    let records = load_records(input)?;
    info!(count = records.len(), "Building requests");

    // The key is masked on output, so a missing one is not an error here.
    let credentials = config
        .credentials()
        .unwrap_or_else(|_| Credentials::new(String::new()));
    let builder = RequestBuilder::new(credentials);

    let rendered = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            match builder.build_record(record.fields(), record.binaries()) {
                Ok(request) => request.describe(),
                Err(e) => {
                    warn!(index, error = %e, "Record failed validation");
                    json!({ "error": e.kind().to_string(), "pairedItem": { "item": index } })
                }
            }
        })
        .collect();
    Ok(JsonValue::Array(rendered))
}

//! Record execution against the API.

use crate::{UploadPostConfig, load_records};
use serde_json::{Value as JsonValue, json};
use std::path::Path;
use tracing::{info, instrument};

/// Execute every record and collect one output per record.
///
/// Failed records render as `{ "error", "pairedItem" }` in place.
#[instrument(skip(config))]
pub async fn handle_run_command(
    config: &UploadPostConfig,
    input: &Path,
) -> anyhow::Result<JsonValue> {
    let records = load_records(input)?;
    let node = config.node()?;
    info!(count = records.len(), "Executing records");

    let outputs = node
        .execute(&records)
        .await
        .into_iter()
        .enumerate()
        .map(|(index, result)| match result {
            Ok(output) => serde_json::to_value(output)
                .unwrap_or_else(|e| json!({ "error": e.to_string(), "pairedItem": { "item": index } })),
            Err(e) => json!({ "error": e.to_string(), "pairedItem": { "item": index } }),
        })
        .collect();
    Ok(JsonValue::Array(outputs))
}

//! Upload status queries.

use crate::UploadPostConfig;
use serde_json::Value as JsonValue;
use tracing::{info, instrument};
use uploadpost_client::{StatusFetcher, poll};

/// Fetch an upload's status once, or poll it to completion.
#[instrument(skip(config))]
pub async fn handle_status_command(
    config: &UploadPostConfig,
    request_id: &str,
    wait: bool,
) -> anyhow::Result<JsonValue> {
    let client = config.client()?;
    if !wait {
        return Ok(client.fetch_status(request_id).await?);
    }

    let polling = config.polling();
    let status = poll(
        request_id,
        *polling.interval_seconds(),
        *polling.timeout_seconds(),
        &client,
    )
    .await?;
    info!(timed_out = status.is_timed_out(), "Polling finished");
    Ok(status.into_body())
}

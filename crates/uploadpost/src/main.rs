//! Upload-Post command-line client.
//!
//! Builds requests offline, executes record files against the API, and
//! queries upload status.

use clap::Parser;
use tracing::{debug, info};
use uploadpost::cli::{
    Cli, Commands, handle_build_command, handle_run_command, handle_status_command,
};
use uploadpost::{UploadPostConfig, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = UploadPostConfig::load(cli.config.as_deref())?
        .with_overrides(cli.api_key.clone(), cli.base_url.clone());
    debug!(base_url = %config.base_url(), "Configuration loaded");

    let output = match &cli.command {
        Commands::Build { input } => handle_build_command(&config, input)?,
        Commands::Run { input } => handle_run_command(&config, input).await?,
        Commands::Status { request_id, wait } => {
            handle_status_command(&config, request_id, *wait).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    info!("Done");
    Ok(())
}

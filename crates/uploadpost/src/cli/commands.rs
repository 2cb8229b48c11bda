//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Upload-Post API client.
#[derive(Parser, Debug)]
#[command(name = "uploadpost")]
#[command(about = "Publish photos, videos, and text through the Upload-Post API")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API key, overriding the config file
    #[arg(long, env = "UPLOAD_POST_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL, overriding the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build requests from a records file and print them without sending
    Build {
        /// Path to a JSON records file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Execute a records file against the API
    Run {
        /// Path to a JSON records file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Query the status of an asynchronous upload
    Status {
        /// Request id returned by an upload
        request_id: String,

        /// Poll until the upload reaches a terminal status
        #[arg(long)]
        wait: bool,
    },
}

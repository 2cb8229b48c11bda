//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the uploadpost binary.

mod build;
mod commands;
mod run;
mod status;

pub use build::handle_build_command;
pub use commands::{Cli, Commands};
pub use run::handle_run_command;
pub use status::handle_status_command;

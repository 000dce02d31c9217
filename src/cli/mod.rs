//! CLI module for the trivia service
//!
//! Provides command-line interface for:
//! - init: Create the schema and seed default categories
//! - serve: Run the HTTP API

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};

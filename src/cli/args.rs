//! CLI argument definitions using clap
//!
//! Commands:
//! - trivia init --config <path>
//! - trivia serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trivia - a JSON API over a trivia question bank
#[derive(Parser, Debug)]
#[command(name = "trivia")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database schema and seed the default categories
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./trivia.json")]
        config: PathBuf,
    },

    /// Start the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./trivia.json")]
        config: PathBuf,

        /// Port override (defaults to the configured port)
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

//! CLI command implementations
//!
//! `init` prepares a database; `serve` boots the HTTP API on top of it.
//! Both read the same JSON configuration file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{init_logging, parse_filter};
use crate::store::SqliteRepository;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Database path that selects a private in-memory store
const IN_MEMORY_PATH: &str = ":memory:";

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (required)
    pub database_path: String,

    /// Bind address and CORS settings
    #[serde(flatten)]
    pub http: HttpServerConfig,

    /// Log filter directive (optional, default "info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        parse_filter(&self.log_filter)?;

        Ok(())
    }

    /// Open the configured store, creating tables as needed
    pub fn open_store(&self) -> CliResult<SqliteRepository> {
        let repo = if self.database_path == IN_MEMORY_PATH {
            SqliteRepository::open_in_memory()?
        } else {
            SqliteRepository::open(&self.database_path)?
        };
        Ok(repo)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Create the schema and seed the default categories.
///
/// Safe to rerun: tables are created only when missing and categories are
/// seeded only into an empty table.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let repo = config.open_store()?;
    let seeded = repo.seed_default_categories()?;

    write_response(json!({
        "initialized": true,
        "categories_seeded": seeded
    }))
}

/// Start the HTTP API and block until shutdown
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    init_logging(&config.log_filter)?;

    let repo = config.open_store()?;
    info!(database = %config.database_path, "store opened");

    let server = HttpServer::new(config.http.clone(), Arc::new(repo));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Write a one-line JSON result to stdout
fn write_response(data: Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &data)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

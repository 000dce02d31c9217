//! `tracing` subscriber setup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Failures while installing the log subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("a global log subscriber is already installed")]
    AlreadyInstalled,
}

/// Parse an env-filter directive such as `info` or `trivia=debug,tower_http=info`
pub fn parse_filter(filter: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(filter).map_err(|e| LoggingError::InvalidFilter {
        filter: filter.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter when set.
pub fn init_logging(configured: &str) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(configured)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)
}

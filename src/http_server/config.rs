//! Listener Settings
//!
//! Where the trivia API binds and which browser origins may call it. These
//! keys sit at the top level of the `trivia.json` file next to
//! `database_path`.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Bind address and CORS origins for the trivia API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    /// 5000 unless the file or `--port` says otherwise
    #[serde(default = "default_port")]
    pub port: u16,

    /// Browser origins allowed to call the API; an empty list admits any
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Defaults, listening on `port`
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port` as handed to the listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Origins for the CORS allow-list, or `None` to admit any origin.
    ///
    /// Entries that are not valid header values are logged and skipped.
    pub fn allowed_origins(&self) -> Option<Vec<HeaderValue>> {
        if self.cors_origins.is_empty() {
            return None;
        }

        let origins = self
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        Some(origins)
    }
}

//! Liveness Route
//!
//! `GET /health` reports that the trivia API is up and which build is
//! answering. It does not touch the question bank.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use super::trivia_routes::method_not_allowed_handler;

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    /// Liveness of the running binary
    pub fn current() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// `/health`, with the 405 envelope for anything but GET
pub fn health_routes() -> Router {
    Router::new().route(
        "/health",
        get(health_handler).fallback(method_not_allowed_handler),
    )
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::current())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_reports_crate_version() {
        let json = serde_json::to_value(HealthResponse::current()).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}

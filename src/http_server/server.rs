//! # HTTP Server
//!
//! Builds the route table once at startup and serves it with axum.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header, Method},
    middleware, Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::config::HttpServerConfig;
use super::negotiation::require_json;
use super::observability_routes::health_routes;
use super::trivia_routes::{not_found_handler, trivia_routes, TriviaState};
use crate::store::TriviaRepository;

/// HTTP server for the trivia API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the given question bank
    pub fn new(config: HttpServerConfig, repo: Arc<dyn TriviaRepository>) -> Self {
        let state = Arc::new(TriviaState::new(repo));
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: Arc<TriviaState>) -> Router {
        Router::new()
            .merge(health_routes())
            .merge(trivia_routes(state))
            .fallback(not_found_handler)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(Self::cors_layer(config))
                    .layer(middleware::from_fn(require_json)),
            )
    }

    /// Any origin when none are configured; methods and headers are fixed
    fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        match config.allowed_origins() {
            Some(origins) => cors.allow_origin(AllowOrigin::list(origins)),
            None => cors.allow_origin(Any),
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until ctrl-c
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "trivia API listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("trivia API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
}

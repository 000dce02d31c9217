//! # Trivia HTTP Server Module
//!
//! JSON API over the question bank, served with axum.
//!
//! # Endpoints
//!
//! - `GET /categories` - Category id to label mapping
//! - `GET /categories/:id/questions` - Questions in one category
//! - `GET /questions?page=N` - Paginated questions
//! - `POST /questions` - Create a question
//! - `DELETE /questions/:id` - Delete a question
//! - `POST /search` - Substring search on question text
//! - `POST /quizzes` - Draw a random unseen question
//! - `GET /health` - Health check

pub mod config;
pub mod errors;
pub mod negotiation;
pub mod observability_routes;
pub mod pagination;
pub mod quiz;
pub mod request;
pub mod response;
pub mod server;
pub mod trivia_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;

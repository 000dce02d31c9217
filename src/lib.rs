//! trivia - a JSON API over a trivia question bank
//!
//! Categories, paginated question listing, search, and random quiz draws,
//! backed by SQLite.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;

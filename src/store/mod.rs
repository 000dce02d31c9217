//! # Trivia Store
//!
//! Data store accessor for the trivia question bank.
//!
//! Records are plain structs; every read and write goes through the
//! [`TriviaRepository`] trait so handlers never touch SQL directly.
//!
//! - `models` - Question and Category records
//! - `repository` - the repository trait
//! - `sqlite` - SQLite implementation backed by `rusqlite`

pub mod errors;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use errors::{StoreError, StoreResult};
pub use models::{category_map, Category, CategoryMap, NewQuestion, Question};
pub use repository::TriviaRepository;
pub use sqlite::{SqliteRepository, DEFAULT_CATEGORIES};

//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by the backing store
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite reported an error
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A previous holder of the connection panicked
    #[error("database connection lock poisoned")]
    LockPoisoned,

    /// A stored value does not fit the in-memory type
    #[error("corrupt row: {0}")]
    CorruptRow(String),
}

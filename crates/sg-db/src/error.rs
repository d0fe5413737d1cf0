//! Error types for sg-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// D001: Connection error
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// D002: Query execution error
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// D003: Transaction control error
    #[error("[D003] Transaction control failed: {0}")]
    TransactionError(String),

    /// D004: Mutex poisoned
    #[error("[D004] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// D005: Internal error
    #[error("[D005] Internal database error: {0}")]
    Internal(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::ExecutionError(err.to_string())
    }
}

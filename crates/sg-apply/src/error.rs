//! Error types for sg-apply

use sg_db::DbError;
use thiserror::Error;

/// Errors raised while applying migrations.
///
/// `ChecksumMismatch` and `DuplicateVersion` are integrity faults: they are
/// never auto-resolved and halt the run for operator investigation.
/// `LockContention` is transient; retrying the whole run is safe.
#[derive(Error, Debug)]
pub enum ApplyError {
    /// A001: A previously applied migration's file was edited
    #[error("[A001] Checksum mismatch for migration {version}: ledger has {recorded}, file is now {actual}. The file was edited after being applied; resolve the drift before continuing.")]
    ChecksumMismatch {
        version: String,
        recorded: String,
        actual: String,
    },

    /// A002: Ledger already holds an applied entry for this version
    #[error("[A002] Duplicate ledger entry for migration {version}; the ledger was modified outside the pipeline")]
    DuplicateVersion { version: String },

    /// A003: A statement failed inside the migration's transaction
    #[error("[A003] Migration {version} failed on statement `{statement}`: {source}")]
    Statement {
        version: String,
        statement: String,
        source: DbError,
    },

    /// A004: Another run holds the advisory lock
    #[error("[A004] Advisory lock '{name}' is held by another run")]
    LockContention { name: String },

    /// A005: Ledger row could not be decoded
    #[error("[A005] Corrupt ledger entry for migration {version}: {message}")]
    LedgerCorrupt { version: String, message: String },

    /// Statement splitting or sanitization failed
    #[error(transparent)]
    Sql(#[from] sg_sql::SqlError),

    /// Database operation failed outside a migration's statements
    #[error(transparent)]
    Db(#[from] DbError),

    /// Migration discovery or configuration failed
    #[error(transparent)]
    Core(#[from] sg_core::CoreError),
}

/// Result type alias for ApplyError
pub type ApplyResult<T> = Result<T, ApplyError>;

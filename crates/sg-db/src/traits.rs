//! Database capability trait

use crate::error::DbResult;
use async_trait::async_trait;

/// Capabilities the migration applier depends on.
///
/// The applier needs exactly: execute-statement, transaction control, an
/// advisory lock, and string-typed row reads for the ledger. No dialect
/// knowledge beyond that leaks into the trait. Implementations must be
/// Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements as one batch
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Query rows, reading the first `cols` columns of each as strings
    async fn query_rows(&self, sql: &str, cols: usize) -> DbResult<Vec<Vec<String>>>;

    /// Begin a transaction on this connection
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    async fn rollback(&self) -> DbResult<()>;

    /// Try to take the named advisory lock without blocking.
    /// Returns false when another holder has it.
    async fn try_advisory_lock(&self, name: &str) -> DbResult<bool>;

    /// Release the named advisory lock
    async fn advisory_unlock(&self, name: &str) -> DbResult<()>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

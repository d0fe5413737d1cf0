//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;
use std::sync::Mutex;

/// Table backing the advisory lock. DuckDB has no native advisory lock, so
/// a primary-key insert stands in: the insert either succeeds (granted) or
/// conflicts (held elsewhere).
const LOCK_TABLE: &str = "_schemaguard_lock";

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.conn.lock().unwrap();
        conn.execute(sql, [])
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql.trim())))
    }

    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn query_rows_sync(&self, sql: &str, cols: usize) -> DbResult<Vec<Vec<String>>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        let mapped = stmt
            .query_map([], |row| {
                let mut out = Vec::with_capacity(cols);
                for i in 0..cols {
                    out.push(row.get::<_, String>(i)?);
                }
                Ok(out)
            })
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        mapped
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn transaction_control(&self, sql: &str) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(sql)
            .map_err(|e| DbError::TransactionError(format!("{}: {}", sql, e)))
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn query_rows(&self, sql: &str, cols: usize) -> DbResult<Vec<Vec<String>>> {
        self.query_rows_sync(sql, cols)
    }

    async fn begin(&self) -> DbResult<()> {
        self.transaction_control("BEGIN TRANSACTION;")
    }

    async fn commit(&self) -> DbResult<()> {
        self.transaction_control("COMMIT;")
    }

    async fn rollback(&self) -> DbResult<()> {
        self.transaction_control("ROLLBACK;")
    }

    async fn try_advisory_lock(&self, name: &str) -> DbResult<bool> {
        self.execute_batch_sync(&format!(
            "CREATE TABLE IF NOT EXISTS {} (name TEXT PRIMARY KEY);",
            LOCK_TABLE
        ))?;
        let insert = format!(
            "INSERT INTO {} (name) VALUES ('{}');",
            LOCK_TABLE,
            name.replace('\'', "''")
        );
        match self.execute_sync(&insert) {
            Ok(_) => Ok(true),
            Err(DbError::ExecutionError(msg))
                if msg.contains("Constraint") || msg.contains("Duplicate") =>
            {
                log::debug!("advisory lock '{}' is held elsewhere", name);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn advisory_unlock(&self, name: &str) -> DbResult<()> {
        self.execute_sync(&format!(
            "DELETE FROM {} WHERE name = '{}';",
            LOCK_TABLE,
            name.replace('\'', "''")
        ))?;
        Ok(())
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        // Handle schema-qualified names
        let (schema, table) = if let Some(pos) = name.rfind('.') {
            (&name[..pos], &name[pos + 1..])
        } else {
            ("main", name)
        };
        let sql = format!(
            "SELECT CAST(COUNT(*) AS VARCHAR) FROM information_schema.tables WHERE table_schema = '{}' AND table_name = '{}'",
            schema.replace('\'', "''"),
            table.replace('\'', "''")
        );
        let rows = self.query_rows_sync(&sql, 1)?;
        Ok(rows.first().and_then(|r| r.first()).map(|c| c != "0").unwrap_or(false))
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;

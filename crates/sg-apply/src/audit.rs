//! Audit log for neutralized statements.
//!
//! Every destructive statement the sanitizer neutralizes produces one
//! record for operator review. The sink is advisory: a write failure is
//! logged and never blocks the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One neutralized destructive statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Pipeline run that neutralized the statement
    pub run_id: String,

    /// Migration version identifier
    pub migration: String,

    /// Verbatim original statement text
    pub statement: String,

    /// Why the statement was neutralized
    pub reason: String,

    /// When the neutralization was committed
    pub neutralized_at: DateTime<Utc>,
}

/// Append-only sink for audit records
pub trait AuditSink: Send + Sync {
    /// Append one record
    fn record(&self, record: &AuditRecord) -> std::io::Result<()>;
}

/// JSON-lines file sink, opened append-only per write
pub struct FileAuditSink {
    path: PathBuf,
}

impl FileAuditSink {
    /// Create a sink writing to the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this sink appends to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, record: &AuditRecord) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(file, "{}", line)
    }
}

/// In-memory sink for tests
#[derive(Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded entries
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: &AuditRecord) -> std::io::Result<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Sink used when no audit log is configured; neutralizations still reach
/// the normal log output.
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&self, _record: &AuditRecord) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "audit_test.rs"]
mod tests;

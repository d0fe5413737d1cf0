//! Migration ledger.
//!
//! The ledger is the single source of truth for "has this migration run".
//! It is written through the same `Database` handle as the migration's own
//! statements, so a ledger write issued inside the applier's transaction
//! commits or rolls back together with them.

use chrono::{DateTime, Utc};
use sg_db::Database;

use crate::error::{ApplyError, ApplyResult};

/// Status of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerStatus {
    /// Migration committed; the entry is immutable from here on
    Applied,
    /// Last attempt failed; a later run may retry this version
    Failed,
}

impl LedgerStatus {
    fn as_str(&self) -> &'static str {
        match self {
            LedgerStatus::Applied => "applied",
            LedgerStatus::Failed => "failed",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "applied" => Some(LedgerStatus::Applied),
            "failed" => Some(LedgerStatus::Failed),
            _ => None,
        }
    }
}

/// One row of the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub version: String,
    pub checksum: String,
    pub applied_at: DateTime<Utc>,
    pub status: LedgerStatus,
}

/// Append-only migration ledger over a `Database` handle
pub struct Ledger<'a> {
    db: &'a dyn Database,
    table: String,
}

impl<'a> Ledger<'a> {
    /// Create a ledger over the given table name
    pub fn new(db: &'a dyn Database, table: impl Into<String>) -> Self {
        Self {
            db,
            table: table.into(),
        }
    }

    /// Create the ledger table when missing. Idempotent.
    pub async fn ensure_table(&self) -> ApplyResult<()> {
        self.db
            .execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {} (\n  version TEXT PRIMARY KEY,\n  checksum TEXT NOT NULL,\n  applied_at TEXT NOT NULL,\n  status TEXT NOT NULL\n);",
                self.table
            ))
            .await?;
        Ok(())
    }

    /// Look up the entry for a version, if any.
    pub async fn lookup(&self, version: &str) -> ApplyResult<Option<LedgerEntry>> {
        let sql = format!(
            "SELECT version, checksum, applied_at, status FROM {} WHERE version = '{}'",
            self.table,
            escape(version)
        );
        let rows = self.db.query_rows(&sql, 4).await?;
        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };
        Ok(Some(decode_entry(row)?))
    }

    /// All entries, ordered by version. Used by status reporting.
    pub async fn entries(&self) -> ApplyResult<Vec<LedgerEntry>> {
        let sql = format!(
            "SELECT version, checksum, applied_at, status FROM {} ORDER BY version",
            self.table
        );
        let rows = self.db.query_rows(&sql, 4).await?;
        rows.into_iter().map(decode_entry).collect()
    }

    /// Record a successful apply.
    ///
    /// A `failed` entry for the same version transitions to `applied`; an
    /// existing `applied` entry is an integrity fault, because applied
    /// entries are written at most once, ever.
    pub async fn record_applied(&self, version: &str, checksum: &str) -> ApplyResult<()> {
        match self.lookup(version).await? {
            Some(entry) if entry.status == LedgerStatus::Applied => {
                Err(ApplyError::DuplicateVersion {
                    version: version.to_string(),
                })
            }
            Some(_) => {
                self.write(version, checksum, LedgerStatus::Applied, true).await
            }
            None => {
                self.write(version, checksum, LedgerStatus::Applied, false).await
            }
        }
    }

    /// Record a failed attempt so operators can see it. Insert-or-update,
    /// except that an `applied` row is never downgraded: applied entries
    /// are immutable once written.
    pub async fn record_failed(&self, version: &str, checksum: &str) -> ApplyResult<()> {
        match self.lookup(version).await? {
            Some(entry) if entry.status == LedgerStatus::Applied => {
                log::warn!(
                    "refusing to mark applied migration {} as failed",
                    version
                );
                Ok(())
            }
            Some(_) => self.write(version, checksum, LedgerStatus::Failed, true).await,
            None => self.write(version, checksum, LedgerStatus::Failed, false).await,
        }
    }

    async fn write(
        &self,
        version: &str,
        checksum: &str,
        status: LedgerStatus,
        update: bool,
    ) -> ApplyResult<()> {
        let now = Utc::now().to_rfc3339();
        let sql = if update {
            format!(
                "UPDATE {} SET checksum = '{}', applied_at = '{}', status = '{}' WHERE version = '{}'",
                self.table,
                escape(checksum),
                now,
                status.as_str(),
                escape(version)
            )
        } else {
            format!(
                "INSERT INTO {} (version, checksum, applied_at, status) VALUES ('{}', '{}', '{}', '{}')",
                self.table,
                escape(version),
                escape(checksum),
                now,
                status.as_str()
            )
        };
        self.db.execute(&sql).await?;
        Ok(())
    }
}

fn decode_entry(row: Vec<String>) -> ApplyResult<LedgerEntry> {
    let [version, checksum, applied_at, status]: [String; 4] =
        row.try_into().map_err(|_| ApplyError::LedgerCorrupt {
            version: "?".to_string(),
            message: "wrong column count".to_string(),
        })?;
    let status = LedgerStatus::parse(&status).ok_or_else(|| ApplyError::LedgerCorrupt {
        version: version.clone(),
        message: format!("unknown status '{}'", status),
    })?;
    let applied_at = DateTime::parse_from_rfc3339(&applied_at)
        .map_err(|e| ApplyError::LedgerCorrupt {
            version: version.clone(),
            message: format!("bad timestamp: {}", e),
        })?
        .with_timezone(&Utc);
    Ok(LedgerEntry {
        version,
        checksum,
        applied_at,
        status,
    })
}

fn escape(value: &str) -> String {
    value.replace('\'', "''")
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;

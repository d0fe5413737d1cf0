//! Migration applier.
//!
//! Drives each migration through `unseen → pending → applied` (or
//! `failed`). One transaction per migration, ledger write included, behind
//! the pipeline advisory lock. The run halts at the first fault: later
//! migrations may depend on the failed one, and skipping would leave the
//! schema in a state indistinguishable from success.

use std::time::Duration;

use chrono::Utc;
use sg_core::MigrationFile;
use sg_db::Database;
use sg_sql::{split_statements, SanitizedStatement, Sanitizer};
use uuid::Uuid;

use crate::audit::{AuditRecord, AuditSink};
use crate::error::{ApplyError, ApplyResult};
use crate::ledger::{Ledger, LedgerStatus};

/// Applier settings, threaded explicitly so two pipelines can run against
/// different databases in one process without interference.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Ledger table name
    pub ledger_table: String,

    /// Advisory lock name serializing concurrent runs
    pub lock_name: String,

    /// Wait for the lock (poll) instead of failing fast
    pub wait_for_lock: bool,

    /// Poll interval while waiting for the lock
    pub lock_poll: Duration,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            ledger_table: "_schemaguard_ledger".to_string(),
            lock_name: "schemaguard_pipeline".to_string(),
            wait_for_lock: true,
            lock_poll: Duration::from_millis(250),
        }
    }
}

/// Summary of one pipeline run
#[derive(Debug, Clone)]
pub struct ApplyReport {
    /// Unique identifier of this run
    pub run_id: String,

    /// Versions applied by this run, in order
    pub applied: Vec<String>,

    /// Versions skipped because the ledger already shows them applied
    pub skipped: Vec<String>,

    /// Destructive statements neutralized across the run
    pub neutralized: usize,
}

/// What happened for one migration while the advisory lock was held
enum LockOutcome {
    /// This run executed the migration and committed it
    Applied,
    /// Another run committed it first; nothing executed here
    AlreadyApplied,
}

/// Applies sanitized migrations against one database
pub struct Applier<'a> {
    db: &'a dyn Database,
    sanitizer: Sanitizer,
    options: ApplyOptions,
}

impl<'a> Applier<'a> {
    /// Create an applier over a database handle
    pub fn new(db: &'a dyn Database, sanitizer: Sanitizer, options: ApplyOptions) -> Self {
        Self {
            db,
            sanitizer,
            options,
        }
    }

    /// Apply all pending migrations in ascending version order.
    ///
    /// Already-applied migrations are skipped when their checksum still
    /// matches; a mismatch halts the run before anything executes for that
    /// or any later version.
    pub async fn apply_all(
        &self,
        migrations: &[MigrationFile],
        sink: &dyn AuditSink,
    ) -> ApplyResult<ApplyReport> {
        let ledger = Ledger::new(self.db, self.options.ledger_table.clone());
        ledger.ensure_table().await?;

        let mut report = ApplyReport {
            run_id: Uuid::new_v4().to_string(),
            applied: Vec::new(),
            skipped: Vec::new(),
            neutralized: 0,
        };

        for migration in migrations {
            let version = migration.version.to_string();
            match ledger.lookup(&version).await? {
                Some(entry) if entry.status == LedgerStatus::Applied => {
                    if entry.checksum == migration.checksum {
                        log::debug!("migration {} already applied, skipping", migration.label());
                        report.skipped.push(version);
                        continue;
                    }
                    return Err(ApplyError::ChecksumMismatch {
                        version,
                        recorded: entry.checksum,
                        actual: migration.checksum.clone(),
                    });
                }
                Some(_) => {
                    log::info!("retrying previously failed migration {}", migration.label());
                    self.apply_one(&ledger, migration, &mut report, sink).await?;
                }
                None => {
                    self.apply_one(&ledger, migration, &mut report, sink).await?;
                }
            }
        }

        log::info!(
            "run {} complete: {} applied, {} skipped, {} neutralized",
            report.run_id,
            report.applied.len(),
            report.skipped.len(),
            report.neutralized
        );
        Ok(report)
    }

    /// Split, sanitize, and execute one migration in a single transaction.
    ///
    /// Sanitized text is re-derived from the original file on every run,
    /// including retries; nothing is cached between runs.
    async fn apply_one(
        &self,
        ledger: &Ledger<'_>,
        migration: &MigrationFile,
        report: &mut ApplyReport,
        sink: &dyn AuditSink,
    ) -> ApplyResult<()> {
        let version = migration.version.to_string();
        let spans = split_statements(&migration.raw_sql)?;
        let statements = self.sanitizer.sanitize(&spans)?;

        self.acquire_lock().await?;
        let result = self
            .apply_locked(ledger, migration, &version, &statements)
            .await;
        if let Err(e) = self.db.advisory_unlock(&self.options.lock_name).await {
            log::error!("failed to release advisory lock: {}", e);
        }

        match result {
            Ok(LockOutcome::AlreadyApplied) => {
                log::debug!(
                    "migration {} was applied by a concurrent run, skipping",
                    migration.label()
                );
                report.skipped.push(version);
                Ok(())
            }
            Ok(LockOutcome::Applied) => {
                report.applied.push(version.clone());
                for stmt in &statements {
                    let Some(neutralized) = &stmt.neutralized else {
                        continue;
                    };
                    report.neutralized += 1;
                    let record = AuditRecord {
                        run_id: report.run_id.clone(),
                        migration: version.clone(),
                        statement: neutralized.original.clone(),
                        reason: neutralized.reason.clone(),
                        neutralized_at: Utc::now(),
                    };
                    if let Err(e) = sink.record(&record) {
                        log::warn!("audit sink write failed for migration {}: {}", version, e);
                    }
                }
                log::info!("applied migration {}", migration.label());
                Ok(())
            }
            Err(err) => {
                // Integrity faults halt for operator investigation; a
                // failed mark would invite an automatic retry on the next
                // run. Anything else is marked outside the aborted
                // transaction so the ledger shows the attempt.
                if !matches!(
                    err,
                    ApplyError::ChecksumMismatch { .. }
                        | ApplyError::DuplicateVersion { .. }
                        | ApplyError::LedgerCorrupt { .. }
                ) {
                    if let Err(mark) = ledger.record_failed(&version, &migration.checksum).await {
                        log::error!("could not record failure for {}: {}", version, mark);
                    }
                }
                Err(err)
            }
        }
    }

    /// Runs with the advisory lock held. The ledger is consulted again
    /// before anything executes: the pre-scan in `apply_all` ran before the
    /// lock was taken, and a concurrent run may have committed this version
    /// in the meantime.
    async fn apply_locked(
        &self,
        ledger: &Ledger<'_>,
        migration: &MigrationFile,
        version: &str,
        statements: &[SanitizedStatement],
    ) -> ApplyResult<LockOutcome> {
        if let Some(entry) = ledger.lookup(version).await? {
            if entry.status == LedgerStatus::Applied {
                if entry.checksum == migration.checksum {
                    return Ok(LockOutcome::AlreadyApplied);
                }
                return Err(ApplyError::ChecksumMismatch {
                    version: version.to_string(),
                    recorded: entry.checksum,
                    actual: migration.checksum.clone(),
                });
            }
        }
        self.run_transaction(ledger, migration, version, statements)
            .await?;
        Ok(LockOutcome::Applied)
    }

    async fn run_transaction(
        &self,
        ledger: &Ledger<'_>,
        migration: &MigrationFile,
        version: &str,
        statements: &[SanitizedStatement],
    ) -> ApplyResult<()> {
        self.db.begin().await?;
        for stmt in statements {
            if !stmt.executable {
                continue;
            }
            if let Err(e) = self.db.execute(&stmt.text).await {
                self.rollback_quietly(version).await;
                return Err(ApplyError::Statement {
                    version: version.to_string(),
                    statement: stmt.text.trim().to_string(),
                    source: e,
                });
            }
        }
        // Same transaction as the statements: both commit or neither does.
        if let Err(e) = ledger.record_applied(version, &migration.checksum).await {
            self.rollback_quietly(version).await;
            return Err(e);
        }
        self.db.commit().await?;
        Ok(())
    }

    async fn rollback_quietly(&self, version: &str) {
        if let Err(e) = self.db.rollback().await {
            log::error!("rollback failed for migration {}: {}", version, e);
        }
    }

    async fn acquire_lock(&self) -> ApplyResult<()> {
        loop {
            if self.db.try_advisory_lock(&self.options.lock_name).await? {
                return Ok(());
            }
            if !self.options.wait_for_lock {
                return Err(ApplyError::LockContention {
                    name: self.options.lock_name.clone(),
                });
            }
            log::info!(
                "waiting for advisory lock '{}' held by another run",
                self.options.lock_name
            );
            tokio::time::sleep(self.options.lock_poll).await;
        }
    }
}

#[cfg(test)]
#[path = "applier_test.rs"]
mod tests;

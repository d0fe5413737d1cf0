//! Status command implementation

use anyhow::Result;
use std::collections::BTreeMap;

use sg_apply::{Ledger, LedgerEntry, LedgerStatus};
use sg_core::checksum::short_checksum;

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::common::{load_migrations, load_project, open_database};

/// Execute the status command
pub async fn execute(_args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrations = load_migrations(&project)?;
    let db = open_database(&project)?;

    let ledger = Ledger::new(&db, project.config.ledger_table.clone());
    ledger.ensure_table().await?;
    let mut entries: BTreeMap<String, LedgerEntry> = ledger
        .entries()
        .await?
        .into_iter()
        .map(|e| (e.version.clone(), e))
        .collect();

    println!("{:<8} {:<28} {:<10} {}", "VERSION", "NAME", "STATUS", "DETAIL");
    for migration in &migrations {
        let version = migration.version.to_string();
        match entries.remove(&version) {
            Some(entry) if entry.status == LedgerStatus::Applied => {
                if entry.checksum == migration.checksum {
                    println!(
                        "{:<8} {:<28} {:<10} {}",
                        version,
                        migration.name,
                        "applied",
                        entry.applied_at.to_rfc3339()
                    );
                } else {
                    println!(
                        "{:<8} {:<28} {:<10} ledger {} != file {}",
                        version,
                        migration.name,
                        "DRIFTED",
                        short_checksum(&entry.checksum),
                        short_checksum(&migration.checksum)
                    );
                }
            }
            Some(entry) => {
                println!(
                    "{:<8} {:<28} {:<10} last attempt {}",
                    version,
                    migration.name,
                    "failed",
                    entry.applied_at.to_rfc3339()
                );
            }
            None => {
                println!("{:<8} {:<28} {:<10}", version, migration.name, "pending");
            }
        }
    }

    // Ledger entries with no matching file: applied history whose artifacts
    // are gone.
    for (version, entry) in entries {
        println!(
            "{:<8} {:<28} {:<10} no migration file on disk",
            version,
            "?",
            match entry.status {
                LedgerStatus::Applied => "applied",
                LedgerStatus::Failed => "failed",
            }
        );
    }

    Ok(())
}

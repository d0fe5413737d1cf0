//! Apply command implementation

use anyhow::Result;
use std::time::Duration;

use sg_apply::{Applier, ApplyOptions, AuditSink, FileAuditSink, NullAuditSink};

use crate::cli::{ApplyArgs, GlobalArgs};
use crate::commands::common::{build_sanitizer, load_migrations, load_project, open_database};

/// Execute the apply command
pub async fn execute(args: &ApplyArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrations = load_migrations(&project)?;

    if migrations.is_empty() {
        println!("No migrations found in {}", project.config.migrations_dir);
        return Ok(());
    }

    let db = open_database(&project)?;
    let sanitizer = build_sanitizer(&project)?;
    let options = ApplyOptions {
        ledger_table: project.config.ledger_table.clone(),
        lock_name: project.config.lock_name.clone(),
        wait_for_lock: !args.no_wait,
        lock_poll: Duration::from_millis(250),
    };

    let file_sink;
    let sink: &dyn AuditSink = match &project.config.audit_log {
        Some(path) => {
            file_sink = FileAuditSink::new(project.root.join(path));
            &file_sink
        }
        None => &NullAuditSink,
    };

    let applier = Applier::new(&db, sanitizer, options);
    let report = applier.apply_all(&migrations, sink).await?;

    for version in &report.applied {
        println!("  Applied: {}", version);
    }
    if global.verbose {
        for version in &report.skipped {
            println!("  Skipped (already applied): {}", version);
        }
    }
    println!();
    println!(
        "Applied {}, skipped {}, neutralized {} destructive statement{}",
        report.applied.len(),
        report.skipped.len(),
        report.neutralized,
        if report.neutralized == 1 { "" } else { "s" }
    );
    Ok(())
}

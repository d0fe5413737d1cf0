//! Sanitize command implementation

use anyhow::Result;
use std::fs;
use std::path::Path;

use sg_sql::split_statements;

use crate::cli::{GlobalArgs, SanitizeArgs};
use crate::commands::common::{build_sanitizer, load_migrations, load_project};

/// Execute the sanitize command
pub async fn execute(args: &SanitizeArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrations = load_migrations(&project)?;
    let sanitizer = build_sanitizer(&project)?;

    let output_dir = args.output_dir.as_ref().map(|d| project.root.join(d));
    if let Some(dir) = &output_dir {
        fs::create_dir_all(dir)?;
    }

    let mut neutralized_total = 0usize;
    for migration in &migrations {
        let spans = split_statements(&migration.raw_sql)?;
        let statements = sanitizer.sanitize(&spans)?;
        let neutralized = statements.iter().filter(|s| s.neutralized.is_some()).count();
        neutralized_total += neutralized;

        let text: String = statements.iter().map(|s| s.text.as_str()).collect();
        match &output_dir {
            Some(dir) => {
                let file_name = migration
                    .path
                    .file_name()
                    .map(Path::new)
                    .unwrap_or_else(|| Path::new("migration.sql"));
                let out_path = dir.join(file_name);
                fs::write(&out_path, &text)?;
                println!(
                    "  Wrote {} ({} neutralized)",
                    out_path.display(),
                    neutralized
                );
            }
            None => {
                println!("-- migration {}", migration.label());
                println!("{}", text);
            }
        }
    }

    if global.verbose || output_dir.is_some() {
        println!();
        println!(
            "Sanitized {} migration{}, {} destructive statement{} neutralized",
            migrations.len(),
            if migrations.len() == 1 { "" } else { "s" },
            neutralized_total,
            if neutralized_total == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

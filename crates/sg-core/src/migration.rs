//! Migration file model and directory discovery.
//!
//! Migration files are produced by the external schema-diff generator and
//! are consumed strictly read-only: sanitization happens on the in-memory
//! statement list, never by rewriting the original artifact.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::checksum::compute_checksum;
use crate::error::{CoreError, CoreResult};
use crate::version::MigrationVersion;

/// One generated migration file, loaded into memory for a single run.
#[derive(Debug, Clone)]
pub struct MigrationFile {
    /// Ordered version parsed from the file name
    pub version: MigrationVersion,

    /// Descriptive part of the file name (after the version digits)
    pub name: String,

    /// Where the file was loaded from
    pub path: PathBuf,

    /// Verbatim file content
    pub raw_sql: String,

    /// SHA-256 checksum of `raw_sql`, recorded in the ledger at apply time
    pub checksum: String,
}

impl MigrationFile {
    /// Load one migration from disk, deriving version and name from the stem.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let version =
            MigrationVersion::parse_stem(stem).ok_or_else(|| CoreError::InvalidMigrationName {
                name: path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or(stem)
                    .to_string(),
            })?;
        let name = stem
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .trim_start_matches(['_', '-'])
            .to_string();
        let raw_sql = fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let checksum = compute_checksum(&raw_sql);
        Ok(Self {
            version,
            name,
            path: path.to_path_buf(),
            raw_sql,
            checksum,
        })
    }

    /// Human-readable label for logs and reports, e.g. `0003 add_orders`.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.version.to_string()
        } else {
            format!("{} {}", self.version, self.name)
        }
    }
}

/// Discover all `*.sql` migrations in a directory, sorted ascending by
/// version.
///
/// Non-SQL files are ignored. Two files with the same version are an error:
/// the ledger keys on the version, so the pair would be indistinguishable.
pub fn discover_migrations(dir: &Path) -> CoreResult<Vec<MigrationFile>> {
    if !dir.is_dir() {
        return Err(CoreError::MigrationsDirNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut by_version: BTreeMap<MigrationVersion, MigrationFile> = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("sql") {
            continue;
        }
        let migration = MigrationFile::load(&path)?;
        if let Some(existing) = by_version.get(&migration.version) {
            return Err(CoreError::DuplicateVersion {
                version: migration.version.to_string(),
                first: existing.path.display().to_string(),
                second: migration.path.display().to_string(),
            });
        }
        log::debug!(
            "discovered migration {} ({})",
            migration.label(),
            migration.path.display()
        );
        by_version.insert(migration.version, migration);
    }

    Ok(by_version.into_values().collect())
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;

//! Shared helpers for command implementations

use anyhow::Result;
use std::path::{Path, PathBuf};

use sg_core::{discover_migrations, Config, MigrationFile};
use sg_db::DuckDbBackend;
use sg_sql::{dialect, Classifier, Sanitizer};

use crate::cli::GlobalArgs;

/// Resolved project: root directory plus parsed configuration
pub struct ProjectContext {
    pub root: PathBuf,
    pub config: Config,
}

/// Load configuration from --config or `<project_dir>/schemaguard.yml`,
/// falling back to defaults.
pub fn load_project(global: &GlobalArgs) -> Result<ProjectContext> {
    let root = PathBuf::from(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path))?,
        None => Config::load_or_default(&root)?,
    };
    log::debug!(
        "project {} with ledger table {}",
        root.display(),
        config.ledger_table
    );
    if global.verbose {
        println!(
            "Project: {} (migrations: {}, database: {})",
            root.display(),
            config.migrations_dir,
            config.database.path
        );
    }
    Ok(ProjectContext { root, config })
}

/// Discover the project's migrations, sorted ascending by version.
pub fn load_migrations(project: &ProjectContext) -> Result<Vec<MigrationFile>> {
    let dir = project.config.migrations_dir_absolute(&project.root);
    Ok(discover_migrations(&dir)?)
}

/// Open the configured database. Relative file paths resolve against the
/// project root, not the process working directory.
pub fn open_database(project: &ProjectContext) -> Result<DuckDbBackend> {
    let path = &project.config.database.path;
    if path == ":memory:" {
        return Ok(DuckDbBackend::in_memory()?);
    }
    let resolved = if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        project.root.join(path)
    };
    Ok(DuckDbBackend::from_path(&resolved)?)
}

/// Build the sanitizer for the configured dialect.
pub fn build_sanitizer(project: &ProjectContext) -> Result<Sanitizer> {
    let dialect = dialect::from_dialect_name(project.config.dialect.as_str())?;
    Ok(Sanitizer::new(Classifier::new(dialect)))
}

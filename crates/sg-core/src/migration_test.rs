use super::*;
use std::fs;

fn write_migration(dir: &Path, name: &str, sql: &str) {
    fs::write(dir.join(name), sql).unwrap();
}

#[test]
fn test_load_parses_version_and_name() {
    let tmp = tempfile::tempdir().unwrap();
    write_migration(tmp.path(), "0001_create_users.sql", "CREATE TABLE users (id INT);");

    let m = MigrationFile::load(&tmp.path().join("0001_create_users.sql")).unwrap();
    assert_eq!(m.version, MigrationVersion::new(1));
    assert_eq!(m.name, "create_users");
    assert_eq!(m.raw_sql, "CREATE TABLE users (id INT);");
    assert_eq!(m.checksum, compute_checksum("CREATE TABLE users (id INT);"));
}

#[test]
fn test_load_rejects_unversioned_name() {
    let tmp = tempfile::tempdir().unwrap();
    write_migration(tmp.path(), "create_users.sql", "SELECT 1;");

    let err = MigrationFile::load(&tmp.path().join("create_users.sql")).unwrap_err();
    assert!(matches!(err, CoreError::InvalidMigrationName { .. }));
}

#[test]
fn test_discover_sorts_by_version() {
    let tmp = tempfile::tempdir().unwrap();
    write_migration(tmp.path(), "0010_later.sql", "SELECT 10;");
    write_migration(tmp.path(), "0002_earlier.sql", "SELECT 2;");
    write_migration(tmp.path(), "notes.txt", "not a migration");

    let migrations = discover_migrations(tmp.path()).unwrap();
    let versions: Vec<u32> = migrations.iter().map(|m| m.version.value()).collect();
    assert_eq!(versions, vec![2, 10]);
}

#[test]
fn test_discover_rejects_duplicate_versions() {
    let tmp = tempfile::tempdir().unwrap();
    write_migration(tmp.path(), "0001_a.sql", "SELECT 1;");
    write_migration(tmp.path(), "0001_b.sql", "SELECT 1;");

    let err = discover_migrations(tmp.path()).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateVersion { .. }));
}

#[test]
fn test_discover_missing_dir() {
    let err = discover_migrations(Path::new("/nonexistent/migrations")).unwrap_err();
    assert!(matches!(err, CoreError::MigrationsDirNotFound { .. }));
}

#[test]
fn test_label() {
    let tmp = tempfile::tempdir().unwrap();
    write_migration(tmp.path(), "0007.sql", "SELECT 7;");
    let m = MigrationFile::load(&tmp.path().join("0007.sql")).unwrap();
    assert_eq!(m.label(), "0007");
}

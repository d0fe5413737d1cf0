use super::*;

fn classify(sql: &str) -> StatementInfo {
    Classifier::duckdb().classify(sql).unwrap()
}

#[test]
fn test_drop_table_is_destructive() {
    let info = classify("DROP TABLE users;");
    assert_eq!(info.classification, Classification::Destructive);
    assert_eq!(info.verb, DdlVerb::Drop);
    assert_eq!(info.target.as_deref(), Some("users"));
}

#[test]
fn test_drop_table_if_exists_is_destructive() {
    let info = classify("drop table if exists analytics.events;");
    assert_eq!(info.classification, Classification::Destructive);
    assert_eq!(info.target.as_deref(), Some("analytics.events"));
}

#[test]
fn test_drop_index_is_safe() {
    let info = classify("DROP INDEX idx_users_email;");
    assert_eq!(info.classification, Classification::Safe);
    assert_eq!(info.verb, DdlVerb::Drop);
}

#[test]
fn test_alter_drop_column_is_destructive() {
    let info = classify("ALTER TABLE accounts DROP COLUMN legacy_field;");
    assert_eq!(info.classification, Classification::Destructive);
    assert_eq!(info.verb, DdlVerb::Alter);
    assert_eq!(info.target.as_deref(), Some("accounts"));
}

#[test]
fn test_alter_drop_bare_column_name_is_destructive() {
    // Both dialects accept DROP without the COLUMN keyword.
    let info = classify("ALTER TABLE accounts DROP legacy_field;");
    assert_eq!(info.classification, Classification::Destructive);
    assert_eq!(info.target.as_deref(), Some("accounts"));
}

#[test]
fn test_alter_drop_constraint_is_destructive() {
    let info = classify("ALTER TABLE orders DROP CONSTRAINT orders_fk;");
    assert_eq!(info.classification, Classification::Destructive);
}

#[test]
fn test_alter_with_mixed_clauses_is_wholly_destructive() {
    // The whole statement is destructive; no partial clause stripping.
    let info = classify("ALTER TABLE t ADD COLUMN a INT, DROP COLUMN b;");
    assert_eq!(info.classification, Classification::Destructive);
}

#[test]
fn test_alter_add_column_is_safe() {
    let info = classify("ALTER TABLE users ADD COLUMN email TEXT;");
    assert_eq!(info.classification, Classification::Safe);
    assert_eq!(info.verb, DdlVerb::Alter);
}

#[test]
fn test_alter_drop_default_is_safe() {
    let info = classify("ALTER TABLE t ALTER COLUMN c DROP DEFAULT;");
    assert_eq!(info.classification, Classification::Safe);
}

#[test]
fn test_alter_drop_not_null_is_safe() {
    let info = classify("ALTER TABLE t ALTER COLUMN c DROP NOT NULL;");
    assert_eq!(info.classification, Classification::Safe);
}

#[test]
fn test_column_named_like_drop_is_safe() {
    let info = classify("ALTER TABLE t ADD COLUMN drop_reason TEXT;");
    assert_eq!(info.classification, Classification::Safe);
}

#[test]
fn test_create_table_unguarded() {
    let info = classify("CREATE TABLE foo (id INT);");
    assert_eq!(info.classification, Classification::NonIdempotentCreate);
    assert_eq!(info.verb, DdlVerb::Create);
    assert_eq!(info.target.as_deref(), Some("foo"));
}

#[test]
fn test_create_table_guarded_is_safe() {
    let info = classify("CREATE TABLE IF NOT EXISTS foo (id INT);");
    assert_eq!(info.classification, Classification::Safe);
    assert_eq!(info.target.as_deref(), Some("foo"));
}

#[test]
fn test_create_or_replace_table_is_safe() {
    let info = classify("CREATE OR REPLACE TABLE staging.foo AS SELECT 1;");
    assert_eq!(info.classification, Classification::Safe);
}

#[test]
fn test_create_index_unguarded() {
    let info = classify("CREATE INDEX idx_users_email ON users (email);");
    assert_eq!(info.classification, Classification::NonIdempotentCreate);
    assert_eq!(info.target.as_deref(), Some("idx_users_email"));
}

#[test]
fn test_create_unique_index_unguarded() {
    let info = classify("CREATE UNIQUE INDEX u_idx ON users (email);");
    assert_eq!(info.classification, Classification::NonIdempotentCreate);
}

#[test]
fn test_create_index_guarded_is_safe() {
    let info = classify("CREATE INDEX IF NOT EXISTS idx ON users (email);");
    assert_eq!(info.classification, Classification::Safe);
}

#[test]
fn test_create_index_concurrently_unguarded() {
    let info = Classifier::postgres()
        .classify("CREATE INDEX CONCURRENTLY idx ON users (email);")
        .unwrap();
    assert_eq!(info.classification, Classification::NonIdempotentCreate);
    assert_eq!(info.target.as_deref(), Some("idx"));
}

#[test]
fn test_create_index_concurrently_guarded_is_safe() {
    let info = Classifier::postgres()
        .classify("CREATE INDEX CONCURRENTLY IF NOT EXISTS idx ON users (email);")
        .unwrap();
    assert_eq!(info.classification, Classification::Safe);
    assert_eq!(info.target.as_deref(), Some("idx"));
}

#[test]
fn test_create_view_is_safe() {
    let info = classify("CREATE VIEW v AS SELECT 1;");
    assert_eq!(info.classification, Classification::Safe);
    assert_eq!(info.verb, DdlVerb::Create);
}

#[test]
fn test_case_and_whitespace_insensitive() {
    let info = classify("  dRoP\n\tTaBlE\n  users ;");
    assert_eq!(info.classification, Classification::Destructive);
    assert_eq!(info.target.as_deref(), Some("users"));
}

#[test]
fn test_leading_comment_is_skipped() {
    let info = classify("-- generated\n/* by tool */ DROP TABLE users;");
    assert_eq!(info.classification, Classification::Destructive);
}

#[test]
fn test_comment_only_statement_is_safe() {
    let info = classify("/* DROP TABLE users; kept for audit */");
    assert_eq!(info.classification, Classification::Safe);
    assert_eq!(info.verb, DdlVerb::Other);
}

#[test]
fn test_empty_statement_is_safe() {
    let info = classify("   \n ");
    assert_eq!(info.classification, Classification::Safe);
}

#[test]
fn test_insert_is_safe() {
    let info = classify("INSERT INTO t VALUES (1);");
    assert_eq!(info.classification, Classification::Safe);
    assert_eq!(info.verb, DdlVerb::Other);
}

#[test]
fn test_quoted_target() {
    let info = classify("DROP TABLE \"Weird Name\";");
    assert_eq!(info.classification, Classification::Destructive);
    assert_eq!(info.target.as_deref(), Some("Weird Name"));
}

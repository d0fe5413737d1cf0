use super::*;

#[tokio::test]
async fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
}

#[tokio::test]
async fn test_execute_and_query_rows() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute("CREATE TABLE t (id INT, name TEXT)").await.unwrap();
    db.execute("INSERT INTO t VALUES (1, 'a'), (2, 'b')").await.unwrap();

    let rows = db
        .query_rows("SELECT CAST(id AS VARCHAR), name FROM t ORDER BY id", 2)
        .await
        .unwrap();
    assert_eq!(rows, vec![vec!["1".to_string(), "a".to_string()], vec![
        "2".to_string(),
        "b".to_string()
    ]]);
}

#[tokio::test]
async fn test_relation_exists() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(!db.relation_exists("missing").await.unwrap());
    db.execute("CREATE TABLE present (id INT)").await.unwrap();
    assert!(db.relation_exists("present").await.unwrap());
}

#[tokio::test]
async fn test_transaction_rollback_discards_ddl() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.begin().await.unwrap();
    db.execute("CREATE TABLE scratch (id INT)").await.unwrap();
    db.rollback().await.unwrap();
    assert!(!db.relation_exists("scratch").await.unwrap());
}

#[tokio::test]
async fn test_transaction_commit_keeps_ddl() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.begin().await.unwrap();
    db.execute("CREATE TABLE kept (id INT)").await.unwrap();
    db.commit().await.unwrap();
    assert!(db.relation_exists("kept").await.unwrap());
}

#[tokio::test]
async fn test_advisory_lock_exclusion() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(db.try_advisory_lock("pipeline").await.unwrap());
    // Second acquisition of the same name is refused until release.
    assert!(!db.try_advisory_lock("pipeline").await.unwrap());
    db.advisory_unlock("pipeline").await.unwrap();
    assert!(db.try_advisory_lock("pipeline").await.unwrap());
}

#[tokio::test]
async fn test_advisory_lock_names_are_independent() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(db.try_advisory_lock("a").await.unwrap());
    assert!(db.try_advisory_lock("b").await.unwrap());
}

#[tokio::test]
async fn test_execution_error_carries_statement() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.execute("SELECT * FROM does_not_exist").await.unwrap_err();
    assert!(matches!(err, DbError::ExecutionError(_)));
}

#[tokio::test]
async fn test_file_backed_database() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("guard.duckdb");
    {
        let db = DuckDbBackend::new(path.to_str().unwrap()).unwrap();
        db.execute("CREATE TABLE persisted (id INT)").await.unwrap();
    }
    let db = DuckDbBackend::new(path.to_str().unwrap()).unwrap();
    assert!(db.relation_exists("persisted").await.unwrap());
}

use super::*;
use sg_db::DuckDbBackend;

const TABLE: &str = "_schemaguard_ledger";

async fn ledger_db() -> DuckDbBackend {
    DuckDbBackend::in_memory().unwrap()
}

#[tokio::test]
async fn test_ensure_table_is_idempotent() {
    let db = ledger_db().await;
    let ledger = Ledger::new(&db, TABLE);
    ledger.ensure_table().await.unwrap();
    ledger.ensure_table().await.unwrap();
    assert!(db.relation_exists(TABLE).await.unwrap());
}

#[tokio::test]
async fn test_lookup_missing_is_none() {
    let db = ledger_db().await;
    let ledger = Ledger::new(&db, TABLE);
    ledger.ensure_table().await.unwrap();
    assert!(ledger.lookup("0001").await.unwrap().is_none());
}

#[tokio::test]
async fn test_record_applied_and_lookup() {
    let db = ledger_db().await;
    let ledger = Ledger::new(&db, TABLE);
    ledger.ensure_table().await.unwrap();
    ledger.record_applied("0001", "abc123").await.unwrap();

    let entry = ledger.lookup("0001").await.unwrap().unwrap();
    assert_eq!(entry.version, "0001");
    assert_eq!(entry.checksum, "abc123");
    assert_eq!(entry.status, LedgerStatus::Applied);
}

#[tokio::test]
async fn test_record_applied_twice_is_integrity_fault() {
    let db = ledger_db().await;
    let ledger = Ledger::new(&db, TABLE);
    ledger.ensure_table().await.unwrap();
    ledger.record_applied("0001", "abc").await.unwrap();

    let err = ledger.record_applied("0001", "abc").await.unwrap_err();
    assert!(matches!(err, ApplyError::DuplicateVersion { .. }));
}

#[tokio::test]
async fn test_failed_then_applied_transitions() {
    let db = ledger_db().await;
    let ledger = Ledger::new(&db, TABLE);
    ledger.ensure_table().await.unwrap();

    ledger.record_failed("0002", "aaa").await.unwrap();
    let entry = ledger.lookup("0002").await.unwrap().unwrap();
    assert_eq!(entry.status, LedgerStatus::Failed);

    // Retry of the same version may succeed later.
    ledger.record_applied("0002", "aaa").await.unwrap();
    let entry = ledger.lookup("0002").await.unwrap().unwrap();
    assert_eq!(entry.status, LedgerStatus::Applied);
}

#[tokio::test]
async fn test_record_failed_never_downgrades_applied() {
    let db = ledger_db().await;
    let ledger = Ledger::new(&db, TABLE);
    ledger.ensure_table().await.unwrap();
    ledger.record_applied("0001", "abc").await.unwrap();

    // Applied entries are immutable; a late failure mark must not touch one.
    ledger.record_failed("0001", "abc").await.unwrap();

    let entry = ledger.lookup("0001").await.unwrap().unwrap();
    assert_eq!(entry.status, LedgerStatus::Applied);
    assert_eq!(entry.checksum, "abc");
}

#[tokio::test]
async fn test_record_failed_updates_in_place() {
    let db = ledger_db().await;
    let ledger = Ledger::new(&db, TABLE);
    ledger.ensure_table().await.unwrap();

    ledger.record_failed("0003", "v1").await.unwrap();
    ledger.record_failed("0003", "v2").await.unwrap();

    let entries = ledger.entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].checksum, "v2");
}

#[tokio::test]
async fn test_entries_ordered_by_version() {
    let db = ledger_db().await;
    let ledger = Ledger::new(&db, TABLE);
    ledger.ensure_table().await.unwrap();
    ledger.record_applied("0010", "x").await.unwrap();
    ledger.record_applied("0002", "y").await.unwrap();

    let entries = ledger.entries().await.unwrap();
    let versions: Vec<&str> = entries.iter().map(|e| e.version.as_str()).collect();
    assert_eq!(versions, vec!["0002", "0010"]);
}

use super::*;

fn sample(statement: &str) -> AuditRecord {
    AuditRecord {
        run_id: "run-1".to_string(),
        migration: "0004".to_string(),
        statement: statement.to_string(),
        reason: "drop table".to_string(),
        neutralized_at: Utc::now(),
    }
}

#[test]
fn test_file_sink_appends_json_lines() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("audit.jsonl");
    let sink = FileAuditSink::new(&path);

    sink.record(&sample("DROP TABLE users;")).unwrap();
    sink.record(&sample("DROP TABLE sessions;")).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: AuditRecord = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first.statement, "DROP TABLE users;");
    assert_eq!(first.migration, "0004");
}

#[test]
fn test_memory_sink_collects() {
    let sink = MemoryAuditSink::new();
    sink.record(&sample("DROP TABLE a;")).unwrap();
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].reason, "drop table");
}

#[test]
fn test_null_sink_discards() {
    let sink = NullAuditSink;
    sink.record(&sample("DROP TABLE a;")).unwrap();
}

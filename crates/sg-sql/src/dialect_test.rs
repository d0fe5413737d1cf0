use super::*;
use sqlparser::tokenizer::Token;

#[test]
fn test_from_dialect_name() {
    assert_eq!(from_dialect_name("duckdb").unwrap().name(), "duckdb");
    assert_eq!(from_dialect_name("Postgres").unwrap().name(), "postgres");
    assert_eq!(from_dialect_name("postgresql").unwrap().name(), "postgres");
    assert!(matches!(
        from_dialect_name("oracle"),
        Err(SqlError::UnknownDialect(_))
    ));
}

#[test]
fn test_tokenize_keeps_comments_as_whitespace() {
    let dialect = DuckDbDialect::new();
    let tokens = dialect
        .tokenize("-- note\nCREATE TABLE t (id INT)")
        .unwrap();
    let significant: Vec<&Token> = tokens
        .iter()
        .filter(|t| !matches!(t, Token::Whitespace(_)))
        .collect();
    assert!(significant.len() > 3);
}

#[test]
fn test_tokenize_error_surfaces() {
    let dialect = PostgresDialect::new();
    let err = dialect.tokenize("SELECT 'open").unwrap_err();
    assert!(matches!(err, SqlError::Tokenize { .. }));
}

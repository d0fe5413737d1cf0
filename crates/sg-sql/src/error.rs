//! Error types for sg-sql

use thiserror::Error;

/// SQL splitting, classification, and sanitization errors.
///
/// The `Unterminated*` variants are the ParseError family: statement
/// boundaries are undecidable, so the pipeline aborts before any statement
/// executes.
#[derive(Error, Debug)]
pub enum SqlError {
    /// S001: Tokenizer rejected a statement
    #[error("[S001] SQL tokenization failed: {message}")]
    Tokenize { message: String },

    /// S002: String literal left open at end of input
    #[error("[S002] Unterminated string literal starting at byte {offset}")]
    UnterminatedString { offset: usize },

    /// S003: Block comment left open at end of input
    #[error("[S003] Unterminated block comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },

    /// S004: Dollar-quoted body left open at end of input
    #[error("[S004] Unterminated dollar-quoted string starting at byte {offset}")]
    UnterminatedDollarQuote { offset: usize },

    /// S005: A sanitizer rewrite did not reclassify as safe
    #[error("[S005] Sanitizer rewrite failed verification: {statement}")]
    RewriteFailed { statement: String },

    /// S006: Unknown dialect name
    #[error("[S006] Unknown SQL dialect: {0}")]
    UnknownDialect(String),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;

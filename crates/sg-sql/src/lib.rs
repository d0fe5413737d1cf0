//! sg-sql - SQL statement layer for SchemaGuard
//!
//! This crate turns a generated migration file into something safe to run:
//! the splitter cuts the raw text into verbatim statement spans, the
//! classifier tags each span as safe / destructive / non-idempotent-create,
//! and the sanitizer neutralizes destructive statements and guards
//! non-idempotent creations. Statement classification is keyword-level on
//! top of the sqlparser tokenizer; a full SQL parse is deliberately not
//! required.

pub mod classify;
pub mod dialect;
pub mod error;
pub mod sanitize;
pub mod splitter;

pub use classify::{Classification, Classifier, DdlVerb, StatementInfo};
pub use dialect::{DuckDbDialect, PostgresDialect, SqlDialect};
pub use error::SqlError;
pub use sanitize::{Neutralized, SanitizedStatement, Sanitizer};
pub use splitter::{split_statements, StatementSpan};

//! sg-db - Database abstraction layer for SchemaGuard
//!
//! This crate provides the `Database` capability trait the applier depends
//! on (execute, transactions, advisory lock) and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;

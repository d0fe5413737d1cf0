//! SQL dialect abstraction over the sqlparser tokenizer

use sqlparser::dialect::{
    Dialect, DuckDbDialect as SqlParserDuckDb, PostgreSqlDialect as SqlParserPostgres,
};
use sqlparser::tokenizer::{Token, Tokenizer};

use crate::error::{SqlError, SqlResult};

/// Trait for SQL dialect implementations.
///
/// Classification only needs the tokenizer, not a full parse: generated DDL
/// routinely contains vendor clauses a strict parser would reject, while the
/// token stream is stable across all of them.
pub trait SqlDialect: Send + Sync {
    /// Get the underlying sqlparser dialect
    fn tokenizer_dialect(&self) -> &dyn Dialect;

    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Tokenize a single statement's text
    fn tokenize(&self, sql: &str) -> SqlResult<Vec<Token>> {
        Tokenizer::new(self.tokenizer_dialect(), sql)
            .tokenize()
            .map_err(|e| SqlError::Tokenize {
                message: e.to_string(),
            })
    }
}

/// Build a dialect from its config name
pub fn from_dialect_name(name: &str) -> SqlResult<Box<dyn SqlDialect>> {
    match name.to_lowercase().as_str() {
        "duckdb" => Ok(Box::new(DuckDbDialect::new())),
        "postgres" | "postgresql" => Ok(Box::new(PostgresDialect::new())),
        _ => Err(SqlError::UnknownDialect(name.to_string())),
    }
}

/// DuckDB SQL dialect
pub struct DuckDbDialect {
    dialect: SqlParserDuckDb,
}

impl DuckDbDialect {
    /// Create a new DuckDB dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserDuckDb {},
        }
    }
}

impl Default for DuckDbDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for DuckDbDialect {
    fn tokenizer_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "duckdb"
    }
}

/// PostgreSQL dialect
pub struct PostgresDialect {
    dialect: SqlParserPostgres,
}

impl PostgresDialect {
    /// Create a new PostgreSQL dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserPostgres {},
        }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for PostgresDialect {
    fn tokenizer_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;

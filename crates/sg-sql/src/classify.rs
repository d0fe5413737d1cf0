//! Statement classifier.
//!
//! Tags each statement as safe, destructive, or non-idempotent-create by
//! pattern matching on its keyword stream. The match is case-insensitive
//! and ignores comments and whitespace because it runs on the sqlparser
//! token stream rather than the raw text.

use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::Token;
use std::fmt;

use crate::dialect::{DuckDbDialect, PostgresDialect, SqlDialect};
use crate::error::SqlResult;

/// Pipeline classification of a single statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Passes through the sanitizer unchanged
    Safe,
    /// Neutralized by the sanitizer; never reaches the database
    Destructive,
    /// Rewritten with an existence guard before execution
    NonIdempotentCreate,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Classification::Safe => "safe",
            Classification::Destructive => "destructive",
            Classification::NonIdempotentCreate => "non-idempotent-create",
        };
        f.write_str(s)
    }
}

/// Leading DDL verb of a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdlVerb {
    Create,
    Alter,
    Drop,
    Other,
}

impl fmt::Display for DdlVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DdlVerb::Create => "CREATE",
            DdlVerb::Alter => "ALTER",
            DdlVerb::Drop => "DROP",
            DdlVerb::Other => "OTHER",
        };
        f.write_str(s)
    }
}

/// Classification result for one statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementInfo {
    pub classification: Classification,
    pub verb: DdlVerb,
    /// Target object name, when one could be read off the keyword stream
    pub target: Option<String>,
}

/// Statement classifier over a SQL dialect's token stream
pub struct Classifier {
    dialect: Box<dyn SqlDialect>,
}

impl Classifier {
    /// Create a classifier with an explicit dialect
    pub fn new(dialect: Box<dyn SqlDialect>) -> Self {
        Self { dialect }
    }

    /// Create a classifier with the DuckDB dialect
    pub fn duckdb() -> Self {
        Self::new(Box::new(DuckDbDialect::new()))
    }

    /// Create a classifier with the PostgreSQL dialect
    pub fn postgres() -> Self {
        Self::new(Box::new(PostgresDialect::new()))
    }

    /// Classify a single statement's text.
    ///
    /// Comment-only and empty statements classify safe. A statement the
    /// tokenizer cannot lex is an error, never silently safe.
    pub fn classify(&self, sql: &str) -> SqlResult<StatementInfo> {
        let tokens = self.dialect.tokenize(sql)?;
        let toks: Vec<&Token> = tokens
            .iter()
            .filter(|t| !matches!(t, Token::Whitespace(_)))
            .collect();

        let info = match keyword_at(&toks, 0) {
            Some(Keyword::DROP) => classify_drop(&toks),
            Some(Keyword::ALTER) if keyword_at(&toks, 1) == Some(Keyword::TABLE) => {
                classify_alter_table(&toks)
            }
            Some(Keyword::CREATE) => classify_create(&toks),
            _ => StatementInfo {
                classification: Classification::Safe,
                verb: DdlVerb::Other,
                target: None,
            },
        };

        log::trace!(
            "classified as {} (verb {}, target {:?})",
            info.classification,
            info.verb,
            info.target
        );
        Ok(info)
    }

    /// Dialect name, for logs
    pub fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::duckdb()
    }
}

/// `DROP TABLE [IF EXISTS] <name>` is destructive; any other DROP falls
/// through to safe (dropping an index or view loses no row data).
fn classify_drop(toks: &[&Token]) -> StatementInfo {
    if keyword_at(toks, 1) == Some(Keyword::TABLE) {
        StatementInfo {
            classification: Classification::Destructive,
            verb: DdlVerb::Drop,
            target: ident_at(toks, 2),
        }
    } else {
        StatementInfo {
            classification: Classification::Safe,
            verb: DdlVerb::Drop,
            target: None,
        }
    }
}

/// An `ALTER TABLE` whose clause list drops a column or constraint marks
/// the whole statement destructive, the keyword-omitted `DROP <column>`
/// form included. Partial clause stripping is not attempted: it risks
/// emitting invalid SQL.
fn classify_alter_table(toks: &[&Token]) -> StatementInfo {
    let mut i = 2;
    if keyword_at(toks, i) == Some(Keyword::ONLY) {
        i += 1;
    }
    let target = ident_at(toks, i);

    let mut destructive = false;
    for j in i..toks.len() {
        if keyword_at(toks, j) != Some(Keyword::DROP) {
            continue;
        }
        // `ALTER COLUMN c DROP DEFAULT` / `DROP NOT NULL` remove a
        // constraint on the column, not the column itself.
        match toks.get(j + 1) {
            Some(Token::Word(w)) if !matches!(w.keyword, Keyword::DEFAULT | Keyword::NOT) => {
                destructive = true;
                break;
            }
            _ => {}
        }
    }

    StatementInfo {
        classification: if destructive {
            Classification::Destructive
        } else {
            Classification::Safe
        },
        verb: DdlVerb::Alter,
        target,
    }
}

/// `CREATE TABLE` / `CREATE [UNIQUE] INDEX` without an existence guard is
/// non-idempotent. `CREATE OR REPLACE` is already idempotent, as is any
/// other CREATE object type.
fn classify_create(toks: &[&Token]) -> StatementInfo {
    let mut i = 1;
    let mut or_replace = false;
    loop {
        match keyword_at(toks, i) {
            Some(Keyword::OR) if keyword_at(toks, i + 1) == Some(Keyword::REPLACE) => {
                or_replace = true;
                i += 2;
            }
            Some(
                Keyword::UNIQUE
                | Keyword::TEMP
                | Keyword::TEMPORARY
                | Keyword::GLOBAL
                | Keyword::LOCAL,
            ) => i += 1,
            _ => break,
        }
    }

    let object = keyword_at(toks, i);
    if !matches!(object, Some(Keyword::TABLE) | Some(Keyword::INDEX)) {
        return StatementInfo {
            classification: Classification::Safe,
            verb: DdlVerb::Create,
            target: ident_at(toks, i + 1),
        };
    }

    // `CREATE INDEX CONCURRENTLY IF NOT EXISTS ...` puts the guard after
    // the concurrency modifier.
    let mut g = i + 1;
    if object == Some(Keyword::INDEX) && keyword_at(toks, g) == Some(Keyword::CONCURRENTLY) {
        g += 1;
    }

    let guarded = keyword_at(toks, g) == Some(Keyword::IF)
        && keyword_at(toks, g + 1) == Some(Keyword::NOT)
        && keyword_at(toks, g + 2) == Some(Keyword::EXISTS);

    StatementInfo {
        classification: if guarded || or_replace {
            Classification::Safe
        } else {
            Classification::NonIdempotentCreate
        },
        verb: DdlVerb::Create,
        target: ident_at(toks, g),
    }
}

fn keyword_at(toks: &[&Token], i: usize) -> Option<Keyword> {
    match toks.get(i) {
        Some(Token::Word(w)) => Some(w.keyword),
        _ => None,
    }
}

/// Read a possibly qualified identifier at `i`, skipping a leading
/// `IF [NOT] EXISTS`.
fn ident_at(toks: &[&Token], mut i: usize) -> Option<String> {
    if keyword_at(toks, i) == Some(Keyword::IF) {
        i += 1;
        if keyword_at(toks, i) == Some(Keyword::NOT) {
            i += 1;
        }
        if keyword_at(toks, i) == Some(Keyword::EXISTS) {
            i += 1;
        }
    }

    let mut parts = Vec::new();
    loop {
        match toks.get(i) {
            Some(Token::Word(w)) => parts.push(w.value.clone()),
            _ => break,
        }
        if matches!(toks.get(i + 1), Some(Token::Period)) {
            i += 2;
        } else {
            break;
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("."))
    }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;

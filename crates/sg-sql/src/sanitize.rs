//! Statement sanitizer.
//!
//! Rewrites classified statements so nothing destructive is ever handed to
//! the database: destructive statements become inert audit comments that
//! preserve the original text, non-idempotent creations gain an
//! `IF NOT EXISTS` guard, and safe statements pass through byte-identical.
//! Sanitization is idempotent: running it over its own output is a no-op.

use crate::classify::{Classification, Classifier, DdlVerb};
use crate::error::{SqlError, SqlResult};
use crate::splitter::{has_executable_content, skip_insignificant, StatementSpan};

/// Marker prefix used in neutralization comments
pub const NEUTRALIZED_MARKER: &str = "schemaguard: destructive statement neutralized";

/// One statement after sanitization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedStatement {
    /// Text to execute (or the replacement comment)
    pub text: String,

    /// Whether the text contains anything to execute
    pub executable: bool,

    /// Present when a destructive statement was neutralized
    pub neutralized: Option<Neutralized>,
}

/// Record of one neutralized destructive statement, destined for the audit
/// log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neutralized {
    /// Verbatim original statement text
    pub original: String,

    /// Why the statement was classified destructive
    pub reason: String,

    /// Target object, when known
    pub target: Option<String>,
}

/// Sanitizer over a classifier. The classifier is also the verification
/// oracle: every rewrite must reclassify as safe.
pub struct Sanitizer {
    classifier: Classifier,
}

impl Sanitizer {
    /// Create a sanitizer around a classifier
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Sanitize an ordered list of statement spans.
    pub fn sanitize(&self, spans: &[StatementSpan]) -> SqlResult<Vec<SanitizedStatement>> {
        spans
            .iter()
            .map(|span| self.sanitize_statement(&span.text))
            .collect()
    }

    /// Sanitize a single statement's text.
    pub fn sanitize_statement(&self, sql: &str) -> SqlResult<SanitizedStatement> {
        let info = self.classifier.classify(sql)?;
        match info.classification {
            Classification::Safe => Ok(SanitizedStatement {
                text: sql.to_string(),
                executable: has_executable_content(sql),
                neutralized: None,
            }),
            Classification::Destructive => {
                let reason = match info.verb {
                    DdlVerb::Drop => "drop table".to_string(),
                    DdlVerb::Alter => "alter table drops a column or constraint".to_string(),
                    other => format!("destructive {} statement", other),
                };
                log::warn!(
                    "neutralizing destructive statement ({reason}): {}",
                    sql.trim()
                );
                Ok(SanitizedStatement {
                    text: neutralization_comment(sql),
                    executable: false,
                    neutralized: Some(Neutralized {
                        original: sql.to_string(),
                        reason,
                        target: info.target,
                    }),
                })
            }
            Classification::NonIdempotentCreate => {
                let rewritten = insert_existence_guard(sql).ok_or_else(|| {
                    SqlError::RewriteFailed {
                        statement: sql.trim().to_string(),
                    }
                })?;
                // The rewrite must be provably safe, not just plausible.
                let check = self.classifier.classify(&rewritten)?;
                if check.classification != Classification::Safe {
                    return Err(SqlError::RewriteFailed {
                        statement: sql.trim().to_string(),
                    });
                }
                log::debug!("guarded non-idempotent create: {}", rewritten.trim());
                Ok(SanitizedStatement {
                    text: rewritten,
                    executable: true,
                    neutralized: None,
                })
            }
        }
    }
}

/// Wrap a destructive statement in a block comment, keeping the original
/// text readable for audit. Comment delimiters inside the original are
/// defused so the wrapper cannot terminate early.
fn neutralization_comment(sql: &str) -> String {
    let defused = sql.replace("/*", "/ *").replace("*/", "* /");
    format!("/* {}\n{}\n*/", NEUTRALIZED_MARKER, defused)
}

/// Splice ` IF NOT EXISTS` immediately after the object-type keyword of a
/// `CREATE TABLE` / `CREATE [UNIQUE] INDEX` statement, altering nothing
/// else. `INDEX CONCURRENTLY` takes the guard after the modifier. Returns
/// `None` when the expected keyword head is not found.
fn insert_existence_guard(sql: &str) -> Option<String> {
    let (start, end) = next_word(sql, 0)?;
    if !sql[start..end].eq_ignore_ascii_case("create") {
        return None;
    }

    let mut at = end;
    loop {
        let (start, end) = next_word(sql, at)?;
        let word = &sql[start..end];
        if word.eq_ignore_ascii_case("table") || word.eq_ignore_ascii_case("index") {
            let mut splice_at = end;
            if word.eq_ignore_ascii_case("index") {
                if let Some((s, e)) = next_word(sql, end) {
                    if sql[s..e].eq_ignore_ascii_case("concurrently") {
                        splice_at = e;
                    }
                }
            }
            let mut out = String::with_capacity(sql.len() + 14);
            out.push_str(&sql[..splice_at]);
            out.push_str(" IF NOT EXISTS");
            out.push_str(&sql[splice_at..]);
            return Some(out);
        }
        let modifier = ["unique", "temp", "temporary", "global", "local"]
            .iter()
            .any(|m| word.eq_ignore_ascii_case(m));
        if !modifier {
            return None;
        }
        at = end;
    }
}

/// Next bare word after `from`, skipping whitespace and comments.
fn next_word(sql: &str, from: usize) -> Option<(usize, usize)> {
    let start = skip_insignificant(sql, from);
    let bytes = sql.as_bytes();
    if start >= bytes.len() {
        return None;
    }
    let mut end = start;
    while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
        end += 1;
    }
    if end == start {
        None
    } else {
        Some((start, end))
    }
}

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod tests;

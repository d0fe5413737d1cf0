//! Statement splitter.
//!
//! Cuts raw migration text into an ordered sequence of verbatim statement
//! spans, splitting on `;` terminators while respecting string literals,
//! quoted identifiers, dollar-quoted bodies, and comments. Concatenating
//! the spans in order reproduces the input byte for byte, so nothing is
//! lost before sanitization.

use crate::error::{SqlError, SqlResult};

/// One verbatim slice of a migration file, terminator included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSpan {
    /// Verbatim source text, comments and whitespace included
    pub text: String,

    /// Byte offset of the span within the migration file
    pub offset: usize,
}

impl StatementSpan {
    /// True when the span contains something beyond whitespace and comments.
    pub fn is_executable(&self) -> bool {
        has_executable_content(&self.text)
    }
}

/// Split raw migration text into statement spans.
///
/// A trailing fragment without a terminator becomes a final span, as does a
/// run of trailing comments or whitespace. Unterminated literals and block
/// comments are a hard error: statement boundaries would be undecidable.
pub fn split_statements(sql: &str) -> SqlResult<Vec<StatementSpan>> {
    let bytes = sql.as_bytes();
    let mut spans = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' => i = scan_quoted(sql, i, b'\'')?,
            b'"' => i = scan_quoted(sql, i, b'"')?,
            b'-' if bytes.get(i + 1) == Some(&b'-') => i = scan_line_comment(sql, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = scan_block_comment(sql, i)?,
            b'$' => i = scan_dollar_quote(sql, i)?,
            b';' => {
                spans.push(StatementSpan {
                    text: sql[start..=i].to_string(),
                    offset: start,
                });
                start = i + 1;
                i += 1;
            }
            _ => i += 1,
        }
    }

    if start < sql.len() {
        spans.push(StatementSpan {
            text: sql[start..].to_string(),
            offset: start,
        });
    }

    Ok(spans)
}

/// True when `sql` contains anything beyond whitespace and comments.
pub fn has_executable_content(sql: &str) -> bool {
    skip_insignificant(sql, 0) < sql.len()
}

/// Byte index of the next character that is neither whitespace nor part of a
/// comment, or `sql.len()` when none remains.
///
/// Assumes `sql` already passed the splitter, so comments are terminated.
pub(crate) fn skip_insignificant(sql: &str, from: usize) -> usize {
    let bytes = sql.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b if b.is_ascii_whitespace() => i += 1,
            b'-' if bytes.get(i + 1) == Some(&b'-') => i = scan_line_comment(sql, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => match scan_block_comment(sql, i) {
                Ok(end) => i = end,
                Err(_) => return sql.len(),
            },
            _ => return i,
        }
    }
    sql.len()
}

/// Advance past a quoted region starting at `start`. Doubled quote characters
/// fall out naturally: the scanner exits at the first closing quote and the
/// outer loop re-enters at the second.
fn scan_quoted(sql: &str, start: usize, quote: u8) -> SqlResult<usize> {
    let bytes = sql.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            return Ok(i + 1);
        }
        i += 1;
    }
    Err(SqlError::UnterminatedString { offset: start })
}

/// Advance past a `--` comment, newline included.
fn scan_line_comment(sql: &str, start: usize) -> usize {
    match sql[start..].find('\n') {
        Some(pos) => start + pos + 1,
        None => sql.len(),
    }
}

/// Advance past a `/* */` comment, honoring nesting.
fn scan_block_comment(sql: &str, start: usize) -> SqlResult<usize> {
    let bytes = sql.as_bytes();
    let mut depth = 1usize;
    let mut i = start + 2;
    while i < bytes.len() {
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
            depth += 1;
            i += 2;
        } else if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return Ok(i);
            }
        } else {
            i += 1;
        }
    }
    Err(SqlError::UnterminatedComment { offset: start })
}

/// Advance past a dollar-quoted body (`$tag$ ... $tag$`). A `$` that does
/// not open a valid tag (e.g. a `$1` placeholder) is left alone.
fn scan_dollar_quote(sql: &str, start: usize) -> SqlResult<usize> {
    let bytes = sql.as_bytes();
    let mut j = start + 1;
    while j < bytes.len() && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'_') {
        j += 1;
    }
    if j >= bytes.len() || bytes[j] != b'$' {
        return Ok(start + 1);
    }
    let opener = &sql[start..=j];
    match sql[j + 1..].find(opener) {
        Some(pos) => Ok(j + 1 + pos + opener.len()),
        None => Err(SqlError::UnterminatedDollarQuote { offset: start }),
    }
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;

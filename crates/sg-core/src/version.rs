//! Strongly-typed migration version.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered numeric version of a migration, parsed from the leading digits of
/// its file name.
///
/// Wrapping the number prevents accidental mixing with row counts or other
/// integers, and `Display` pins the zero-padded form the ledger keys on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MigrationVersion(u32);

impl MigrationVersion {
    /// Create a version from its numeric value.
    pub fn new(n: u32) -> Self {
        Self(n)
    }

    /// Parse the leading decimal digits of a migration file stem.
    ///
    /// Returns `None` when the stem does not start with a digit.
    pub fn parse_stem(stem: &str) -> Option<Self> {
        let digits: String = stem.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse::<u32>().ok().map(Self)
    }

    /// Return the numeric value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for MigrationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

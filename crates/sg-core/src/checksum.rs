//! SHA-256 checksums for migration content drift detection.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 checksum of a migration's raw text
pub fn compute_checksum(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

/// Shorten a checksum for log lines and status output
pub fn short_checksum(checksum: &str) -> &str {
    &checksum[..checksum.len().min(12)]
}

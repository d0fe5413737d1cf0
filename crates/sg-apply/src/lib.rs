//! sg-apply - Migration applier for SchemaGuard
//!
//! Applies sanitized migrations transactionally, records them in the
//! append-only ledger, and serializes concurrent runs behind an advisory
//! lock. Enforces at-most-once, in-order application across restarts.

pub mod applier;
pub mod audit;
pub mod error;
pub mod ledger;

pub use applier::{Applier, ApplyOptions, ApplyReport};
pub use audit::{AuditRecord, AuditSink, FileAuditSink, MemoryAuditSink, NullAuditSink};
pub use error::ApplyError;
pub use ledger::{Ledger, LedgerEntry, LedgerStatus};

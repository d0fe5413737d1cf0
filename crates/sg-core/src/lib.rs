//! sg-core - Core library for SchemaGuard
//!
//! This crate provides the shared types used across the migration pipeline:
//! configuration parsing, SHA-256 checksums, migration file discovery, and
//! the strongly-typed migration version.

pub mod checksum;
pub mod config;
pub mod error;
pub mod migration;
pub mod version;

pub use checksum::compute_checksum;
pub use config::{Config, Dialect};
pub use error::CoreError;
pub use migration::{discover_migrations, MigrationFile};
pub use version::MigrationVersion;

//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// SchemaGuard - classify, sanitize, and safely apply generated SQL migrations
#[derive(Parser, Debug)]
#[command(name = "sg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitize and apply all pending migrations
    Apply(ApplyArgs),

    /// Show ledger state against the migrations directory
    Status(StatusArgs),

    /// Preview sanitized migration SQL without applying it
    Sanitize(SanitizeArgs),
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Fail immediately if another run holds the advisory lock,
    /// instead of waiting
    #[arg(long)]
    pub no_wait: bool,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

/// Arguments for the sanitize command
#[derive(Args, Debug)]
pub struct SanitizeArgs {
    /// Write sanitized copies into this directory instead of printing.
    /// Originals are never touched; re-running overwrites with identical
    /// content.
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

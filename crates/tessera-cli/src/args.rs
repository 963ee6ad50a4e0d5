//! Command-line arguments of the `tessera` dry-run driver.
//!
//! A dry run reads a batch file (a backend snapshot plus the rows to migrate)
//! and writes the layouts the rows would receive, without touching any site.

use clap::Parser;

/// Dry-run layout migration of a batch of legacy rows
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Batch file: JSON with a `store` snapshot and the `rows` to migrate
    #[arg(help = "Path to the batch file (JSON)")]
    pub input: String,

    /// Where to write the migrated layouts and the migration messages
    #[arg(short, long, default_value = "layouts.json")]
    pub output: String,

    /// Process step configuration (TOML); searched for when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

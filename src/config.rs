//! Command-line configuration

use clap::Parser;
use std::path::PathBuf;

/// Default database file, relative to the working directory
pub const DEFAULT_DB_FILE: &str = "store.db";

/// When mutations are written to the database file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitMode {
    /// Changes stay in an open transaction until the operator saves
    #[default]
    Manual,
    /// Every mutation is committed as soon as it succeeds
    Auto,
}

/// Interactive product, customer and order tracker backed by SQLite
#[derive(Parser, Debug)]
#[command(name = "order_tracker")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, default_value = DEFAULT_DB_FILE)]
    pub database: PathBuf,

    /// Commit every change immediately instead of waiting for "save"
    #[arg(long, default_value_t = false)]
    pub autocommit: bool,

    /// Do not insert the demonstration products, customers and orders on startup
    #[arg(long, default_value_t = false)]
    pub skip_seed: bool,

    /// Log informational messages (RUST_LOG takes precedence)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    pub fn commit_mode(&self) -> CommitMode {
        if self.autocommit {
            CommitMode::Auto
        } else {
            CommitMode::Manual
        }
    }

    /// Default log filter when RUST_LOG is not set.
    ///
    /// The menu is printed on stdout, so routine logging stays quiet unless asked for.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

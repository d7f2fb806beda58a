use clap::{Parser, Subcommand};
use nationality_core::common::DEFAULT_CACHE_CAPACITY;

/// CLI arguments for the nationality tool
#[derive(Debug, Parser)]
#[command(
    name = "nationality",
    version,
    about = "Inspect the nationality catalog, search it, and drive a scripted picker session"
)]
pub struct CliArgs {
    /// Path to a JSON (or .json.gz) catalog replacing the builtin one
    #[arg(short = 'c', long = "catalog", global = true)]
    pub catalog: Option<String>,

    /// Number of distinct search queries kept in the cache
    #[arg(long = "cache-capacity", global = true, default_value_t = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show catalog size and cache counters
    Stats,

    /// List all selectable entries in display order
    Countries,

    /// Resolve a code exactly as stored (case-sensitive)
    Resolve {
        /// Country code (e.g. KR) or "unknown"
        code: String,
    },

    /// Print the flag for a code (case-insensitive)
    Flag { code: String },

    /// Print the display name for a code
    Name { code: String },

    /// Search names containing a substring (case-insensitive)
    Search {
        /// Substring to search; blank lists everything
        query: String,
    },

    /// Feed keys to a picker that persists every commit immediately
    Select {
        /// Comma-separated keys, e.g. enter,k,o,r,down,enter
        #[arg(short = 'k', long = "keys", value_delimiter = ',')]
        keys: Vec<String>,

        /// Make the profile backend reject every update
        #[arg(long = "fail")]
        fail: bool,
    },
}

//! CLI argument definitions using clap derive

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// EpiLab - Offline-capable incubation tracker
///
/// Tracks timed lab samples with local persistence, live status
/// derivation, calendar/CSV export, and an offline fetch cache.
#[derive(Parser, Debug)]
#[command(name = "epilab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "EPILAB_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a new incubation
    Add(AddArgs),

    /// Edit an existing incubation
    Edit(EditArgs),

    /// Delete an incubation (asks for confirmation)
    Remove(RemoveArgs),

    /// Copy an incubation under a fresh id
    Duplicate(DuplicateArgs),

    /// List incubations with live status
    List(ListArgs),

    /// Re-render statuses on a live clock
    Watch(WatchArgs),

    /// Export the collection as a calendar or CSV file
    Export(ExportArgs),

    /// Print a Google Calendar link for one incubation
    Link(LinkArgs),

    /// Fetch a URL through the offline cache proxy
    Fetch(FetchArgs),

    /// Inspect or clear the offline cache
    Cache(CacheArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the add command
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Sample name
    pub name: String,

    /// Start time (RFC3339 or "YYYY-MM-DDTHH:MM"; defaults to now)
    #[arg(short, long, value_parser = parse_timestamp)]
    pub start: Option<DateTime<Utc>>,

    /// End time; overrides --hours/--minutes when given
    #[arg(short, long, value_parser = parse_timestamp, conflicts_with_all = ["hours", "minutes"])]
    pub end: Option<DateTime<Utc>>,

    /// Incubation duration, hours part
    #[arg(long, default_value = "1")]
    pub hours: u32,

    /// Incubation duration, minutes part
    #[arg(long, default_value = "0")]
    pub minutes: u32,

    /// Target temperature (e.g. "30C", "RT")
    #[arg(short, long)]
    pub temperature: Option<String>,

    /// Location (e.g. "Incubator B2")
    #[arg(short, long)]
    pub location: Option<String>,

    /// Free-text notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

/// Arguments for the edit command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Sample id prefix or exact name
    pub sample: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New start time
    #[arg(short, long, value_parser = parse_timestamp)]
    pub start: Option<DateTime<Utc>>,

    /// New end time
    #[arg(short, long, value_parser = parse_timestamp, conflicts_with_all = ["hours", "minutes"])]
    pub end: Option<DateTime<Utc>>,

    /// New duration from start, hours part
    #[arg(long)]
    pub hours: Option<u32>,

    /// New duration from start, minutes part
    #[arg(long)]
    pub minutes: Option<u32>,

    /// New temperature (empty string clears it)
    #[arg(short, long)]
    pub temperature: Option<String>,

    /// New location (empty string clears it)
    #[arg(short, long)]
    pub location: Option<String>,

    /// New notes (empty string clears them)
    #[arg(short, long)]
    pub notes: Option<String>,
}

/// Arguments for the remove command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Sample id prefix or exact name
    pub sample: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the duplicate command
#[derive(Parser, Debug)]
pub struct DuplicateArgs {
    /// Sample id prefix or exact name
    pub sample: String,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show only samples in this state
    #[arg(short = 'S', long, default_value = "all")]
    pub status: StatusFilter,

    /// Free-text search over name, temperature, location, notes
    #[arg(short, long)]
    pub query: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the watch command
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Free-text search over name, temperature, location, notes
    #[arg(short, long)]
    pub query: Option<String>,

    /// Stop after N refreshes (0 = run until interrupted)
    #[arg(long, default_value = "0")]
    pub ticks: u64,
}

/// Arguments for the export command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Export format
    pub format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export a single sample (id prefix or exact name)
    #[arg(long)]
    pub sample: Option<String>,
}

/// Arguments for the link command
#[derive(Parser, Debug)]
pub struct LinkArgs {
    /// Sample id prefix or exact name
    pub sample: String,
}

/// Arguments for the fetch command
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// URL to fetch
    pub url: String,

    /// Treat as a full-page navigation (always resolves to some page)
    #[arg(long)]
    pub navigate: bool,

    /// HTTP method (only GET responses are cached)
    #[arg(short, long, default_value = "GET")]
    pub method: String,

    /// Write the response body to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show cache store location and contents
    Info,

    /// Remove every cached entry
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the static offline document
    Offline,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. lifecycle.grace_secs)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Export file format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Calendar document (.ics)
    Ics,
    /// Tabular log (.csv)
    Csv,
}

/// Status filter for list/watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    All,
    Scheduled,
    Running,
    Completed,
    Overdue,
}

/// Parse a CLI timestamp: RFC3339, or a naive `YYYY-MM-DDTHH:MM[:SS]`
/// treated as UTC.
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }

    Err(format!(
        "invalid timestamp '{}': expected RFC3339 or YYYY-MM-DDTHH:MM",
        s
    ))
}

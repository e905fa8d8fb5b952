//! CLI argument definitions for the compare command.

use std::time::Duration;

use clap::{Args, ValueEnum};
use mongo_cmp_collector::ALL_DATABASES;

use super::duration::parse_duration;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One table per database
    Table,
    /// The whole report as JSON
    Json,
}

/// Arguments for comparing two MongoDB deployments.
#[derive(Args, Clone, Debug)]
pub struct CompareArgs {
    /// Connection string to the source database
    #[arg(long, short = 'f', env = "MONGO_CMP_FROM")]
    pub from: String,

    /// Connection string to the destination database
    #[arg(long, short = 't', env = "MONGO_CMP_TO")]
    pub to: String,

    /// Timeout for every MongoDB operation (e.g. 500ms, 15s, 2m)
    #[arg(long, default_value = "15s", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Name of the database to compare (default: all databases)
    #[arg(long, short = 'd', default_value = ALL_DATABASES)]
    pub database: String,

    /// Collect per-collection stats and document counts
    #[arg(long, short = 's')]
    pub show_details: bool,

    /// Log level (debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Do not draw progress bars
    #[arg(long)]
    pub no_progress: bool,
}

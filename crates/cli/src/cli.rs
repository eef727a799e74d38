//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Blacklist Syncer - threat-intelligence feed synchronizer
#[derive(Parser, Debug)]
#[command(
    name = "blacklist-syncer",
    author,
    version,
    about = "Threat-intelligence blacklist synchronizer",
    long_about = "Keeps a local host-reputation store synchronized with external\n\
                  threat-intelligence feeds and answers blacklist lookups against it."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "BLACKLIST_SYNCER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "BLACKLIST_SYNCER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refresh every stale source
    Update(UpdateArgs),

    /// Refresh stale sources, then look hosts up in the store
    Lookup(LookupArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display resolved sources without fetching
    Info(InfoArgs),
}

/// Arguments for the `update` command
#[derive(Parser, Debug, Clone)]
pub struct UpdateArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "blacklist.toml",
        env = "BLACKLIST_SYNCER_CONFIG"
    )]
    pub config: PathBuf,

    /// Expose Prometheus metrics on this port during the run
    #[arg(long, env = "BLACKLIST_SYNCER_METRICS_PORT")]
    pub metrics_port: Option<u16>,
}

/// Arguments for the `lookup` command
#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "blacklist.toml",
        env = "BLACKLIST_SYNCER_CONFIG"
    )]
    pub config: PathBuf,

    /// Hosts to look up
    #[arg(required = true)]
    pub hosts: Vec<String>,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "blacklist.toml",
        env = "BLACKLIST_SYNCER_CONFIG"
    )]
    pub config: PathBuf,
}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "blacklist.toml",
        env = "BLACKLIST_SYNCER_CONFIG"
    )]
    pub config: PathBuf,
}

/// Log output format
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LogFormat {
    /// JSON structured logs
    Json,
    /// Human-readable format
    Pretty,
    /// Compact single-line format
    Compact,
}

//! CLI arguments and subcommands for herakles-process-monitor.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Configuration format options for output
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Output format for the snapshot report
#[derive(Debug, Clone, ValueEnum)]
pub enum ReportFormat {
    Text,
    Yaml,
    Json,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "herakles-process-monitor",
    about = "Linux /proc sampler for system and per-process CPU, memory and uptime",
    long_about = "Linux /proc sampler for system and per-process CPU, memory and uptime.\n\n\
                  Reads the kernel accounting files under /proc and prints OS, kernel, \
                  memory and CPU utilisation, process counts and a per-process table.",
    author = "Michael Moll <exporter@herakles.now> - Herakles",
    version = "0.1.0",
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level (default: config file value, then info)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,

    /// Root of the proc filesystem
    #[arg(long)]
    pub proc_root: Option<PathBuf>,

    /// OS release file
    #[arg(long)]
    pub os_release: Option<PathBuf>,

    /// Account database file
    #[arg(long)]
    pub passwd: Option<PathBuf>,

    /// Override kernel clock ticks per second (default: sysconf)
    #[arg(long)]
    pub ticks_per_second: Option<u64>,

    /// CPU utilisation mode: cumulative or delta
    #[arg(long)]
    pub cpu_mode: Option<String>,

    /// Interval between the two samples in delta mode (milliseconds)
    #[arg(long)]
    pub sample_interval_ms: Option<u64>,

    /// Maximum number of processes to sample
    #[arg(long)]
    pub max_processes: Option<usize>,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sample the system once and print a report (default)
    Snapshot {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,

        /// Print only the first N processes (pid order)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Validate that the accounting files are readable
    Check,

    /// Generate configuration files
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,
    },
}

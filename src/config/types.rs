//! Configuration types.
//!
//! The library-facing [`Config`] struct carries no CLI dependencies; the
//! binary maps clap arguments onto it in `main.rs`.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_BIND_HOST, DEFAULT_DNSBL_ZONE, DEFAULT_MAX_CONCURRENCY, DEFAULT_PORT,
};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// Construct programmatically or via `Default`; the CLI binary fills this
/// in from parsed arguments.
///
/// # Examples
///
/// ```no_run
/// use ip_reputation::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: PathBuf::from("addresses.txt"),
///     max_concurrency: 8,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// File to read address candidates from (`-` reads stdin)
    pub input: PathBuf,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Maximum concurrent per-address lookups
    pub max_concurrency: usize,

    /// DNS blocklist zone suffix for reputation queries
    pub dnsbl_zone: String,

    /// Optional CSV output path for the `check` subcommand
    pub csv_output: Option<PathBuf>,

    /// Bind host for the API server
    pub host: String,

    /// Bind port for the API server
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("-"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            dnsbl_zone: DEFAULT_DNSBL_ZONE.to_string(),
            csv_output: None,
            host: DEFAULT_BIND_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(
    name = "murale",
    version,
    about = "A wallpaper catalog client with offline-tolerant favorites",
    long_about = None
)]
pub struct CliArgs {
    /// Remote configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Category to list (defaults to the first available category).
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Override the stored HD-thumbnails flag for this run.
    #[arg(long)]
    pub hd: Option<bool>,
}

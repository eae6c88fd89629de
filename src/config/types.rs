//! Configuration types.
//!
//! This module defines the enums and structs that carry settings from the
//! command line into the library.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::config::constants::{DEFAULT_INDEX_NAME, DEFAULT_SOURCE, STDOUT_SENTINEL};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
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
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: One JSON object per line
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Where a command writes its CSV output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output (`-` on the command line)
    Stdout,
    /// A file, overwritten if it exists
    File(PathBuf),
}

impl OutputTarget {
    /// Interprets a command-line output argument, treating `-` as stdout.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == STDOUT_SENTINEL {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(arg.to_path_buf())
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str("stdout"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Runtime configuration, populated once at startup and passed by value.
///
/// Credentials are optional here because only the search commands need them;
/// the search client rejects a missing value when it is built.
#[derive(Clone, Debug)]
pub struct Config {
    /// Search service application ID
    pub app_id: Option<String>,
    /// Search service API key
    pub api_key: Option<String>,
    /// Name of the search index
    pub index_name: String,
    /// Dataset file
    pub source_path: PathBuf,
    /// Override for the search service base URL
    pub host: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: None,
            api_key: None,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            source_path: PathBuf::from(DEFAULT_SOURCE),
            host: None,
        }
    }
}

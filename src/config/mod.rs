//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, index settings, retry tuning)
//! - The command-line interface
//! - The runtime `Config` passed to every command

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{AddArgs, Cli, Command, IndexArgs, SearchArgs, SearchCommand};
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, OutputTarget};

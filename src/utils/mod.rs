//! Utility functions.
//!
//! This module provides:
//! - Output routing to stdout or an atomically replaced file

mod output;

pub use output::write_output;

//! Command implementations.
//!
//! One function per subcommand. Each takes its inputs as explicit values and
//! returns `anyhow::Result` with enough context for the top-level error
//! message.

mod commands;
mod listing;

pub use commands::{add_school, for_database, initialize, list_schools, run, seed};
pub use listing::write_listing;

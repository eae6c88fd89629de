//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `schools` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//!
//! All command logic is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use schools::app::run;
use schools::config::Cli;
use schools::initialization::init_logger_with;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try the current directory first, then the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        eprintln!("schools error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    DEFAULT_INDEX_NAME, DEFAULT_SOURCE, ENV_API_KEY, ENV_APP_ID, ENV_HOST, ENV_SOURCE,
};
use crate::config::types::{Config, LogFormat, LogLevel};

/// Manage verified schools.
///
/// # Examples
///
/// ```bash
/// # Export id/name pairs for the database
/// schools for-database schools_db.csv
///
/// # Add a school with two abbreviations
/// schools add "Acme School" --abbreviation AS --abbreviation ACME
///
/// # Configure and fill the search index
/// schools search initialize
/// schools search seed --name schools-staging
/// ```
#[derive(Debug, Parser)]
#[command(name = "schools", version, about = "Manage verified schools")]
pub struct Cli {
    /// The source file to read from
    #[arg(short, long, env = ENV_SOURCE, default_value = DEFAULT_SOURCE)]
    pub source: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Format the school data for the database
    ForDatabase {
        /// Output file, or `-` for stdout
        output: PathBuf,
    },
    /// Add a new school to the dataset
    Add(AddArgs),
    /// Print every school with its decoded abbreviations and alternatives
    List,
    /// Manage the search index
    Search(SearchArgs),
}

/// Arguments of the `add` subcommand.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Display name of the school
    pub name: String,

    /// Short form the school is known by (repeatable)
    #[arg(long = "abbreviation", short = 'a')]
    pub abbreviations: Vec<String>,

    /// Alternate full name (repeatable)
    #[arg(long = "alternative", short = 'A')]
    pub alternatives: Vec<String>,

    /// Where to write the updated dataset (defaults to the source file, `-` for stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Arguments shared by the `search` subcommands.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// The Algolia application ID
    #[arg(long, env = ENV_APP_ID, value_name = "APP_ID")]
    pub app_id: Option<String>,

    /// The Algolia API key
    #[arg(long, env = ENV_API_KEY, value_name = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the search service (defaults to https://<APP_ID>.algolia.net)
    #[arg(long, env = ENV_HOST, value_name = "URL")]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: SearchCommand,
}

/// Search index subcommands.
#[derive(Debug, Subcommand)]
pub enum SearchCommand {
    /// Initialize the index settings
    Initialize {
        #[command(flatten)]
        index: IndexArgs,

        /// Send "abbreviations,alternatives" as one searchable attribute, as older
        /// deployments of this tool did
        #[arg(long)]
        combined_searchable_attributes: bool,
    },
    /// Seed the index with the schools
    Seed {
        #[command(flatten)]
        index: IndexArgs,
    },
}

/// Index selection and completion behavior.
#[derive(Debug, Args)]
pub struct IndexArgs {
    /// The name of the index
    #[arg(long, short, default_value = DEFAULT_INDEX_NAME)]
    pub name: String,

    /// Return as soon as the service accepts the request instead of waiting
    /// for the indexing task to be published
    #[arg(long)]
    pub no_wait: bool,
}

impl Cli {
    /// Builds the runtime configuration for this invocation.
    ///
    /// Search credentials and the index name are only filled in for
    /// `search` subcommands.
    pub fn config(&self) -> Config {
        let mut config = Config {
            source_path: self.source.clone(),
            ..Default::default()
        };
        if let Command::Search(search) = &self.command {
            config.app_id = search.app_id.clone();
            config.api_key = search.api_key.clone();
            config.host = search.host.clone();
            config.index_name = match &search.command {
                SearchCommand::Initialize { index, .. } | SearchCommand::Seed { index } => {
                    index.name.clone()
                }
            };
        }
        config
    }
}

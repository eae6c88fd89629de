//! Subcommand bodies and dispatch.

use std::io;

use anyhow::{Context, Result};
use log::info;

use crate::config::{AddArgs, Cli, Command, Config, OutputTarget, SearchCommand};
use crate::export::export_for_database;
use crate::search::{
    initialize_index, seed_index, Completion, SearchClient, SearchableAttributes, TaskId,
};
use crate::store::{NewSchool, SchoolRecord, StoreSource};

use super::listing::write_listing;

/// Writes the `id,name` projection of the dataset to `output`.
pub fn for_database(source: &StoreSource, output: &OutputTarget) -> Result<usize> {
    let store = source
        .load()
        .with_context(|| format!("Failed to read {}", source.path().display()))?;
    export_for_database(&store, output).with_context(|| format!("Failed to write {}", output))
}

/// Appends `school` to the dataset and writes the new snapshot.
///
/// Without an explicit `output` the source file itself is replaced. Invalid
/// input is rejected before anything is written.
pub fn add_school(
    source: &StoreSource,
    school: NewSchool,
    output: Option<OutputTarget>,
) -> Result<SchoolRecord> {
    school.validate()?;
    let store = source
        .load()
        .with_context(|| format!("Failed to read {}", source.path().display()))?;
    let next = store.append(school)?;
    let target = output.unwrap_or_else(|| OutputTarget::File(source.path().to_path_buf()));
    next.save(&target)
        .with_context(|| format!("Failed to write {}", target))?;

    // append always places the new record last
    let added = next
        .records()
        .last()
        .cloned()
        .context("appended store is empty")?;
    info!("Added {} as {}", added.name, added.id);
    Ok(added)
}

/// Prints every school to stdout.
pub fn list_schools(source: &StoreSource) -> Result<usize> {
    let store = source
        .load()
        .with_context(|| format!("Failed to read {}", source.path().display()))?;
    let count = write_listing(&store, io::stdout().lock())?;
    Ok(count)
}

/// Applies the schools settings to the configured index.
pub async fn initialize(
    config: &Config,
    layout: SearchableAttributes,
    completion: Completion,
) -> Result<TaskId> {
    let client = SearchClient::from_config(config)?;
    let task_id = initialize_index(&client, &config.index_name, layout, completion)
        .await
        .with_context(|| format!("Failed to initialize index {}", config.index_name))?;
    Ok(task_id)
}

/// Pushes the whole dataset to the configured index.
pub async fn seed(config: &Config, completion: Completion) -> Result<usize> {
    let source = StoreSource::new(&config.source_path);
    let store = source
        .load()
        .with_context(|| format!("Failed to read {}", source.path().display()))?;
    let client = SearchClient::from_config(config)?;
    let count = seed_index(&client, &config.index_name, &store, completion)
        .await
        .with_context(|| format!("Failed to seed index {}", config.index_name))?;
    Ok(count)
}

/// Whether `add` should print the new id on stdout. Stdout already carries
/// the dataset when it is the output target.
fn prints_added_id(output: Option<&OutputTarget>) -> bool {
    !matches!(output, Some(OutputTarget::Stdout))
}

fn completion(no_wait: bool) -> Completion {
    if no_wait {
        Completion::NoWait
    } else {
        Completion::Wait
    }
}

/// Runs the subcommand selected on the command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.config();
    let source = StoreSource::new(&config.source_path);

    match cli.command {
        Command::ForDatabase { output } => {
            for_database(&source, &OutputTarget::from_arg(&output))?;
        }
        Command::Add(AddArgs {
            name,
            abbreviations,
            alternatives,
            output,
        }) => {
            let school = NewSchool {
                name,
                abbreviations,
                alternatives,
            };
            let output = output.as_deref().map(OutputTarget::from_arg);
            let print_id = prints_added_id(output.as_ref());
            let added = add_school(&source, school, output)?;
            if print_id {
                println!("{}", added.id);
            }
        }
        Command::List => {
            list_schools(&source)?;
        }
        Command::Search(search) => match search.command {
            SearchCommand::Initialize {
                index,
                combined_searchable_attributes,
            } => {
                let layout = if combined_searchable_attributes {
                    SearchableAttributes::Combined
                } else {
                    SearchableAttributes::Separate
                };
                initialize(&config, layout, completion(index.no_wait)).await?;
            }
            SearchCommand::Seed { index } => {
                seed(&config, completion(index.no_wait)).await?;
            }
        },
    }
    Ok(())
}

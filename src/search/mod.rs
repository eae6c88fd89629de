//! Search index publishing.
//!
//! Two operations feed the hosted index:
//! - [`initialize_index`] applies the fixed schools settings
//! - [`seed_index`] pushes every record as a search document
//!
//! Both wait for the service to publish the resulting tasks unless told not to.

mod client;
mod settings;

use log::info;

use crate::error_handling::SearchError;
use crate::store::SchoolStore;

pub use client::{SearchClient, TaskId, TaskStatus};
pub use settings::{IndexSettings, SearchableAttributes};

/// Whether an operation returns before its indexing tasks are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Completion {
    /// Poll until every task is published
    #[default]
    Wait,
    /// Return as soon as the service accepts the request
    NoWait,
}

/// Applies the schools settings to `index`.
///
/// # Returns
///
/// The id of the settings task.
pub async fn initialize_index(
    client: &SearchClient,
    index: &str,
    layout: SearchableAttributes,
    completion: Completion,
) -> Result<TaskId, SearchError> {
    let settings = IndexSettings::schools(layout);
    let task_id = client.set_settings(index, &settings).await?;
    if completion == Completion::Wait {
        client.wait_task(index, task_id).await?;
    }
    info!("Initialized index {} (task {})", index, task_id);
    Ok(task_id)
}

/// Pushes every record of `store` to `index`.
///
/// All records are decoded before anything is sent; a record whose list
/// columns do not decode aborts the seed with no request made.
///
/// # Returns
///
/// The number of documents sent.
pub async fn seed_index(
    client: &SearchClient,
    index: &str,
    store: &SchoolStore,
    completion: Completion,
) -> Result<usize, SearchError> {
    let documents = store.search_documents()?;
    let task_ids = client.save_objects(index, &documents).await?;
    if completion == Completion::Wait {
        for task_id in &task_ids {
            client.wait_task(index, *task_id).await?;
        }
    }
    info!(
        "Seeded index {} with {} schools in {} batches",
        index,
        documents.len(),
        task_ids.len()
    );
    Ok(documents.len())
}

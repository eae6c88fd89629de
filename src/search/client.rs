//! Algolia REST client.
//!
//! Only the three endpoints the schools index needs are covered: updating
//! settings, batch-writing objects, and reading the status of the indexing
//! task either call returns.

use std::time::Duration;

use log::{debug, warn};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_retry::RetryIf;

use super::settings::IndexSettings;
use crate::config::{
    Config, BATCH_SIZE, ENV_API_KEY, ENV_APP_ID, HEADER_API_KEY, HEADER_APPLICATION_ID,
    TASK_MAX_POLLS, TASK_POLL_INTERVAL,
};
use crate::error_handling::{get_retry_strategy, is_retriable, SearchError};
use crate::initialization::init_client;
use crate::store::SearchDocument;

/// Identifier of an asynchronous indexing task.
pub type TaskId = u64;

#[derive(Debug, Deserialize)]
struct SettingsResponse {
    #[serde(rename = "taskID")]
    task_id: TaskId,
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    #[serde(rename = "taskID")]
    task_id: TaskId,
}

#[derive(Debug, Deserialize)]
struct TaskResponse {
    status: TaskStatus,
}

/// Progress of an indexing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Published,
    NotPublished,
}

#[derive(Debug, Serialize)]
struct BatchRequest<'a> {
    requests: Vec<BatchOperation<'a>>,
}

#[derive(Debug, Serialize)]
struct BatchOperation<'a> {
    action: &'static str,
    body: &'a SearchDocument,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for one search application.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: Url,
    app_id: String,
    api_key: String,
    poll_interval: Duration,
}

impl SearchClient {
    /// Builds a client from the runtime configuration.
    ///
    /// # Errors
    ///
    /// Fails if a credential is missing, the host is not a usable base URL,
    /// or the HTTP client cannot be created.
    pub fn from_config(config: &Config) -> Result<Self, SearchError> {
        let app_id = config
            .app_id
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or(SearchError::MissingCredential {
                name: "application ID",
                flag: "app-id",
                env: ENV_APP_ID,
            })?;
        let api_key = config
            .api_key
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or(SearchError::MissingCredential {
                name: "API key",
                flag: "api-key",
                env: ENV_API_KEY,
            })?;
        let host = config
            .host
            .clone()
            .unwrap_or_else(|| format!("https://{}.algolia.net", app_id));
        Self::new(init_client()?, &host, app_id, api_key)
    }

    /// Builds a client against an explicit base URL.
    pub fn new(
        http: reqwest::Client,
        host: &str,
        app_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, SearchError> {
        let base_url = Url::parse(host).map_err(|e| SearchError::InvalidHost {
            host: host.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SearchError::InvalidHost {
                host: host.to_string(),
                reason: "not a base URL".to_string(),
            });
        }
        Ok(Self {
            http,
            base_url,
            app_id: app_id.into(),
            api_key: api_key.into(),
            poll_interval: TASK_POLL_INTERVAL,
        })
    }

    /// Overrides the delay between task status polls.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Replaces the settings of `index`.
    pub async fn set_settings(
        &self,
        index: &str,
        settings: &IndexSettings,
    ) -> Result<TaskId, SearchError> {
        let response: SettingsResponse = self
            .send(Method::PUT, &[index, "settings"], Some(settings))
            .await?;
        debug!("Settings update for {} queued as task {}", index, response.task_id);
        Ok(response.task_id)
    }

    /// Adds or replaces `documents` in `index`, keyed by `objectID`.
    ///
    /// Documents are sent in batches of at most `BATCH_SIZE`; the returned
    /// task ids are in batch order.
    pub async fn save_objects(
        &self,
        index: &str,
        documents: &[SearchDocument],
    ) -> Result<Vec<TaskId>, SearchError> {
        let mut task_ids = Vec::new();
        for chunk in documents.chunks(BATCH_SIZE) {
            let request = BatchRequest {
                requests: chunk
                    .iter()
                    .map(|body| BatchOperation {
                        action: "updateObject",
                        body,
                    })
                    .collect(),
            };
            let response: BatchResponse = self
                .send(Method::POST, &[index, "batch"], Some(&request))
                .await?;
            debug!(
                "Batch of {} documents for {} queued as task {}",
                chunk.len(),
                index,
                response.task_id
            );
            task_ids.push(response.task_id);
        }
        Ok(task_ids)
    }

    /// Reads the status of one task.
    pub async fn task_status(&self, index: &str, task_id: TaskId) -> Result<TaskStatus, SearchError> {
        let task_id = task_id.to_string();
        let response: TaskResponse = self
            .send::<(), _>(Method::GET, &[index, "task", task_id.as_str()], None)
            .await?;
        Ok(response.status)
    }

    /// Polls a task until it is published.
    ///
    /// # Errors
    ///
    /// `SearchError::TaskTimeout` after `TASK_MAX_POLLS` polls without the
    /// task being published.
    pub async fn wait_task(&self, index: &str, task_id: TaskId) -> Result<(), SearchError> {
        for poll in 1..=TASK_MAX_POLLS {
            if self.task_status(index, task_id).await? == TaskStatus::Published {
                debug!("Task {} on {} published after {} polls", task_id, index, poll);
                return Ok(());
            }
            tokio::time::sleep(self.poll_interval).await;
        }
        Err(SearchError::TaskTimeout {
            index: index.to_string(),
            task_id,
            polls: TASK_MAX_POLLS,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("1").push("indexes").extend(segments);
        }
        url
    }

    /// Sends one request, retrying transient failures with backoff.
    async fn send<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, SearchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        RetryIf::spawn(
            get_retry_strategy(),
            || self.send_once(method.clone(), url.clone(), body),
            |e: &SearchError| {
                let retry = is_retriable(e);
                if retry {
                    warn!("{} {} failed, retrying: {}", method, url.path(), e);
                }
                retry
            },
        )
        .await
    }

    async fn send_once<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, SearchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self
            .http
            .request(method, url)
            .header(HEADER_APPLICATION_ID, &self.app_id)
            .header(HEADER_API_KEY, &self.api_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.message)
                .unwrap_or(text);
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

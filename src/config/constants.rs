//! Configuration constants.
//!
//! Defaults for the CLI, the fixed search index settings, and the retry
//! tuning used for calls to the search service.

use std::time::Duration;

/// Default dataset file read by every command.
pub const DEFAULT_SOURCE: &str = "schools.csv";
/// Default search index name.
pub const DEFAULT_INDEX_NAME: &str = "schools";
/// Value of an output argument that means "write to stdout".
pub const STDOUT_SENTINEL: &str = "-";

// Environment variables
pub const ENV_SOURCE: &str = "SCHOOLS_SOURCE";
pub const ENV_APP_ID: &str = "ALGOLIA_APP_ID";
pub const ENV_API_KEY: &str = "ALGOLIA_API_KEY";
pub const ENV_HOST: &str = "ALGOLIA_HOST";

// Dataset columns
pub const COLUMN_ID: &str = "id";
pub const COLUMN_NAME: &str = "name";
pub const COLUMN_ABBREVIATIONS: &str = "abbreviations";
pub const COLUMN_ALTERNATIVES: &str = "alternatives";

// Index settings
/// Language used for both indexing and queries.
pub const INDEX_LANGUAGE: &str = "en";
pub const HITS_PER_PAGE: u32 = 5;
pub const PAGINATION_LIMITED_TO: u32 = 50;

// Search service requests
/// Per-request timeout in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("schools/", env!("CARGO_PKG_VERSION"));
pub const HEADER_APPLICATION_ID: &str = "X-Algolia-Application-Id";
pub const HEADER_API_KEY: &str = "X-Algolia-API-Key";
/// Maximum number of documents sent in one batch request.
pub const BATCH_SIZE: usize = 1000;
/// Delay between polls of a pending indexing task.
pub const TASK_POLL_INTERVAL: Duration = Duration::from_millis(500);
/// Number of polls before a pending task is reported as timed out.
pub const TASK_MAX_POLLS: usize = 120;

// Retry strategy
/// Base of the exponential backoff; with `RETRY_FACTOR` the delays are 500ms, 1s, 2s, ...
pub const RETRY_BASE_MS: u64 = 2;
pub const RETRY_FACTOR: u64 = 250;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 10;
/// Maximum number of attempts per request (initial attempt + retries)
pub const RETRY_MAX_ATTEMPTS: usize = 3;

// HTTP status codes
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

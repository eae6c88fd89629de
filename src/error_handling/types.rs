//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// A stored list field that is not a valid set literal.
#[derive(Error, Debug)]
#[error("malformed set literal {literal:?}: {source}")]
pub struct CodecError {
    /// The raw field value
    pub literal: String,
    /// Why it failed to parse as a JSON array of strings
    #[source]
    pub source: serde_json::Error,
}

/// Errors raised while loading, changing, or projecting the dataset.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Operator input rejected before anything was written.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A record's list field could not be decoded.
    #[error("cannot decode {field} of school {record_id}: {source}")]
    Decode {
        /// Id of the offending record
        record_id: String,
        /// Column that failed to decode
        field: &'static str,
        #[source]
        source: CodecError,
    },

    /// Two records share an id.
    #[error("duplicate school id {id}")]
    InvariantViolation {
        /// The repeated id
        id: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Errors raised while talking to the search service.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A required credential was neither passed as a flag nor set in the environment.
    #[error("missing {name}: pass --{flag} or set {env}")]
    MissingCredential {
        /// Human-readable name
        name: &'static str,
        /// CLI flag
        flag: &'static str,
        /// Environment variable
        env: &'static str,
    },

    /// The configured base URL cannot be used.
    #[error("invalid search host {host:?}: {reason}")]
    InvalidHost {
        /// The configured value
        host: String,
        /// Why it was rejected
        reason: String,
    },

    /// The service answered with a non-success status.
    #[error("search service returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the response body
        message: String,
    },

    /// An indexing task did not reach the published state in time.
    #[error("indexing task {task_id} on index {index} was not published after {polls} polls")]
    TaskTimeout {
        /// Index the task belongs to
        index: String,
        /// Task identifier
        task_id: u64,
        /// Number of polls performed
        polls: usize,
    },

    #[error(transparent)]
    Http(#[from] ReqwestError),

    #[error(transparent)]
    Initialization(#[from] InitializationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

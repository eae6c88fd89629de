//! Error handling.
//!
//! This module provides:
//! - Error type definitions for the dataset, the search service, and startup
//! - Retry strategy configuration for search service requests
//! - Classification of transient versus permanent failures

mod categorization;
mod types;

// Re-export public API
pub use categorization::{get_retry_strategy, is_retriable};
pub use types::{CodecError, InitializationError, SearchError, StoreError};

//! Error categorization and retry strategy.
//!
//! Decides which search service failures are transient and configures the
//! backoff used when retrying them.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::SearchError;
use crate::config::HTTP_STATUS_TOO_MANY_REQUESTS;

/// Creates an exponential backoff retry strategy.
///
/// Yields the delays before each retry: 500ms, 1s, ... capped at
/// `RETRY_MAX_DELAY_SECS`, and at most `RETRY_MAX_ATTEMPTS - 1` of them so a
/// request is attempted `RETRY_MAX_ATTEMPTS` times in total.
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_BASE_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(crate::config::RETRY_MAX_ATTEMPTS.saturating_sub(1))
}

/// Returns true if retrying the failed request may succeed.
///
/// Transient: rate limiting (429), server errors (5xx), and connection or
/// timeout failures. Everything else, including bad credentials and invalid
/// payloads, fails immediately.
pub fn is_retriable(error: &SearchError) -> bool {
    match error {
        SearchError::Api { status, .. } => is_retriable_status(*status),
        SearchError::Http(e) => {
            if let Some(status) = e.status() {
                return is_retriable_status(status.as_u16());
            }
            e.is_timeout() || e.is_connect()
        }
        SearchError::MissingCredential { .. }
        | SearchError::InvalidHost { .. }
        | SearchError::TaskTimeout { .. }
        | SearchError::Initialization(_)
        | SearchError::Store(_) => false,
    }
}

fn is_retriable_status(status: u16) -> bool {
    status == HTTP_STATUS_TOO_MANY_REQUESTS || (500..600).contains(&status)
}

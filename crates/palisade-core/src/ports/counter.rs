//! Counter store port - the shared backend behind the rate limiter.

use async_trait::async_trait;
use std::time::Duration;

/// Atomic TTL-bound counter store.
///
/// `increment` must be a single atomic operation on the backend: two
/// concurrent callers on the same key must observe distinct counts. The TTL is
/// armed only by the increment that creates the key (fixed window); later
/// increments in the same window never re-arm it.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increment the counter under `key`, creating it with `window` TTL if
    /// absent. Returns the post-increment count and the remaining window.
    async fn increment(&self, key: &str, window: Duration) -> Result<CounterValue, CounterError>;

    /// Remove every counter whose key starts with `prefix`.
    ///
    /// Test and cache-reset tooling only; production windows expire on TTL.
    async fn clear_prefix(&self, prefix: &str) -> Result<(), CounterError>;
}

/// Result of an atomic increment.
#[derive(Debug, Clone, Copy)]
pub struct CounterValue {
    pub count: u64,
    pub ttl: Duration,
}

/// Counter store errors.
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    #[error("Backend error: {0}")]
    Backend(String),
}

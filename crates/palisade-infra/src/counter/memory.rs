//! In-memory counter store - per-process fallback when Redis is unavailable.
//!
//! Keyed fixed windows over a concurrent map. The dashmap entry guard makes
//! each increment atomic with respect to other callers on the same key.
//! Note: counts are per-process, not shared across instances.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use palisade_core::ports::{CounterError, CounterStore, CounterValue};

struct WindowSlot {
    count: u64,
    expires_at: Instant,
}

/// In-memory keyed fixed-window counter store.
pub struct InMemoryCounterStore {
    slots: DashMap<String, WindowSlot>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }
}

impl Default for InMemoryCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn increment(&self, key: &str, window: Duration) -> Result<CounterValue, CounterError> {
        let now = Instant::now();
        let mut slot = self
            .slots
            .entry(key.to_string())
            .or_insert_with(|| WindowSlot {
                count: 0,
                expires_at: now + window,
            });

        // Expired slots are recycled in place rather than removed; the TTL is
        // re-armed only here, at the start of a fresh window.
        if slot.expires_at <= now {
            slot.count = 0;
            slot.expires_at = now + window;
        }

        slot.count += 1;
        Ok(CounterValue {
            count: slot.count,
            ttl: slot.expires_at.saturating_duration_since(now),
        })
    }

    async fn clear_prefix(&self, prefix: &str) -> Result<(), CounterError> {
        self.slots.retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn counts_sequential_increments() {
        let store = InMemoryCounterStore::new();
        let window = Duration::from_secs(60);

        for expected in 1..=5 {
            let value = store.increment("rate:login:ip:1.2.3.4", window).await.unwrap();
            assert_eq!(value.count, expected);
            assert!(value.ttl <= window);
        }
    }

    #[tokio::test]
    async fn window_expiry_resets_the_count() {
        let store = InMemoryCounterStore::new();
        let window = Duration::from_millis(40);

        store.increment("key", window).await.unwrap();
        store.increment("key", window).await.unwrap();

        tokio::time::sleep(Duration::from_millis(70)).await;

        let value = store.increment("key", window).await.unwrap();
        assert_eq!(value.count, 1);
    }

    #[tokio::test]
    async fn concurrent_increments_are_never_lost() {
        let store = Arc::new(InMemoryCounterStore::new());
        let window = Duration::from_secs(60);

        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.increment("shared", window).await.unwrap()
            }));
        }

        let mut max_seen = 0;
        for handle in handles {
            max_seen = max_seen.max(handle.await.unwrap().count);
        }
        assert_eq!(max_seen, 50);
    }

    #[tokio::test]
    async fn clear_prefix_only_touches_matching_keys() {
        let store = InMemoryCounterStore::new();
        let window = Duration::from_secs(60);

        store.increment("rate:login:a", window).await.unwrap();
        store.increment("rate:post:a", window).await.unwrap();

        store.clear_prefix("rate:login:").await.unwrap();

        assert_eq!(store.increment("rate:login:a", window).await.unwrap().count, 1);
        assert_eq!(store.increment("rate:post:a", window).await.unwrap().count, 2);
    }
}

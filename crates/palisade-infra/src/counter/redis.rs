//! Redis counter store - the shared backend for fixed-window rate limiting.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, Script};

use palisade_core::ports::{CounterError, CounterStore, CounterValue};

/// Redis counter store configuration.
#[derive(Debug, Clone)]
pub struct RedisCounterConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl Default for RedisCounterConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisCounterConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }
}

/// Redis-backed counter store.
///
/// INCR and the conditional EXPIRE run inside one Lua script, so the
/// increment-with-TTL is a single atomic operation - a plain read-then-write
/// here would silently under-enforce limits under concurrency.
pub struct RedisCounterStore {
    conn: ConnectionManager,
    script: Script,
}

impl RedisCounterStore {
    pub async fn new(config: RedisCounterConfig) -> Result<Self, CounterError> {
        let client =
            Client::open(config.url.as_str()).map_err(|e| CounterError::Backend(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn_manager_fut = ConnectionManager::new(client);
        let conn = tokio::time::timeout(config.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| CounterError::Backend("Connection timed out".to_string()))?
            .map_err(|e| CounterError::Backend(e.to_string()))?;

        // EXPIRE only fires for the increment that created the key, so the
        // window is fixed rather than sliding.
        // Returns: [current_count, ttl_remaining]
        let script = Script::new(
            r#"
            local key = KEYS[1]
            local window_secs = tonumber(ARGV[1])

            local current = redis.call('INCR', key)
            if current == 1 then
                redis.call('EXPIRE', key, window_secs)
            end

            local ttl = redis.call('TTL', key)
            return {current, ttl}
            "#,
        );

        tracing::info!(url = %config.url, "Connected to Redis counter store");

        Ok(Self { conn, script })
    }

    /// Create from environment configuration.
    pub async fn from_env() -> Result<Self, CounterError> {
        Self::new(RedisCounterConfig::from_env()).await
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, key: &str, window: Duration) -> Result<CounterValue, CounterError> {
        let mut conn = self.conn.clone();

        let result: Vec<i64> = self
            .script
            .key(key)
            .arg(window.as_secs().max(1))
            .invoke_async(&mut conn)
            .await
            .map_err(|e| CounterError::Backend(e.to_string()))?;

        let count = result.first().copied().unwrap_or(1).max(0) as u64;
        let ttl_secs = result.get(1).copied().unwrap_or(1).max(1) as u64;

        Ok(CounterValue {
            count,
            ttl: Duration::from_secs(ttl_secs),
        })
    }

    async fn clear_prefix(&self, prefix: &str) -> Result<(), CounterError> {
        let mut conn = self.conn.clone();
        let pattern = format!("{prefix}*");

        // SCAN rather than KEYS; this path is test/reset tooling but should
        // still not block the server.
        let mut keys: Vec<String> = Vec::new();
        {
            let mut iter = conn
                .scan_match::<_, String>(&pattern)
                .await
                .map_err(|e| CounterError::Backend(e.to_string()))?;
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
        }

        if !keys.is_empty() {
            let mut conn = self.conn.clone();
            conn.del::<_, ()>(keys)
                .await
                .map_err(|e| CounterError::Backend(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn get_test_store() -> Option<RedisCounterStore> {
        let config = RedisCounterConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
            connect_timeout: Duration::from_secs(1),
        };

        RedisCounterStore::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_increment_and_window_reset() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => return,
        };

        let key = "test_counter:increment";
        store.clear_prefix("test_counter:").await.unwrap();

        let first = store.increment(key, Duration::from_secs(1)).await.unwrap();
        assert_eq!(first.count, 1);

        let second = store.increment(key, Duration::from_secs(1)).await.unwrap();
        assert_eq!(second.count, 2);

        // Wait for the window to lapse
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let fresh = store.increment(key, Duration::from_secs(1)).await.unwrap();
        assert_eq!(fresh.count, 1);
    }

    #[tokio::test]
    async fn test_clear_prefix() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => return,
        };

        store
            .increment("test_clear:a", Duration::from_secs(30))
            .await
            .unwrap();
        store
            .increment("test_clear:b", Duration::from_secs(30))
            .await
            .unwrap();

        store.clear_prefix("test_clear:").await.unwrap();

        let value = store
            .increment("test_clear:a", Duration::from_secs(30))
            .await
            .unwrap();
        assert_eq!(value.count, 1);
    }
}

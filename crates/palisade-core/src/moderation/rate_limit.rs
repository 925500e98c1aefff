//! Fixed-window rate limiting over an atomic counter store.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use uuid::Uuid;

use crate::ports::{AuditAction, AuditEvent, AuditSink, CounterStore};

/// Action classes with independent limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionClass {
    Login,
    Register,
    CreatePost,
    CreateComment,
    Default,
}

impl ActionClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionClass::Login => "login",
            ActionClass::Register => "register",
            ActionClass::CreatePost => "post",
            ActionClass::CreateComment => "comment",
            ActionClass::Default => "default",
        }
    }
}

impl std::str::FromStr for ActionClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "login" => Ok(ActionClass::Login),
            "register" => Ok(ActionClass::Register),
            "post" | "create-post" => Ok(ActionClass::CreatePost),
            "comment" | "create-comment" => Ok(ActionClass::CreateComment),
            "default" => Ok(ActionClass::Default),
            other => Err(format!("unknown action class: {other}")),
        }
    }
}

/// Who is being counted.
///
/// Unauthenticated actions key on the client IP; authenticated content
/// creation keys on the user id, so account abuse cannot hide behind IP
/// rotation and a shared NAT does not throttle unrelated logged-in users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientKey {
    Ip(String),
    User(Uuid),
}

impl std::fmt::Display for ClientKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientKey::Ip(ip) => write!(f, "ip:{ip}"),
            ClientKey::User(id) => write!(f, "user:{id}"),
        }
    }
}

/// Per-class request limits and the shared window length.
#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    pub window: Duration,
    pub login: u32,
    pub register: u32,
    pub create_post: u32,
    pub create_comment: u32,
    pub default_limit: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(60),
            login: 5,
            register: 5,
            create_post: 10,
            create_comment: 20,
            default_limit: 60,
        }
    }
}

impl RateLimitSettings {
    pub fn limit_for(&self, class: ActionClass) -> u32 {
        match class {
            ActionClass::Login => self.login,
            ActionClass::Register => self.register,
            ActionClass::CreatePost => self.create_post,
            ActionClass::CreateComment => self.create_comment,
            ActionClass::Default => self.default_limit,
        }
    }
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone)]
pub enum RateLimitDecision {
    Allowed { count: u64 },
    Denied {
        class: ActionClass,
        limit: u32,
        retry_after: Duration,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Fixed-window rate limiter.
///
/// Counts live in the injected `CounterStore`; this service only applies
/// policy. An unreachable store fails open: forum availability wins over
/// strict enforcement during an outage.
pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
    audit: Arc<dyn AuditSink>,
    settings: RateLimitSettings,
}

impl RateLimiter {
    pub fn new(
        store: Arc<dyn CounterStore>,
        audit: Arc<dyn AuditSink>,
        settings: RateLimitSettings,
    ) -> Self {
        Self {
            store,
            audit,
            settings,
        }
    }

    /// Increment the counter for `(class, client)` and decide.
    pub async fn check(&self, class: ActionClass, client: &ClientKey) -> RateLimitDecision {
        let key = format!("rate:{}:{}", class.as_str(), client);

        let value = match self.store.increment(&key, self.settings.window).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "counter store unreachable, failing open");
                return RateLimitDecision::Allowed { count: 0 };
            }
        };

        let limit = self.settings.limit_for(class);
        if value.count > u64::from(limit) {
            tracing::warn!(key = %key, count = value.count, limit, "rate limit exceeded");
            let actor = match client {
                ClientKey::User(id) => Some(*id),
                ClientKey::Ip(_) => None,
            };
            self.audit
                .record(AuditEvent::new(
                    actor,
                    AuditAction::RateLimitExceeded,
                    json!({
                        "class": class.as_str(),
                        "identifier": client.to_string(),
                        "count": value.count,
                        "limit": limit,
                    }),
                ))
                .await;

            return RateLimitDecision::Denied {
                class,
                limit,
                retry_after: value.ttl,
            };
        }

        RateLimitDecision::Allowed { count: value.count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::ports::{CounterError, CounterValue};

    struct FakeStore {
        counts: Mutex<HashMap<String, u64>>,
    }

    impl FakeStore {
        fn new() -> Self {
            Self {
                counts: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl CounterStore for FakeStore {
        async fn increment(
            &self,
            key: &str,
            window: Duration,
        ) -> Result<CounterValue, CounterError> {
            let mut counts = self.counts.lock().unwrap();
            let count = counts.entry(key.to_string()).or_insert(0);
            *count += 1;
            Ok(CounterValue {
                count: *count,
                ttl: window,
            })
        }

        async fn clear_prefix(&self, prefix: &str) -> Result<(), CounterError> {
            self.counts
                .lock()
                .unwrap()
                .retain(|k, _| !k.starts_with(prefix));
            Ok(())
        }
    }

    struct DownStore;

    #[async_trait]
    impl CounterStore for DownStore {
        async fn increment(&self, _: &str, _: Duration) -> Result<CounterValue, CounterError> {
            Err(CounterError::Backend("connection refused".to_string()))
        }

        async fn clear_prefix(&self, _: &str) -> Result<(), CounterError> {
            Err(CounterError::Backend("connection refused".to_string()))
        }
    }

    struct NullSink;

    #[async_trait]
    impl crate::ports::AuditSink for NullSink {
        async fn record(&self, _: AuditEvent) {}
    }

    fn limiter(store: Arc<dyn CounterStore>) -> RateLimiter {
        RateLimiter::new(store, Arc::new(NullSink), RateLimitSettings::default())
    }

    #[tokio::test]
    async fn allows_up_to_limit_then_denies() {
        let limiter = limiter(Arc::new(FakeStore::new()));
        let client = ClientKey::Ip("10.0.0.1".to_string());

        for _ in 0..5 {
            assert!(limiter.check(ActionClass::Login, &client).await.is_allowed());
        }

        match limiter.check(ActionClass::Login, &client).await {
            RateLimitDecision::Denied { class, limit, .. } => {
                assert_eq!(class, ActionClass::Login);
                assert_eq!(limit, 5);
            }
            other => panic!("expected denial, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn classes_are_counted_independently() {
        let limiter = limiter(Arc::new(FakeStore::new()));
        let client = ClientKey::Ip("10.0.0.2".to_string());

        for _ in 0..5 {
            assert!(limiter.check(ActionClass::Login, &client).await.is_allowed());
        }
        assert!(!limiter.check(ActionClass::Login, &client).await.is_allowed());

        // The same client still has headroom in another class.
        assert!(
            limiter
                .check(ActionClass::CreatePost, &client)
                .await
                .is_allowed()
        );
    }

    #[tokio::test]
    async fn identifiers_are_counted_independently() {
        let limiter = limiter(Arc::new(FakeStore::new()));
        let first = ClientKey::User(Uuid::new_v4());
        let second = ClientKey::User(Uuid::new_v4());

        for _ in 0..5 {
            assert!(limiter.check(ActionClass::Login, &first).await.is_allowed());
        }
        assert!(!limiter.check(ActionClass::Login, &first).await.is_allowed());
        assert!(limiter.check(ActionClass::Login, &second).await.is_allowed());
    }

    #[tokio::test]
    async fn fails_open_when_store_is_down() {
        let limiter = limiter(Arc::new(DownStore));
        let client = ClientKey::Ip("10.0.0.3".to_string());

        for _ in 0..20 {
            assert!(limiter.check(ActionClass::Login, &client).await.is_allowed());
        }
    }
}

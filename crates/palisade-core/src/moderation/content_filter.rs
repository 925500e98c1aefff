//! Banned-word content filtering with a TTL-bound snapshot cache.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::BannedWord;
use crate::error::DomainError;
use crate::ports::{AuditAction, AuditEvent, AuditSink, BannedWordRepository};

/// Snapshot cache of the banned-word table.
///
/// An explicit component rather than process-global state: construct one at
/// startup and hand it to the filter, or a fresh one per test case. Reloads
/// are not single-flight; two callers refreshing the same stale snapshot is
/// redundant work, not a correctness problem.
pub struct WordCache {
    inner: RwLock<CacheState>,
}

#[derive(Default)]
struct CacheState {
    words: Option<Arc<HashSet<String>>>,
    refreshed_at: Option<Instant>,
}

impl WordCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CacheState::default()),
        }
    }

    /// The snapshot, if one exists and is younger than `ttl`.
    async fn fresh(&self, ttl: Duration) -> Option<Arc<HashSet<String>>> {
        let state = self.inner.read().await;
        match (&state.words, state.refreshed_at) {
            (Some(words), Some(at)) if at.elapsed() <= ttl => Some(words.clone()),
            _ => None,
        }
    }

    /// The most recent snapshot regardless of age, for reload-failure fallback.
    async fn last_good(&self) -> Option<Arc<HashSet<String>>> {
        self.inner.read().await.words.clone()
    }

    async fn store(&self, words: HashSet<String>) -> Arc<HashSet<String>> {
        let words = Arc::new(words);
        let mut state = self.inner.write().await;
        state.words = Some(words.clone());
        state.refreshed_at = Some(Instant::now());
        words
    }

    /// Force the next check to reload, keeping the old snapshot as fallback.
    pub async fn invalidate(&self) {
        self.inner.write().await.refreshed_at = None;
    }
}

impl Default for WordCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a filter check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterVerdict {
    Clean,
    /// Every distinct cached term found in the text, lowercase, sorted.
    Dirty { matched: Vec<String> },
}

impl FilterVerdict {
    pub fn is_clean(&self) -> bool {
        matches!(self, FilterVerdict::Clean)
    }
}

/// Case-insensitive substring filter against the banned-word list.
pub struct ContentFilter {
    words: Arc<dyn BannedWordRepository>,
    audit: Arc<dyn AuditSink>,
    cache: Arc<WordCache>,
    cache_ttl: Duration,
}

impl ContentFilter {
    pub fn new(
        words: Arc<dyn BannedWordRepository>,
        audit: Arc<dyn AuditSink>,
        cache: Arc<WordCache>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            words,
            audit,
            cache,
            cache_ttl,
        }
    }

    /// Check `text` against the cached banned-word set.
    ///
    /// Empty text is always clean. Staleness is bounded by the cache TTL; a
    /// failed reload falls back to the last good snapshot rather than failing
    /// the request, and only propagates when no snapshot has ever been loaded.
    pub async fn check(&self, text: &str) -> Result<FilterVerdict, DomainError> {
        if text.is_empty() {
            return Ok(FilterVerdict::Clean);
        }

        let words = self.snapshot().await?;
        let lowered = text.to_lowercase();

        let mut matched: Vec<String> = words
            .iter()
            .filter(|word| lowered.contains(word.as_str()))
            .cloned()
            .collect();

        if matched.is_empty() {
            Ok(FilterVerdict::Clean)
        } else {
            matched.sort();
            Ok(FilterVerdict::Dirty { matched })
        }
    }

    async fn snapshot(&self) -> Result<Arc<HashSet<String>>, DomainError> {
        if let Some(words) = self.cache.fresh(self.cache_ttl).await {
            return Ok(words);
        }

        match self.words.all_words().await {
            Ok(list) => Ok(self.cache.store(list.into_iter().collect()).await),
            Err(err) => match self.cache.last_good().await {
                Some(words) => {
                    tracing::warn!(error = %err, "banned-word reload failed, using stale snapshot");
                    Ok(words)
                }
                None => Err(DomainError::Infrastructure(err.to_string())),
            },
        }
    }

    /// Add a word to the list and force-invalidate the cache, so this
    /// instance observes the change immediately; other instances lag by at
    /// most the cache TTL.
    pub async fn add_word(&self, actor_id: Uuid, word: &str) -> Result<BannedWord, DomainError> {
        let normalized = word.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::Validation("word must not be empty".to_string()));
        }

        if self.words.find_by_word(&normalized).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "word '{normalized}' is already banned"
            )));
        }

        let saved = self.words.insert(BannedWord::new(normalized)).await?;
        self.cache.invalidate().await;

        self.audit
            .record(AuditEvent::new(
                Some(actor_id),
                AuditAction::AddBannedWord,
                json!({ "id": saved.id, "word": saved.word }),
            ))
            .await;

        Ok(saved)
    }

    /// Remove a word by id and force-invalidate the cache.
    pub async fn delete_word(&self, actor_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let existing = self
            .words
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "banned word",
                id,
            })?;

        self.words.delete(id).await?;
        self.cache.invalidate().await;

        self.audit
            .record(AuditEvent::new(
                Some(actor_id),
                AuditAction::DeleteBannedWord,
                json!({ "id": id, "word": existing.word }),
            ))
            .await;

        Ok(())
    }

    /// Full rows for the admin listing.
    pub async fn list(&self) -> Result<Vec<BannedWord>, DomainError> {
        Ok(self.words.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::error::RepoError;

    struct FakeWords {
        rows: Mutex<Vec<BannedWord>>,
        failing: AtomicBool,
    }

    impl FakeWords {
        fn with(words: &[&str]) -> Self {
            Self {
                rows: Mutex::new(
                    words
                        .iter()
                        .map(|w| BannedWord::new(w.to_string()))
                        .collect(),
                ),
                failing: AtomicBool::new(false),
            }
        }

        fn push(&self, word: &str) {
            self.rows.lock().unwrap().push(BannedWord::new(word.to_string()));
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn check_up(&self) -> Result<(), RepoError> {
            if self.failing.load(Ordering::SeqCst) {
                Err(RepoError::Connection("database down".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl BannedWordRepository for FakeWords {
        async fn all_words(&self) -> Result<Vec<String>, RepoError> {
            self.check_up()?;
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.word.clone())
                .collect())
        }

        async fn list(&self) -> Result<Vec<BannedWord>, RepoError> {
            self.check_up()?;
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn find_by_word(&self, word: &str) -> Result<Option<BannedWord>, RepoError> {
            self.check_up()?;
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.word == word)
                .cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<BannedWord>, RepoError> {
            self.check_up()?;
            Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
        }

        async fn insert(&self, word: BannedWord) -> Result<BannedWord, RepoError> {
            self.check_up()?;
            self.rows.lock().unwrap().push(word.clone());
            Ok(word)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.check_up()?;
            self.rows.lock().unwrap().retain(|r| r.id != id);
            Ok(())
        }
    }

    struct NullSink;

    #[async_trait]
    impl crate::ports::AuditSink for NullSink {
        async fn record(&self, _: AuditEvent) {}
    }

    fn filter(repo: Arc<FakeWords>, ttl: Duration) -> ContentFilter {
        ContentFilter::new(repo, Arc::new(NullSink), Arc::new(WordCache::new()), ttl)
    }

    #[tokio::test]
    async fn matches_are_case_insensitive_and_canonical() {
        let repo = Arc::new(FakeWords::with(&["spam", "scam"]));
        let filter = filter(repo, Duration::from_secs(60));

        match filter.check("Buy now! SPAM and sCaM inside").await.unwrap() {
            FilterVerdict::Dirty { matched } => {
                assert_eq!(matched, vec!["scam".to_string(), "spam".to_string()]);
            }
            FilterVerdict::Clean => panic!("expected dirty verdict"),
        }

        assert!(filter.check("a perfectly fine post").await.unwrap().is_clean());
    }

    #[tokio::test]
    async fn empty_text_is_clean_without_touching_the_store() {
        let repo = Arc::new(FakeWords::with(&["spam"]));
        repo.set_failing(true);
        let filter = filter(repo, Duration::from_secs(60));

        assert!(filter.check("").await.unwrap().is_clean());
    }

    #[tokio::test]
    async fn stale_cache_hides_external_edits_until_ttl() {
        let repo = Arc::new(FakeWords::with(&[]));
        let filter = filter(repo.clone(), Duration::from_millis(50));

        assert!(filter.check("spam").await.unwrap().is_clean());

        // Another instance adds a word behind this cache's back.
        repo.push("spam");
        assert!(filter.check("spam").await.unwrap().is_clean());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(!filter.check("spam").await.unwrap().is_clean());
    }

    #[tokio::test]
    async fn add_word_invalidates_the_local_cache_immediately() {
        let repo = Arc::new(FakeWords::with(&[]));
        let filter = filter(repo, Duration::from_secs(600));

        assert!(filter.check("spam").await.unwrap().is_clean());

        filter.add_word(Uuid::new_v4(), "  SPAM ").await.unwrap();
        assert!(!filter.check("definitely spam").await.unwrap().is_clean());
    }

    #[tokio::test]
    async fn delete_word_is_reflected_after_invalidation() {
        let repo = Arc::new(FakeWords::with(&[]));
        let filter = filter(repo, Duration::from_secs(600));

        let word = filter.add_word(Uuid::new_v4(), "Spam").await.unwrap();
        assert_eq!(word.word, "spam");
        assert!(!filter.check("spam").await.unwrap().is_clean());

        filter.delete_word(Uuid::new_v4(), word.id).await.unwrap();
        assert!(filter.check("spam").await.unwrap().is_clean());
    }

    #[tokio::test]
    async fn rejects_empty_and_duplicate_words() {
        let repo = Arc::new(FakeWords::with(&["spam"]));
        let filter = filter(repo, Duration::from_secs(60));
        let actor = Uuid::new_v4();

        assert!(matches!(
            filter.add_word(actor, "   ").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            filter.add_word(actor, "SPAM").await,
            Err(DomainError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn reload_failure_falls_back_to_last_good_snapshot() {
        let repo = Arc::new(FakeWords::with(&["spam"]));
        let filter = filter(repo.clone(), Duration::ZERO);

        assert!(!filter.check("spam").await.unwrap().is_clean());

        repo.set_failing(true);
        // TTL of zero forces a reload attempt; the stale snapshot still serves.
        assert!(!filter.check("spam").await.unwrap().is_clean());
        assert!(filter.check("harmless").await.unwrap().is_clean());
    }

    #[tokio::test]
    async fn reload_failure_with_no_snapshot_propagates() {
        let repo = Arc::new(FakeWords::with(&["spam"]));
        repo.set_failing(true);
        let filter = filter(repo, Duration::from_secs(60));

        assert!(matches!(
            filter.check("spam").await,
            Err(DomainError::Infrastructure(_))
        ));
    }
}

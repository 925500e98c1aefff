//! In-memory repositories - used when no database is configured, and as test
//! fixtures for the pipeline. Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use palisade_core::domain::{BannedWord, ContentItem, ContentStatus, Report};
use palisade_core::error::RepoError;
use palisade_core::ports::{BannedWordRepository, ContentRepository, ReportRepository};

/// In-memory content repository.
pub struct MemoryContentRepository {
    items: RwLock<HashMap<Uuid, ContentItem>>,
}

impl MemoryContentRepository {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Store a content item. Creation belongs to the forum's CRUD layer, so
    /// this sits outside the `ContentRepository` port.
    pub async fn insert(&self, item: ContentItem) {
        self.items.write().await.insert(item.id, item);
    }
}

impl Default for MemoryContentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentRepository for MemoryContentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentItem>, RepoError> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ContentStatus,
        hide_reason: Option<String>,
    ) -> Result<(), RepoError> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id).ok_or(RepoError::NotFound)?;
        item.status = status;
        item.hide_reason = hide_reason;
        item.updated_at = Utc::now();
        Ok(())
    }
}

/// In-memory report repository.
pub struct MemoryReportRepository {
    reports: RwLock<Vec<Report>>,
}

impl MemoryReportRepository {
    pub fn new() -> Self {
        Self {
            reports: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryReportRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportRepository for MemoryReportRepository {
    async fn exists(&self, reporter_id: Uuid, post_id: Uuid) -> Result<bool, RepoError> {
        Ok(self
            .reports
            .read()
            .await
            .iter()
            .any(|r| r.reporter_id == reporter_id && r.post_id == post_id))
    }

    async fn insert(&self, report: Report) -> Result<Report, RepoError> {
        let mut reports = self.reports.write().await;

        // Mirror the storage unique index so races surface the same way.
        if reports
            .iter()
            .any(|r| r.reporter_id == report.reporter_id && r.post_id == report.post_id)
        {
            return Err(RepoError::Constraint(
                "reports_reporter_id_post_id_key".to_string(),
            ));
        }

        reports.push(report.clone());
        Ok(report)
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        Ok(self
            .reports
            .read()
            .await
            .iter()
            .filter(|r| r.post_id == post_id)
            .count() as u64)
    }
}

/// In-memory banned word repository.
pub struct MemoryBannedWordRepository {
    words: RwLock<HashMap<Uuid, BannedWord>>,
}

impl MemoryBannedWordRepository {
    pub fn new() -> Self {
        Self {
            words: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryBannedWordRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BannedWordRepository for MemoryBannedWordRepository {
    async fn all_words(&self) -> Result<Vec<String>, RepoError> {
        Ok(self
            .words
            .read()
            .await
            .values()
            .map(|w| w.word.clone())
            .collect())
    }

    async fn list(&self) -> Result<Vec<BannedWord>, RepoError> {
        let mut rows: Vec<BannedWord> = self.words.read().await.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_by_word(&self, word: &str) -> Result<Option<BannedWord>, RepoError> {
        Ok(self
            .words
            .read()
            .await
            .values()
            .find(|w| w.word == word)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BannedWord>, RepoError> {
        Ok(self.words.read().await.get(&id).cloned())
    }

    async fn insert(&self, word: BannedWord) -> Result<BannedWord, RepoError> {
        let mut words = self.words.write().await;

        if words.values().any(|w| w.word == word.word) {
            return Err(RepoError::Constraint("banned_words_word_key".to_string()));
        }

        words.insert(word.id, word.clone());
        Ok(word)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.words.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BannedWord, ContentItem, ContentStatus, Report};
use crate::error::RepoError;

/// Content item repository.
///
/// The pipeline never creates or deletes content; it reads items and writes
/// visibility state. Everything else belongs to the forum's CRUD layer.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Find a content item by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentItem>, RepoError>;

    /// Update the visibility state and hide reason of a content item.
    async fn update_status(
        &self,
        id: Uuid,
        status: ContentStatus,
        hide_reason: Option<String>,
    ) -> Result<(), RepoError>;
}

/// Report repository.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Whether `reporter_id` has already reported `post_id`.
    async fn exists(&self, reporter_id: Uuid, post_id: Uuid) -> Result<bool, RepoError>;

    /// Insert a new report. A `(reporter_id, post_id)` unique-index violation
    /// maps to `RepoError::Constraint`.
    async fn insert(&self, report: Report) -> Result<Report, RepoError>;

    /// Count all reports filed against a post.
    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError>;
}

/// Banned word repository - the authoritative list behind the filter cache.
#[async_trait]
pub trait BannedWordRepository: Send + Sync {
    /// All banned terms as plain strings, for the filter snapshot.
    async fn all_words(&self) -> Result<Vec<String>, RepoError>;

    /// Full rows, newest first, for the admin listing.
    async fn list(&self) -> Result<Vec<BannedWord>, RepoError>;

    async fn find_by_word(&self, word: &str) -> Result<Option<BannedWord>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BannedWord>, RepoError>;

    /// Insert a new word. A duplicate maps to `RepoError::Constraint`.
    async fn insert(&self, word: BannedWord) -> Result<BannedWord, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

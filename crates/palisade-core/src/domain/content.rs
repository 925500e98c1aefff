use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visibility state of a content item.
///
/// `Pending` is only ever produced by the creation-time filter; moderator
/// actions move items between `Active` and `Hidden`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Active,
    Pending,
    Hidden,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Active => "active",
            ContentStatus::Pending => "pending",
            ContentStatus::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content item entity - a post (or comment) subject to moderation.
///
/// The pipeline owns `status` and `hide_reason`; everything else belongs to
/// the forum's CRUD layer. Report counts are derived from the report set and
/// never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub status: ContentStatus,
    pub hide_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    /// Create a new content item with the given initial status.
    pub fn new(author_id: Uuid, title: String, body: String, status: ContentStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            body,
            status,
            hide_reason: None,
            created_at: now,
            updated_at: now,
        }
    }
}

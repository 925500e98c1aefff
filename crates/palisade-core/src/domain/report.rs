use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum length of a report reason after trimming.
pub const MIN_REPORT_REASON_LEN: usize = 5;

/// Review state of an abuse report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Reviewed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Reviewed => "reviewed",
        }
    }
}

/// Report entity - one user's abuse report against one post.
///
/// The pair `(reporter_id, post_id)` is unique; the pipeline checks before
/// insert and the storage layer enforces it with a unique index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub post_id: Uuid,
    pub reason: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    /// Create a new pending report.
    pub fn new(reporter_id: Uuid, post_id: Uuid, reason: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            reporter_id,
            post_id,
            reason,
            status: ReportStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

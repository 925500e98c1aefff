//! Audit sink port.
//!
//! Every pipeline decision produces one structured event: rate-limit
//! rejections, creation-time quarantines, auto-hides, moderator actions,
//! filter-list edits. The sink is observability, not correctness - `record`
//! cannot fail from the caller's point of view; implementations swallow their
//! own write errors into logs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of decision an audit event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    RateLimitExceeded,
    ContentQuarantined,
    ReportFiled,
    AutoHidePost,
    ApprovePost,
    HidePost,
    AddBannedWord,
    DeleteBannedWord,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            AuditAction::ContentQuarantined => "CONTENT_QUARANTINED",
            AuditAction::ReportFiled => "REPORT_FILED",
            AuditAction::AutoHidePost => "AUTO_HIDE_POST",
            AuditAction::ApprovePost => "APPROVE_POST",
            AuditAction::HidePost => "HIDE_POST",
            AuditAction::AddBannedWord => "ADD_BANNED_WORD",
            AuditAction::DeleteBannedWord => "DELETE_BANNED_WORD",
        }
    }
}

/// One recorded decision.
///
/// `actor_id` is absent for anonymous actors (an IP hitting a login limit) and
/// for system-initiated transitions such as auto-hide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub actor_id: Option<Uuid>,
    pub action: AuditAction,
    pub detail: serde_json::Value,
    pub at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(actor_id: Option<Uuid>, action: AuditAction, detail: serde_json::Value) -> Self {
        Self {
            actor_id,
            action,
            detail,
            at: Utc::now(),
        }
    }
}

/// Audit sink trait - receives one event per pipeline decision.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: AuditEvent);
}

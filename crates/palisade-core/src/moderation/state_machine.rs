//! The content lifecycle state machine.
//!
//! Sole authority over `status` and `hide_reason`: creation-time screening,
//! report-threshold auto-hide, and moderator overrides all land here so that
//! every transition leaves an audit record.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::domain::{ContentStatus, Role};
use crate::error::DomainError;
use crate::ports::{AuditAction, AuditEvent, AuditSink, ContentRepository, ReportRepository};

use super::content_filter::{ContentFilter, FilterVerdict};

/// Who is performing a moderation request.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

/// Explicit moderator transitions. `Pending` is not reachable from here; a
/// moderator's options are exactly approve and hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Hide,
}

impl std::str::FromStr for ModerationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "approve" => Ok(ModerationAction::Approve),
            "hide" => Ok(ModerationAction::Hide),
            other => Err(format!("unknown moderation action: {other}")),
        }
    }
}

/// Creation-time screening decision.
#[derive(Debug, Clone)]
pub struct ScreenOutcome {
    pub status: ContentStatus,
    pub hide_reason: Option<String>,
    /// Terms that triggered quarantine, for the trusted boundary and the
    /// audit trail. User-facing messages stay generic.
    pub matched_terms: Vec<String>,
}

const DEFAULT_HIDE_REASON: &str = "Community guidelines violation";

/// The moderation state machine.
pub struct Moderation {
    content: Arc<dyn ContentRepository>,
    reports: Arc<dyn ReportRepository>,
    filter: Arc<ContentFilter>,
    audit: Arc<dyn AuditSink>,
    report_threshold: u64,
}

impl Moderation {
    pub fn new(
        content: Arc<dyn ContentRepository>,
        reports: Arc<dyn ReportRepository>,
        filter: Arc<ContentFilter>,
        audit: Arc<dyn AuditSink>,
        report_threshold: u64,
    ) -> Self {
        Self {
            content,
            reports,
            filter,
            audit,
            report_threshold,
        }
    }

    /// Decide the initial status for content being created.
    ///
    /// Clean text is admitted as `Active`; a filter hit quarantines the item
    /// as `Pending` with the matched terms recorded as the reason. The caller
    /// persists the item with the returned status.
    pub async fn screen(
        &self,
        author_id: Uuid,
        title: &str,
        body: &str,
    ) -> Result<ScreenOutcome, DomainError> {
        let verdict = match self.filter.check(title).await? {
            FilterVerdict::Clean => self.filter.check(body).await?,
            dirty => dirty,
        };

        match verdict {
            FilterVerdict::Clean => Ok(ScreenOutcome {
                status: ContentStatus::Active,
                hide_reason: None,
                matched_terms: Vec::new(),
            }),
            FilterVerdict::Dirty { matched } => {
                self.audit
                    .record(AuditEvent::new(
                        Some(author_id),
                        AuditAction::ContentQuarantined,
                        json!({ "matched_terms": matched }),
                    ))
                    .await;

                Ok(ScreenOutcome {
                    status: ContentStatus::Pending,
                    hide_reason: Some(format!("Banned terms: {}", matched.join(", "))),
                    matched_terms: matched,
                })
            }
        }
    }

    /// Hide a post once its report count crosses the threshold.
    ///
    /// Idempotent: only an `Active` post transitions, so concurrent reports
    /// crossing the threshold together cannot double-hide or error. The
    /// comparison is strictly greater-than.
    pub async fn evaluate_auto_hide(&self, post_id: Uuid) -> Result<(), DomainError> {
        let count = self.reports.count_for_post(post_id).await?;
        if count <= self.report_threshold {
            return Ok(());
        }

        let post = self
            .content
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "post",
                id: post_id,
            })?;

        if post.status != ContentStatus::Active {
            return Ok(());
        }

        let reason = format!("Automatically hidden after {count} reports");
        self.content
            .update_status(post_id, ContentStatus::Hidden, Some(reason.clone()))
            .await?;

        tracing::info!(post_id = %post_id, count, "post auto-hidden by report threshold");
        self.audit
            .record(AuditEvent::new(
                None,
                AuditAction::AutoHidePost,
                json!({
                    "post_id": post_id,
                    "report_count": count,
                    "threshold": self.report_threshold,
                    "reason": reason,
                }),
            ))
            .await;

        Ok(())
    }

    /// Apply an explicit moderator decision.
    ///
    /// The role is re-checked here even though the boundary already checks it;
    /// the state machine is the last line of defense against an authorization
    /// bug upstream. Re-applying the current state is a no-op success.
    pub async fn moderate(
        &self,
        actor: &Actor,
        post_id: Uuid,
        action: ModerationAction,
        reason: Option<&str>,
    ) -> Result<ContentStatus, DomainError> {
        if !actor.role.can_moderate() {
            tracing::warn!(
                actor_id = %actor.id,
                role = %actor.role,
                post_id = %post_id,
                "moderation attempt by unauthorized role, possible upstream authorization bug"
            );
            return Err(DomainError::Forbidden);
        }

        let post = self
            .content
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "post",
                id: post_id,
            })?;

        let (new_status, hide_reason, audit_action) = match action {
            ModerationAction::Approve => (ContentStatus::Active, None, AuditAction::ApprovePost),
            ModerationAction::Hide => {
                let reason = reason
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .unwrap_or(DEFAULT_HIDE_REASON)
                    .to_string();
                (ContentStatus::Hidden, Some(reason), AuditAction::HidePost)
            }
        };

        if post.status == new_status {
            tracing::debug!(post_id = %post_id, status = %new_status, "moderation no-op");
            return Ok(new_status);
        }

        self.content
            .update_status(post_id, new_status, hide_reason.clone())
            .await?;

        self.audit
            .record(AuditEvent::new(
                Some(actor.id),
                audit_action,
                json!({
                    "post_id": post_id,
                    "previous_status": post.status.as_str(),
                    "status": new_status.as_str(),
                    "reason": hide_reason,
                }),
            ))
            .await;

        Ok(new_status)
    }
}

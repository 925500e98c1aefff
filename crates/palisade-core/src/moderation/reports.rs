//! Abuse-report intake.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::domain::{MIN_REPORT_REASON_LEN, Report};
use crate::error::DomainError;
use crate::ports::{AuditAction, AuditEvent, AuditSink, ContentRepository, ReportRepository};

use super::state_machine::Moderation;

/// Records reports and feeds the auto-hide evaluation.
///
/// The duplicate check here gives the common case a precise error; the
/// storage unique index on `(reporter_id, post_id)` catches the racing case
/// and surfaces as the same `Duplicate` error.
pub struct ReportDesk {
    reports: Arc<dyn ReportRepository>,
    content: Arc<dyn ContentRepository>,
    moderation: Arc<Moderation>,
    audit: Arc<dyn AuditSink>,
}

impl ReportDesk {
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        content: Arc<dyn ContentRepository>,
        moderation: Arc<Moderation>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            reports,
            content,
            moderation,
            audit,
        }
    }

    /// File a report against a post.
    ///
    /// Runs the auto-hide evaluation synchronously so the report that crosses
    /// the threshold produces an immediate visibility change rather than
    /// waiting for a background sweep.
    pub async fn file_report(
        &self,
        reporter_id: Uuid,
        post_id: Uuid,
        reason: &str,
    ) -> Result<Report, DomainError> {
        let reason = reason.trim();
        if reason.chars().count() < MIN_REPORT_REASON_LEN {
            return Err(DomainError::Validation(format!(
                "report reason must be at least {MIN_REPORT_REASON_LEN} characters"
            )));
        }

        self.content
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "post",
                id: post_id,
            })?;

        if self.reports.exists(reporter_id, post_id).await? {
            return Err(DomainError::Duplicate(
                "this post has already been reported by this user".to_string(),
            ));
        }

        let report = self
            .reports
            .insert(Report::new(reporter_id, post_id, reason.to_string()))
            .await?;

        self.moderation.evaluate_auto_hide(post_id).await?;

        self.audit
            .record(AuditEvent::new(
                Some(reporter_id),
                AuditAction::ReportFiled,
                json!({ "post_id": post_id, "report_id": report.id }),
            ))
            .await;

        Ok(report)
    }

    /// Number of reports filed against a post.
    pub async fn count_reports(&self, post_id: Uuid) -> Result<u64, DomainError> {
        Ok(self.reports.count_for_post(post_id).await?)
    }
}

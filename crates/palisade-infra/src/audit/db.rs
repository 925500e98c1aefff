//! Database-backed audit sink.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DbConn};

use palisade_core::ports::{AuditEvent, AuditSink};

use crate::database::entity::audit_log;

/// Writes one `audit_logs` row per event.
///
/// Write failures degrade to an error log carrying the original event, so a
/// decision is never lost entirely and never fails its request.
pub struct DbAuditSink {
    db: DbConn,
}

impl DbAuditSink {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditSink for DbAuditSink {
    async fn record(&self, event: AuditEvent) {
        let active: audit_log::ActiveModel = event.clone().into();
        if let Err(err) = active.insert(&self.db).await {
            tracing::error!(
                error = %err,
                action = event.action.as_str(),
                actor_id = ?event.actor_id,
                detail = %event.detail,
                "failed to persist audit event"
            );
        }
    }
}

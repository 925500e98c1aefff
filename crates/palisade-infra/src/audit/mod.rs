//! Audit sink implementations.
//!
//! Sinks are observability, not correctness: a failed write is logged and the
//! request proceeds.

use async_trait::async_trait;

use palisade_core::ports::{AuditAction, AuditEvent, AuditSink};

#[cfg(feature = "postgres")]
mod db;
#[cfg(feature = "postgres")]
pub use db::DbAuditSink;

/// Audit sink that emits structured log lines.
///
/// The fallback when no database is configured; decisions still leave a
/// trace in the process logs.
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, event: AuditEvent) {
        tracing::info!(
            action = event.action.as_str(),
            actor_id = ?event.actor_id,
            detail = %event.detail,
            "audit"
        );
    }
}

/// Audit sink that collects events in memory, for tests.
pub struct MemoryAuditSink {
    events: tokio::sync::Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self {
            events: tokio::sync::Mutex::new(Vec::new()),
        }
    }

    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().await.clone()
    }

    pub async fn count_of(&self, action: AuditAction) -> usize {
        self.events
            .lock()
            .await
            .iter()
            .filter(|e| e.action == action)
            .count()
    }
}

impl Default for MemoryAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, event: AuditEvent) {
        self.events.lock().await.push(event);
    }
}

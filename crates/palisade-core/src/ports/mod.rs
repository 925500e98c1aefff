//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod audit;
mod auth;
mod counter;
mod repository;

pub use audit::{AuditAction, AuditEvent, AuditSink};
pub use auth::{AuthError, TokenClaims, TokenService};
pub use counter::{CounterError, CounterStore, CounterValue};
pub use repository::{BannedWordRepository, ContentRepository, ReportRepository};

//! # Palisade Infrastructure
//!
//! Concrete implementations of the ports defined in `palisade-core`:
//! counter stores, repositories, audit sinks, and token validation.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory adapters only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `auth` - JWT token validation
//! - `redis` - Redis counter store

pub mod audit;
pub mod counter;
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use audit::{MemoryAuditSink, TracingAuditSink};
pub use counter::InMemoryCounterStore;
pub use database::memory::{
    MemoryBannedWordRepository, MemoryContentRepository, MemoryReportRepository,
};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};

// Re-exports - Postgres
#[cfg(feature = "postgres")]
pub use audit::DbAuditSink;
#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, PostgresBannedWordRepository, PostgresContentRepository,
    PostgresReportRepository,
};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use counter::{RedisCounterConfig, RedisCounterStore};

#[cfg(test)]
mod pipeline_tests;

//! Application state - shared across all handlers.

use std::sync::Arc;

use palisade_core::moderation::{ContentFilter, Moderation, RateLimiter, ReportDesk, WordCache};
use palisade_core::ports::{
    AuditSink, BannedWordRepository, ContentRepository, CounterStore, ReportRepository,
    TokenService,
};
use palisade_infra::{
    DbAuditSink, InMemoryCounterStore, JwtTokenService, MemoryBannedWordRepository,
    MemoryContentRepository, MemoryReportRepository, PostgresBannedWordRepository,
    PostgresContentRepository, PostgresReportRepository, RedisCounterStore, TracingAuditSink,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub rate_limiter: Arc<RateLimiter>,
    pub filter: Arc<ContentFilter>,
    pub moderation: Arc<Moderation>,
    pub reports: Arc<ReportDesk>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (content, report_repo, words, audit) = Self::persistence(config).await;
        let counter = Self::counter_store().await;

        let rate_limiter = Arc::new(RateLimiter::new(
            counter,
            audit.clone(),
            config.moderation.rate_limits.clone(),
        ));

        // One cache instance for the process; handlers share it through the
        // filter.
        let cache = Arc::new(WordCache::new());
        let filter = Arc::new(ContentFilter::new(
            words,
            audit.clone(),
            cache,
            config.moderation.cache_ttl,
        ));

        let moderation = Arc::new(Moderation::new(
            content.clone(),
            report_repo.clone(),
            filter.clone(),
            audit.clone(),
            config.moderation.report_threshold,
        ));

        let reports = Arc::new(ReportDesk::new(
            report_repo,
            content,
            moderation.clone(),
            audit,
        ));

        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());

        tracing::info!("Application state initialized");

        Self {
            rate_limiter,
            filter,
            moderation,
            reports,
            tokens,
        }
    }

    async fn persistence(
        config: &AppConfig,
    ) -> (
        Arc<dyn ContentRepository>,
        Arc<dyn ReportRepository>,
        Arc<dyn BannedWordRepository>,
        Arc<dyn AuditSink>,
    ) {
        if let Some(db_config) = &config.database {
            match db_config.connect().await {
                Ok(conn) => {
                    return (
                        Arc::new(PostgresContentRepository::new(conn.clone())),
                        Arc::new(PostgresReportRepository::new(conn.clone())),
                        Arc::new(PostgresBannedWordRepository::new(conn.clone())),
                        Arc::new(DbAuditSink::new(conn)),
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        (
            Arc::new(MemoryContentRepository::new()),
            Arc::new(MemoryReportRepository::new()),
            Arc::new(MemoryBannedWordRepository::new()),
            Arc::new(TracingAuditSink),
        )
    }

    async fn counter_store() -> Arc<dyn CounterStore> {
        if std::env::var("REDIS_URL").is_ok() {
            match RedisCounterStore::from_env().await {
                Ok(store) => return Arc::new(store),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to Redis: {}. Using in-memory counters.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("REDIS_URL not set. Rate-limit counters are per-process only.");
        }

        Arc::new(InMemoryCounterStore::new())
    }
}

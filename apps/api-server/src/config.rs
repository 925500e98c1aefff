//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use palisade_core::moderation::RateLimitSettings;
use palisade_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub moderation: ModerationConfig,
}

/// Boundary-visible moderation thresholds. None of these are hard-coded in
/// the pipeline itself.
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    pub rate_limits: RateLimitSettings,
    pub report_threshold: u64,
    pub cache_ttl: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = RateLimitSettings::default();
        let rate_limits = RateLimitSettings {
            window: Duration::from_secs(env_u64(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.window.as_secs(),
            )),
            login: env_u32("RATE_LIMIT_LOGIN", defaults.login),
            register: env_u32("RATE_LIMIT_REGISTER", defaults.register),
            create_post: env_u32("RATE_LIMIT_CREATE_POST", defaults.create_post),
            create_comment: env_u32("RATE_LIMIT_CREATE_COMMENT", defaults.create_comment),
            default_limit: env_u32("RATE_LIMIT_DEFAULT", defaults.default_limit),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig::from_env(),
            moderation: ModerationConfig {
                rate_limits,
                report_threshold: env_u64("REPORT_AUTO_HIDE_THRESHOLD", 5),
                cache_ttl: Duration::from_secs(env_u64("BANNED_WORD_CACHE_TTL_SECS", 60)),
            },
        }
    }
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

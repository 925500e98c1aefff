//! The moderation pipeline services.
//!
//! Control flow for an inbound write request: `RateLimiter` first (reject
//! fast on exceed), then `ContentFilter` via `Moderation::screen` for
//! content-producing requests, `ReportDesk` for reports (which feeds
//! `Moderation::evaluate_auto_hide`), and `Moderation::moderate` for explicit
//! moderator overrides.

mod content_filter;
mod rate_limit;
mod reports;
mod state_machine;

pub use content_filter::{ContentFilter, FilterVerdict, WordCache};
pub use rate_limit::{ActionClass, ClientKey, RateLimitDecision, RateLimitSettings, RateLimiter};
pub use reports::ReportDesk;
pub use state_machine::{Actor, Moderation, ModerationAction, ScreenOutcome};

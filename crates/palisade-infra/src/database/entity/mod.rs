//! SeaORM entities for the moderation schema.

pub mod audit_log;
pub mod banned_word;
pub mod post;
pub mod report;

//! Data Transfer Objects - request/response types for the moderation API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to check a rate limit on behalf of the forum backend, for actions
/// it serves itself (login, register). Exactly one of `ip`/`user_id` should
/// be set; `user_id` wins when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateCheckRequest {
    pub action: String,
    pub ip: Option<String>,
    pub user_id: Option<Uuid>,
}

/// Rate-limit decision for the forum backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateCheckResponse {
    pub allowed: bool,
    pub limit: Option<u32>,
    pub retry_after_secs: Option<u64>,
}

/// Request to screen content that is about to be created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenRequest {
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
}

/// Screening decision: the status to persist the new item with.
///
/// `matched_terms` is for the trusted forum backend and its logs; the
/// user-facing `message` stays generic so the word list cannot be probed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenResponse {
    pub status: String,
    pub hide_reason: Option<String>,
    pub matched_terms: Vec<String>,
    pub message: String,
}

/// Request to report a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReportRequest {
    pub post_id: Uuid,
    pub reason: String,
}

/// A filed report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub status: String,
    pub created_at: String,
}

/// Request to approve or hide a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerateRequest {
    pub action: String,
    pub reason: Option<String>,
}

/// Outcome of a moderation action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerateResponse {
    pub post_id: Uuid,
    pub status: String,
}

/// Request to add a banned word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddBannedWordRequest {
    pub word: String,
}

/// A banned-word list entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannedWordResponse {
    pub id: Uuid,
    pub word: String,
    pub created_at: String,
}

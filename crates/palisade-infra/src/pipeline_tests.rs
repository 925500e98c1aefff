//! End-to-end pipeline tests over the in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use palisade_core::DomainError;
use palisade_core::domain::{ContentItem, ContentStatus, Role};
use palisade_core::moderation::{
    Actor, ContentFilter, Moderation, ModerationAction, ReportDesk, WordCache,
};
use palisade_core::ports::AuditAction;
use palisade_core::ports::ContentRepository;

use crate::audit::MemoryAuditSink;
use crate::database::memory::{
    MemoryBannedWordRepository, MemoryContentRepository, MemoryReportRepository,
};

struct Pipeline {
    content: Arc<MemoryContentRepository>,
    audit: Arc<MemoryAuditSink>,
    filter: Arc<ContentFilter>,
    moderation: Arc<Moderation>,
    desk: ReportDesk,
}

/// Wire the full pipeline over fresh in-memory adapters. The filter cache TTL
/// is zero so every check reloads and list edits are visible immediately.
fn pipeline(threshold: u64) -> Pipeline {
    let content = Arc::new(MemoryContentRepository::new());
    let reports = Arc::new(MemoryReportRepository::new());
    let words = Arc::new(MemoryBannedWordRepository::new());
    let audit = Arc::new(MemoryAuditSink::new());

    let filter = Arc::new(ContentFilter::new(
        words,
        audit.clone(),
        Arc::new(WordCache::new()),
        Duration::ZERO,
    ));

    let moderation = Arc::new(Moderation::new(
        content.clone(),
        reports.clone(),
        filter.clone(),
        audit.clone(),
        threshold,
    ));

    let desk = ReportDesk::new(reports, content.clone(), moderation.clone(), audit.clone());

    Pipeline {
        content,
        audit,
        filter,
        moderation,
        desk,
    }
}

async fn seed_post(p: &Pipeline) -> Uuid {
    let item = ContentItem::new(
        Uuid::new_v4(),
        "A title".to_string(),
        "A body".to_string(),
        ContentStatus::Active,
    );
    let id = item.id;
    p.content.insert(item).await;
    id
}

fn moderator() -> Actor {
    Actor {
        id: Uuid::new_v4(),
        role: Role::Moderator,
    }
}

#[tokio::test]
async fn report_reason_must_meet_minimum_length() {
    let p = pipeline(5);
    let post_id = seed_post(&p).await;

    let result = p.desk.file_report(Uuid::new_v4(), post_id, "  bad  ").await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn reporting_an_unknown_post_fails() {
    let p = pipeline(5);

    let result = p
        .desk
        .file_report(Uuid::new_v4(), Uuid::new_v4(), "spam content")
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn second_report_from_same_user_is_a_duplicate() {
    let p = pipeline(5);
    let post_id = seed_post(&p).await;
    let reporter = Uuid::new_v4();

    p.desk
        .file_report(reporter, post_id, "spam content")
        .await
        .unwrap();

    let result = p.desk.file_report(reporter, post_id, "spam content").await;
    assert!(matches!(result, Err(DomainError::Duplicate(_))));
}

#[tokio::test]
async fn concurrent_duplicate_reports_yield_exactly_one_success() {
    let p = pipeline(5);
    let post_id = seed_post(&p).await;
    let reporter = Uuid::new_v4();

    let (a, b) = tokio::join!(
        p.desk.file_report(reporter, post_id, "spam content"),
        p.desk.file_report(reporter, post_id, "spam content"),
    );

    assert_eq!(
        [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(),
        1,
        "exactly one of the racing reports may succeed"
    );
}

#[tokio::test]
async fn threshold_is_strictly_greater_than() {
    let p = pipeline(5);
    let post_id = seed_post(&p).await;

    for _ in 0..5 {
        p.desk
            .file_report(Uuid::new_v4(), post_id, "spam content")
            .await
            .unwrap();
    }

    // Five reports reach the threshold without crossing it.
    let item = p.content.find_by_id(post_id).await.unwrap().unwrap();
    assert_eq!(item.status, ContentStatus::Active);

    p.desk
        .file_report(Uuid::new_v4(), post_id, "spam content")
        .await
        .unwrap();

    let item = p.content.find_by_id(post_id).await.unwrap().unwrap();
    assert_eq!(item.status, ContentStatus::Hidden);
    assert!(item.hide_reason.unwrap().contains("6 reports"));
    assert_eq!(p.audit.count_of(AuditAction::AutoHidePost).await, 1);
}

#[tokio::test]
async fn auto_hide_does_not_repeat_once_hidden() {
    let p = pipeline(5);
    let post_id = seed_post(&p).await;

    for _ in 0..7 {
        p.desk
            .file_report(Uuid::new_v4(), post_id, "spam content")
            .await
            .unwrap();
    }

    assert_eq!(p.desk.count_reports(post_id).await.unwrap(), 7);
    assert_eq!(p.audit.count_of(AuditAction::AutoHidePost).await, 1);
}

#[tokio::test]
async fn concurrent_threshold_crossing_is_benign() {
    let p = pipeline(1);
    let post_id = seed_post(&p).await;

    p.desk
        .file_report(Uuid::new_v4(), post_id, "spam content")
        .await
        .unwrap();

    // Two more reports race past the threshold together.
    let (a, b) = tokio::join!(
        p.desk.file_report(Uuid::new_v4(), post_id, "spam content"),
        p.desk.file_report(Uuid::new_v4(), post_id, "spam content"),
    );
    a.unwrap();
    b.unwrap();

    let item = p.content.find_by_id(post_id).await.unwrap().unwrap();
    assert_eq!(item.status, ContentStatus::Hidden);
    assert!(p.audit.count_of(AuditAction::AutoHidePost).await >= 1);
}

#[tokio::test]
async fn user_role_cannot_moderate() {
    let p = pipeline(5);
    let post_id = seed_post(&p).await;
    let actor = Actor {
        id: Uuid::new_v4(),
        role: Role::User,
    };

    let result = p
        .moderation
        .moderate(&actor, post_id, ModerationAction::Hide, None)
        .await;
    assert!(matches!(result, Err(DomainError::Forbidden)));

    let item = p.content.find_by_id(post_id).await.unwrap().unwrap();
    assert_eq!(item.status, ContentStatus::Active);
}

#[tokio::test]
async fn approve_restores_a_hidden_post_and_repeats_as_noop() {
    let p = pipeline(5);
    let post_id = seed_post(&p).await;
    let actor = moderator();

    p.moderation
        .moderate(&actor, post_id, ModerationAction::Hide, Some("off topic"))
        .await
        .unwrap();
    let item = p.content.find_by_id(post_id).await.unwrap().unwrap();
    assert_eq!(item.status, ContentStatus::Hidden);
    assert_eq!(item.hide_reason.as_deref(), Some("off topic"));

    let status = p
        .moderation
        .moderate(&actor, post_id, ModerationAction::Approve, None)
        .await
        .unwrap();
    assert_eq!(status, ContentStatus::Active);

    // Re-approving is a success without a second transition or audit record.
    let status = p
        .moderation
        .moderate(&actor, post_id, ModerationAction::Approve, None)
        .await
        .unwrap();
    assert_eq!(status, ContentStatus::Active);
    assert_eq!(p.audit.count_of(AuditAction::ApprovePost).await, 1);
}

#[tokio::test]
async fn hide_without_reason_uses_the_default() {
    let p = pipeline(5);
    let post_id = seed_post(&p).await;

    p.moderation
        .moderate(&moderator(), post_id, ModerationAction::Hide, Some("   "))
        .await
        .unwrap();

    let item = p.content.find_by_id(post_id).await.unwrap().unwrap();
    assert_eq!(
        item.hide_reason.as_deref(),
        Some("Community guidelines violation")
    );
}

#[tokio::test]
async fn moderating_an_unknown_post_fails() {
    let p = pipeline(5);

    let result = p
        .moderation
        .moderate(&moderator(), Uuid::new_v4(), ModerationAction::Approve, None)
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn screening_quarantines_banned_terms() {
    let p = pipeline(5);
    let admin_id = Uuid::new_v4();
    p.filter.add_word(admin_id, "spam").await.unwrap();

    let author = Uuid::new_v4();
    let outcome = p
        .moderation
        .screen(author, "Totally SPAM offer", "harmless body")
        .await
        .unwrap();
    assert_eq!(outcome.status, ContentStatus::Pending);
    assert_eq!(outcome.matched_terms, vec!["spam".to_string()]);
    assert!(outcome.hide_reason.unwrap().contains("spam"));
    assert_eq!(p.audit.count_of(AuditAction::ContentQuarantined).await, 1);

    let outcome = p
        .moderation
        .screen(author, "Fine title", "fine body")
        .await
        .unwrap();
    assert_eq!(outcome.status, ContentStatus::Active);
    assert!(outcome.hide_reason.is_none());
}

#[tokio::test]
async fn screening_checks_the_body_too() {
    let p = pipeline(5);
    p.filter.add_word(Uuid::new_v4(), "scam").await.unwrap();

    let outcome = p
        .moderation
        .screen(Uuid::new_v4(), "Fine title", "an obvious SCAM")
        .await
        .unwrap();
    assert_eq!(outcome.status, ContentStatus::Pending);
}

#[tokio::test]
async fn deleted_words_stop_matching() {
    let p = pipeline(5);
    let admin_id = Uuid::new_v4();

    let word = p.filter.add_word(admin_id, "Spam").await.unwrap();
    let outcome = p
        .moderation
        .screen(Uuid::new_v4(), "spam here", "body")
        .await
        .unwrap();
    assert_eq!(outcome.status, ContentStatus::Pending);

    p.filter.delete_word(admin_id, word.id).await.unwrap();
    let outcome = p
        .moderation
        .screen(Uuid::new_v4(), "spam here", "body")
        .await
        .unwrap();
    assert_eq!(outcome.status, ContentStatus::Active);
}

//! Creation-time content screening for the forum backend.

use actix_web::{HttpResponse, web};

use palisade_core::domain::ContentStatus;
use palisade_shared::dto::{ScreenRequest, ScreenResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/screen
///
/// Returns the status the forum should persist the new item with. The
/// `message` is safe to show the author; matched terms are only for the
/// forum's own records.
pub async fn screen_content(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<ScreenRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let outcome = state
        .moderation
        .screen(req.author_id, &req.title, &req.body)
        .await?;

    let message = match outcome.status {
        ContentStatus::Pending => {
            "Your post is awaiting review for a suspected content violation.".to_string()
        }
        _ => "Post published.".to_string(),
    };

    Ok(HttpResponse::Ok().json(ScreenResponse {
        status: outcome.status.as_str().to_string(),
        hide_reason: outcome.hide_reason,
        matched_terms: outcome.matched_terms,
        message,
    }))
}

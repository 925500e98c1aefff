//! Moderator actions on posts.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use palisade_core::moderation::{Actor, ModerationAction};
use palisade_shared::ApiResponse;
use palisade_shared::dto::{ModerateRequest, ModerateResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/moderation/posts/{id}
pub async fn moderate_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<ModerateRequest>,
) -> AppResult<HttpResponse> {
    // Route-level check; the state machine re-checks on its own.
    if !identity.role.can_moderate() {
        return Err(AppError::Forbidden);
    }

    let post_id = path.into_inner();
    let req = body.into_inner();

    let action = req
        .action
        .parse::<ModerationAction>()
        .map_err(AppError::BadRequest)?;

    let actor = Actor {
        id: identity.user_id,
        role: identity.role,
    };

    let status = state
        .moderation
        .moderate(&actor, post_id, action, req.reason.as_deref())
        .await?;

    let message = match action {
        ModerationAction::Approve => "Post approved",
        ModerationAction::Hide => "Post hidden",
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        ModerateResponse {
            post_id,
            status: status.as_str().to_string(),
        },
        message,
    )))
}

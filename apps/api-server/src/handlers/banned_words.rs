//! Banned-word list administration.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use palisade_core::domain::BannedWord;
use palisade_shared::ApiResponse;
use palisade_shared::dto::{AddBannedWordRequest, BannedWordResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(word: BannedWord) -> BannedWordResponse {
    BannedWordResponse {
        id: word.id,
        word: word.word,
        created_at: word.created_at.to_rfc3339(),
    }
}

/// GET /api/admin/banned-words
pub async fn list(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    if !identity.role.can_manage_filter() {
        return Err(AppError::Forbidden);
    }

    let words = state.filter.list().await?;
    let response: Vec<BannedWordResponse> = words.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}

/// POST /api/admin/banned-words
pub async fn add(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<AddBannedWordRequest>,
) -> AppResult<HttpResponse> {
    if !identity.role.can_manage_filter() {
        return Err(AppError::Forbidden);
    }

    let word = state
        .filter
        .add_word(identity.user_id, &body.word)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_response(word))))
}

/// DELETE /api/admin/banned-words/{id}
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    if !identity.role.can_manage_filter() {
        return Err(AppError::Forbidden);
    }

    state
        .filter
        .delete_word(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Banned word removed")))
}

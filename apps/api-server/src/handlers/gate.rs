//! Rate-limit gate for the forum backend.
//!
//! The forum serves login/register/post/comment itself; before handling one
//! it asks the gate whether the acting client is within its class limit.

use actix_web::{HttpResponse, web};

use palisade_core::moderation::{ActionClass, ClientKey, RateLimitDecision};
use palisade_shared::dto::{GateCheckRequest, GateCheckResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/gate/check
pub async fn check(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<GateCheckRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let class = req
        .action
        .parse::<ActionClass>()
        .map_err(AppError::BadRequest)?;

    let client = match (req.user_id, req.ip) {
        (Some(user_id), _) => ClientKey::User(user_id),
        (None, Some(ip)) => ClientKey::Ip(ip),
        (None, None) => {
            return Err(AppError::BadRequest(
                "either ip or user_id is required".to_string(),
            ));
        }
    };

    let response = match state.rate_limiter.check(class, &client).await {
        RateLimitDecision::Allowed { .. } => GateCheckResponse {
            allowed: true,
            limit: None,
            retry_after_secs: None,
        },
        RateLimitDecision::Denied {
            limit, retry_after, ..
        } => GateCheckResponse {
            allowed: false,
            limit: Some(limit),
            retry_after_secs: Some(retry_after.as_secs().max(1)),
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

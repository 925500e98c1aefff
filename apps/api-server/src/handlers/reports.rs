//! Abuse report endpoint.

use actix_web::{HttpResponse, web};

use palisade_shared::ApiResponse;
use palisade_shared::dto::{FileReportRequest, ReportResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/reports
pub async fn file_report(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<FileReportRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let report = state
        .reports
        .file_report(identity.user_id, req.post_id, &req.reason)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        ReportResponse {
            id: report.id,
            post_id: report.post_id,
            status: report.status.as_str().to_string(),
            created_at: report.created_at.to_rfc3339(),
        },
        "Report submitted. A moderator will review it.",
    )))
}

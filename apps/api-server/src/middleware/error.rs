//! Error handling middleware - RFC 7807 compliant responses.
//!
//! The failure policy is explicit per class rather than a generic catch-all:
//! a rate-limit denial becomes 429 with a retry hint, a domain conflict 409,
//! and infrastructure failures on the persistence-dependent paths propagate
//! as 500 - silently accepting unmoderated writes during a database outage is
//! not an acceptable trade.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use palisade_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Forbidden,
    Conflict(String),
    RateLimited { retry_after_secs: u64 },
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::RateLimited { retry_after_secs } => {
                write!(f, "Rate limited, retry in {}s", retry_after_secs)
            }
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(detail) => {
                HttpResponse::build(self.status_code()).json(ErrorResponse::not_found(detail))
            }
            AppError::BadRequest(detail) => {
                HttpResponse::build(self.status_code()).json(ErrorResponse::bad_request(detail))
            }
            AppError::Forbidden => {
                HttpResponse::build(self.status_code()).json(ErrorResponse::forbidden())
            }
            AppError::Conflict(detail) => HttpResponse::build(self.status_code())
                .json(ErrorResponse::new(409, "Conflict").with_detail(detail)),
            AppError::RateLimited { retry_after_secs } => HttpResponse::TooManyRequests()
                .insert_header(("Retry-After", retry_after_secs.to_string()))
                .json(ErrorResponse::too_many_requests(*retry_after_secs)),
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                HttpResponse::build(self.status_code()).json(ErrorResponse::internal_error())
            }
        }
    }
}

// Conversion from domain errors
impl From<palisade_core::DomainError> for AppError {
    fn from(err: palisade_core::DomainError) -> Self {
        match err {
            palisade_core::DomainError::NotFound { entity, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity, id))
            }
            palisade_core::DomainError::Validation(msg) => AppError::BadRequest(msg),
            palisade_core::DomainError::Duplicate(msg) => AppError::Conflict(msg),
            palisade_core::DomainError::Forbidden => AppError::Forbidden,
            palisade_core::DomainError::Infrastructure(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

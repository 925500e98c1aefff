//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - moderation pipeline failures surfaced to the boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Action forbidden for this role")]
    Forbidden,

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            // Unique-index violations back up the application-level duplicate
            // checks when two requests race past them.
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            other => DomainError::Infrastructure(other.to_string()),
        }
    }
}

//! Token validation port.
//!
//! The forum application issues tokens; this service only validates them so
//! the boundary can attribute requests to a user and role.

use uuid::Uuid;

use crate::domain::Role;

/// Claims carried by a validated token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub role: Role,
    pub exp: i64,
}

/// Token service trait.
pub trait TokenService: Send + Sync {
    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}

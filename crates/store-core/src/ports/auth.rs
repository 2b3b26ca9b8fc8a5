//! Authentication and authorization ports.

use crate::domain::{Principal, Role};

/// Claims carried by an access token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    /// Username (email) of the principal.
    pub subject: String,
    pub roles: Vec<Role>,
}

impl From<TokenClaims> for Principal {
    fn from(claims: TokenClaims) -> Self {
        Self {
            username: claims.subject,
            roles: claims.roles,
        }
    }
}

/// Token service trait for signed, stateless access tokens.
pub trait TokenService: Send + Sync {
    /// Generate an access token for a subject. Every call yields a new token.
    fn generate_token(&self, subject: &str, roles: &[Role]) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
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

    #[error("Token creation failed: {0}")]
    TokenCreation(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}

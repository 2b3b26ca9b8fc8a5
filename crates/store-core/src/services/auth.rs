use std::sync::Arc;

use crate::domain::{Principal, Role, User};
use crate::error::DomainError;
use crate::ports::{AuthError, PasswordService, TokenService, UserRepository};

/// Login, token refresh and account bootstrap.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            users,
            tokens,
            passwords,
        }
    }

    /// Exchange credentials for an access token.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            tracing::warn!(user_email = %mask_email(email), "Rejected login");
            return Err(DomainError::Unauthorized);
        }

        tracing::info!(user_email = %mask_email(email), "User logged in");
        self.issue(&user.email, &user.roles)
    }

    /// Issue a fresh token for an already authenticated principal.
    ///
    /// Roles are reloaded from the store so revoked roles do not survive a refresh.
    pub async fn refresh_token(&self, principal: &Principal) -> Result<String, DomainError> {
        let user = self
            .users
            .find_by_email(&principal.username)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        tracing::debug!(user_email = %mask_email(&user.email), "Refreshing token");
        self.issue(&user.email, &user.roles)
    }

    /// Resolve the principal behind a bearer token.
    pub fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        self.tokens.validate_token(token).map(Principal::from)
    }

    /// Create an administrator account unless the email is already taken.
    pub async fn ensure_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        if let Some(existing) = self.users.find_by_email(email).await? {
            return Ok(existing);
        }

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let user = User::new(name.to_string(), email.to_string(), password_hash)
            .with_role(Role::Admin);
        let saved = self.users.save(user).await?;

        tracing::info!(user_email = %mask_email(email), "Administrator account created");
        Ok(saved)
    }

    fn issue(&self, subject: &str, roles: &[Role]) -> Result<String, DomainError> {
        self.tokens
            .generate_token(subject, roles)
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

/// Mask an email for logging to avoid PII in logs.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***{domain}"),
                _ => format!("***{domain}"),
            }
        }
        None => "***".to_string(),
    }
}

//! Authentication and authorization extractors.
//!
//! List the extractor first in a handler's arguments so the check runs
//! before the request body is read.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use store_core::domain::{Principal, Role};
use store_core::ports::AuthError;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated caller. Rejects the request with 401 when no valid bearer
/// token is present.
///
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.principal.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub principal: Principal,
}

impl Identity {
    /// Check if the caller has a specific role.
    pub fn has_role(&self, role: Role) -> bool {
        self.principal.has_role(role)
    }
}

/// Caller holding the `ADMIN` role.
///
/// Anonymous callers and callers without the role get 403; a malformed or
/// expired token is still a 401.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub Identity);

/// Read the bearer token, `Ok(None)` when the header is absent.
fn bearer_token(req: &HttpRequest) -> Result<Option<&str>, AuthError> {
    let auth_header = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => value,
        None => return Ok(None),
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(|token| Some(token.trim()))
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

fn authenticate(req: &HttpRequest) -> Result<Option<Identity>, AppError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AppError::Internal("Server configuration error".to_string())
    })?;

    let Some(token) = bearer_token(req)? else {
        return Ok(None);
    };

    let principal = state.auth.authenticate(token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        AppError::from(e)
    })?;

    Ok(Some(Identity { principal }))
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).and_then(|identity| {
            identity.ok_or_else(|| AppError::from(AuthError::MissingAuth))
        }))
    }
}

impl FromRequest for AdminIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match authenticate(req) {
            Ok(Some(identity)) if identity.has_role(Role::Admin) => Ok(AdminIdentity(identity)),
            Ok(Some(identity)) => {
                tracing::warn!(
                    username = %store_core::services::mask_email(&identity.principal.username),
                    path = %req.path(),
                    "Admin role required"
                );
                Err(AppError::Forbidden)
            }
            Ok(None) => Err(AppError::Forbidden),
            Err(e) => Err(e),
        };

        ready(result)
    }
}

//! Authentication handlers.

use actix_web::{HttpResponse, http::header, web};
use validator::Validate;

use store_core::DomainError;
use store_shared::dto::LoginRequest;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Empty `204` carrying the token in the `Authorization` header.
fn bearer_response(token: &str) -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .insert_header((header::ACCESS_CONTROL_EXPOSE_HEADERS, "Authorization"))
        .finish()
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let token = state
        .auth
        .login(&req.email, &req.password)
        .await
        .map_err(|e| match e {
            DomainError::Unauthorized => AppError::Unauthorized("Invalid email or password".into()),
            other => other.into(),
        })?;

    Ok(bearer_response(&token))
}

/// POST /auth/refresh_token - Protected route
pub async fn refresh_token(
    identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let token = state.auth.refresh_token(&identity.principal).await?;
    Ok(bearer_response(&token))
}

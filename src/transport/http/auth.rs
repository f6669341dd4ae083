//! Bearer-token extractors. Adding `AuthUser` or `AdminAuth` to a handler's arguments
//! is what makes the route authenticated.

use crate::error::AppError;
use crate::transport::http::types::AppState;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::extract::FromRequestParts;

/// The user a verified token was issued to.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i32,
}

/// A verified admin token.
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AppError> {
    let header = header.ok_or_else(|| AppError::Unauthorized("Token not provided".to_string()))?;
    let parts: Vec<&str> = header.split_whitespace().collect();
    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AppError::Unauthorized("Malformed token".to_string())),
    }
}

fn header_value(parts: &Parts) -> Result<Option<&str>, AppError> {
    match parts.headers.get(AUTHORIZATION) {
        None => Ok(None),
        Some(v) => v
            .to_str()
            .map(Some)
            .map_err(|_| AppError::Unauthorized("Malformed token".to_string())),
    }
}

fn invalid_token() -> AppError {
    AppError::Unauthorized("Invalid or expired token".to_string())
}

#[async_trait::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parse_bearer(header_value(parts)?)?;
        let claims = state.tokens.verify_user_token(token).map_err(|_| invalid_token())?;
        Ok(AuthUser {
            user_id: claims.user_id,
        })
    }
}

#[async_trait::async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parse_bearer(header_value(parts)?)?;
        let claims = state.tokens.verify_admin_token(token).map_err(|_| invalid_token())?;
        if !claims.admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        Ok(AdminAuth)
    }
}

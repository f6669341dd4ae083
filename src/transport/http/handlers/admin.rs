use crate::crypto::password::secrets_match;
use crate::error::AppError;
use crate::transport::http::auth::AdminAuth;
use crate::transport::http::handlers::common::{body, ok};
use crate::transport::http::types::{AdminLoginRequest, ApiResponse, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use tracing::{info, warn};

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin token issued; data is `{token}`", body = ApiResponse),
        (status = 401, description = "Wrong password or admin login disabled", body = ApiResponse)
    )
)]
pub async fn admin_login_handler(
    State(state): State<AppState>,
    request: Result<Json<AdminLoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = body(request)?;
    let rejected = || AppError::Unauthorized("Invalid admin password".to_string());

    let Some(expected) = state.config.admin_password.as_deref() else {
        warn!("admin login attempted but ADMIN_PASSWORD is not set");
        return Err(rejected());
    };
    match request.password.as_deref() {
        Some(given) if secrets_match(given, expected) => {}
        _ => return Err(rejected()),
    }

    let token = state.tokens.issue_admin_token()?;
    info!("admin logged in");
    ok(json!({ "token": token }))
}

#[utoipa::path(
    get,
    path = "/api/admin/data",
    responses(
        (status = 200, description = "Every user and every row across all users", body = ApiResponse),
        (status = 401, description = "Missing or invalid admin token", body = ApiResponse),
        (status = 403, description = "Token is not an admin token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn admin_data_handler(State(state): State<AppState>, _admin: AdminAuth) -> Result<Response, AppError> {
    ok(state.db_service.admin_snapshot().await?)
}

use crate::error::AppError;
use crate::transport::http::auth::AuthUser;
use crate::transport::http::handlers::common::{body, ok};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "The user's settings object (defaults created on first access)", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_settings_handler(State(state): State<AppState>, auth: AuthUser) -> Result<Response, AppError> {
    ok(state.db_service.load_settings(auth.user_id).await?)
}

#[utoipa::path(
    put,
    path = "/api/settings",
    request_body(content = Object, description = "Keys to merge over the stored settings"),
    responses(
        (status = 200, description = "The merged settings object", body = ApiResponse),
        (status = 400, description = "Body is not an object or `savingsPercentage` is out of range", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn update_settings_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Response, AppError> {
    let patch = body(request)?;
    ok(state.db_service.update_settings(auth.user_id, patch).await?)
}

use crate::domain::model::savings::{DEFAULT_COLOR, DEFAULT_ICON};
use crate::domain::model::{MovementKind, SavingsBoxView};
use crate::domain::money::ensure_non_negative;
use crate::domain::rules;
use crate::error::AppError;
use crate::storage::{self, savings::NewSavingsBox};
use crate::transport::http::auth::AuthUser;
use crate::transport::http::handlers::common::{body, created, message, ok, required, today, ApiPath};
use crate::transport::http::types::{ApiResponse, AppState, CreateSavingsRequest, SavingsActionRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use rust_decimal::Decimal;
use serde_json::json;

fn non_blank(value: Option<&str>, fallback: &'static str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[utoipa::path(
    get,
    path = "/api/savings",
    responses(
        (status = 200, description = "Savings boxes, newest first, with `progress` toward the goal", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn list_savings_handler(State(state): State<AppState>, auth: AuthUser) -> Result<Response, AppError> {
    let views: Vec<SavingsBoxView> = storage::savings::list_boxes(state.db_service.pool(), auth.user_id)
        .await?
        .into_iter()
        .map(SavingsBoxView::from)
        .collect();
    ok(views)
}

#[utoipa::path(
    post,
    path = "/api/savings",
    request_body = CreateSavingsRequest,
    responses(
        (status = 201, description = "Savings box created; data is `{id}`", body = ApiResponse),
        (status = 400, description = "Missing name or negative amount", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_savings_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    request: Result<Json<CreateSavingsRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = body(request)?;
    let name = rules::required_text("name", request.name.as_deref())?;
    let goal = ensure_non_negative("goal", request.goal.unwrap_or(Decimal::ZERO))?;
    let current_value = ensure_non_negative("currentValue", request.current_value.unwrap_or(Decimal::ZERO))?;
    let icon = non_blank(request.icon.as_deref(), DEFAULT_ICON);
    let color = non_blank(request.color.as_deref(), DEFAULT_COLOR);

    let savings_box = state
        .db_service
        .create_savings_box(
            &NewSavingsBox {
                user_id: auth.user_id,
                name: &name,
                goal,
                current_value,
                icon: &icon,
                color: &color,
            },
            today(),
        )
        .await?;
    created(savings_box.id)
}

#[utoipa::path(
    post,
    path = "/api/savings/{id}/action",
    params(("id" = i32, Path, description = "Savings box id")),
    request_body = SavingsActionRequest,
    responses(
        (status = 200, description = "Balance updated; data is `{currentValue}`", body = ApiResponse),
        (status = 400, description = "Invalid type or value, or withdrawal above the balance", body = ApiResponse),
        (status = 404, description = "No such savings box", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn savings_action_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i32>,
    request: Result<Json<SavingsActionRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = body(request)?;
    let kind: MovementKind = required("type", request.kind)?.trim().parse()?;
    let value = required("value", request.value)?;

    let savings_box = state
        .db_service
        .move_savings(auth.user_id, id, kind, value, today())
        .await?;
    ok(json!({ "currentValue": savings_box.current_value }))
}

#[utoipa::path(
    delete,
    path = "/api/savings/{id}",
    params(("id" = i32, Path, description = "Savings box id")),
    responses(
        (status = 200, description = "Savings box deleted", body = ApiResponse),
        (status = 404, description = "No such savings box", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_savings_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, AppError> {
    if !storage::savings::delete_box(state.db_service.pool(), auth.user_id, id).await? {
        return Err(AppError::not_found("Savings box"));
    }
    message("Savings box deleted")
}

use crate::domain::model::FixedExpenseView;
use crate::domain::money::ensure_positive;
use crate::domain::rules;
use crate::domain::MonthKey;
use crate::error::AppError;
use crate::storage;
use crate::transport::http::auth::AuthUser;
use crate::transport::http::handlers::common::{
    body, created, message, month_or_current, ok, optional_body, required, today, ApiPath, ApiQuery,
};
use crate::transport::http::types::{ApiResponse, AppState, CreateFixedExpenseRequest, MonthQuery, MonthRequest};
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::json;

/// Pay/unpay/reset accept an optional `{"month": "YYYY-MM"}` body; an empty body means this
/// month. A body that is present but malformed is rejected rather than defaulted.
fn requested_month(raw: &Bytes) -> Result<MonthKey, AppError> {
    let request: MonthRequest = optional_body(raw)?.unwrap_or_default();
    month_or_current(request.month.as_deref())
}

#[utoipa::path(
    get,
    path = "/api/fixed-expenses",
    params(MonthQuery),
    responses(
        (status = 200, description = "Fixed expenses by due day, each with a `paid` flag for the month", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn list_fixed_expenses_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Response, AppError> {
    let month = month_or_current(query.month.as_deref())?;
    let views: Vec<FixedExpenseView> = storage::fixed_expenses::list(state.db_service.pool(), auth.user_id)
        .await?
        .into_iter()
        .map(|expense| FixedExpenseView::for_month(expense, month))
        .collect();
    ok(views)
}

#[utoipa::path(
    post,
    path = "/api/fixed-expenses",
    request_body = CreateFixedExpenseRequest,
    responses(
        (status = 201, description = "Fixed expense created; data is `{id}`", body = ApiResponse),
        (status = 400, description = "Missing or invalid field", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_fixed_expense_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    request: Result<Json<CreateFixedExpenseRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = body(request)?;
    let description = rules::required_text("description", request.description.as_deref())?;
    let value = ensure_positive("value", required("value", request.value)?)?;
    let day = rules::validate_due_day(required("day", request.day)?)?;
    let category = rules::normalize_category(request.category.as_deref())?;

    let expense = storage::fixed_expenses::insert(
        state.db_service.pool(),
        auth.user_id,
        &description,
        value,
        day,
        &category,
    )
    .await?;
    created(expense.id)
}

#[utoipa::path(
    post,
    path = "/api/fixed-expenses/{id}/pay",
    params(("id" = i32, Path, description = "Fixed expense id")),
    request_body(content = MonthRequest, description = "Month to pay (default: current)"),
    responses(
        (status = 200, description = "Marked paid; data is `{paidMonths, transactionId}`", body = ApiResponse),
        (status = 404, description = "No such fixed expense", body = ApiResponse),
        (status = 409, description = "Already paid for that month", body = ApiResponse),
        (status = 422, description = "Body present but not a valid month request", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn pay_fixed_expense_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i32>,
    raw: Bytes,
) -> Result<Response, AppError> {
    let month = requested_month(&raw)?;
    let (expense, transaction) = state
        .db_service
        .pay_fixed_expense(auth.user_id, id, month, today())
        .await?;
    ok(json!({
        "month": month,
        "paidMonths": expense.paid_months,
        "transactionId": transaction.id,
    }))
}

#[utoipa::path(
    post,
    path = "/api/fixed-expenses/{id}/unpay",
    params(("id" = i32, Path, description = "Fixed expense id")),
    request_body(content = MonthRequest, description = "Month to unmark (default: current)"),
    responses(
        (status = 200, description = "Unmarked; data is `{paidMonths}`", body = ApiResponse),
        (status = 404, description = "No such fixed expense", body = ApiResponse),
        (status = 409, description = "Not paid for that month", body = ApiResponse),
        (status = 422, description = "Body present but not a valid month request", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn unpay_fixed_expense_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i32>,
    raw: Bytes,
) -> Result<Response, AppError> {
    let month = requested_month(&raw)?;
    let expense = state.db_service.unpay_fixed_expense(auth.user_id, id, month).await?;
    ok(json!({
        "month": month,
        "paidMonths": expense.paid_months,
    }))
}

#[utoipa::path(
    post,
    path = "/api/fixed-expenses/reset",
    request_body(content = MonthRequest, description = "Month to clear (default: current)"),
    responses(
        (status = 200, description = "Month cleared on every fixed expense; data is `{updated}`", body = ApiResponse),
        (status = 422, description = "Body present but not a valid month request", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn reset_fixed_expenses_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    raw: Bytes,
) -> Result<Response, AppError> {
    let month = requested_month(&raw)?;
    let updated = storage::fixed_expenses::clear_month(state.db_service.pool(), auth.user_id, month).await?;
    ok(json!({ "month": month, "updated": updated }))
}

#[utoipa::path(
    delete,
    path = "/api/fixed-expenses/{id}",
    params(("id" = i32, Path, description = "Fixed expense id")),
    responses(
        (status = 200, description = "Fixed expense deleted", body = ApiResponse),
        (status = 404, description = "No such fixed expense", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_fixed_expense_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, AppError> {
    if !storage::fixed_expenses::delete(state.db_service.pool(), auth.user_id, id).await? {
        return Err(AppError::not_found("Fixed expense"));
    }
    message("Fixed expense deleted")
}

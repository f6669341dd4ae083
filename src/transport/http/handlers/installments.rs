use crate::domain::model::InstallmentView;
use crate::domain::rules;
use crate::error::AppError;
use crate::storage;
use crate::transport::http::auth::AuthUser;
use crate::transport::http::handlers::common::{body, created, message, ok, required, today, ApiPath};
use crate::transport::http::types::{ApiResponse, AppState, CreateInstallmentRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/installments",
    responses(
        (status = 200, description = "Installment purchases, newest first, with `remaining`, `progress` and `completed`", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn list_installments_handler(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Response, AppError> {
    let views: Vec<InstallmentView> = storage::installments::list(state.db_service.pool(), auth.user_id)
        .await?
        .into_iter()
        .map(InstallmentView::from)
        .collect();
    ok(views)
}

#[utoipa::path(
    post,
    path = "/api/installments",
    request_body = CreateInstallmentRequest,
    responses(
        (status = 201, description = "Installment purchase created; data is `{id}`", body = ApiResponse),
        (status = 400, description = "Missing or invalid field", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_installment_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    request: Result<Json<CreateInstallmentRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = body(request)?;
    let description = rules::required_text("description", request.description.as_deref())?;
    let start_date = required("startDate", request.start_date)?;
    let category = rules::normalize_category(request.category.as_deref())?;
    let plan = rules::plan_installment(
        required("totalValue", request.total_value)?,
        required("totalInstallments", request.total_installments)?,
        request.installment_value,
        request.paid_installments,
    )?;

    let installment = storage::installments::insert(
        state.db_service.pool(),
        auth.user_id,
        &description,
        &category,
        &plan,
        start_date,
    )
    .await?;
    created(installment.id)
}

#[utoipa::path(
    post,
    path = "/api/installments/{id}/pay",
    params(("id" = i32, Path, description = "Installment purchase id")),
    responses(
        (status = 200, description = "Next installment paid; data is `{paidInstallments, transactionId}`", body = ApiResponse),
        (status = 400, description = "All installments already paid", body = ApiResponse),
        (status = 404, description = "No such installment purchase", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn pay_installment_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, AppError> {
    let (installment, transaction) = state.db_service.pay_installment(auth.user_id, id, today()).await?;
    ok(json!({
        "paidInstallments": installment.paid_installments,
        "completed": installment.is_completed(),
        "transactionId": transaction.id,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/installments/{id}",
    params(("id" = i32, Path, description = "Installment purchase id")),
    responses(
        (status = 200, description = "Installment purchase deleted", body = ApiResponse),
        (status = 404, description = "No such installment purchase", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_installment_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, AppError> {
    if !storage::installments::delete(state.db_service.pool(), auth.user_id, id).await? {
        return Err(AppError::not_found("Installment"));
    }
    message("Installment deleted")
}

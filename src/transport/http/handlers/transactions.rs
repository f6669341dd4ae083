use crate::domain::model::TransactionKind;
use crate::domain::rules;
use crate::domain::MonthKey;
use crate::error::AppError;
use crate::storage::{self, transactions::NewTransaction};
use crate::transport::http::auth::AuthUser;
use crate::transport::http::handlers::common::{body, created, message, ok, required, ApiPath, ApiQuery};
use crate::transport::http::types::{ApiResponse, AppState, CreateTransactionRequest, MonthQuery};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/transactions",
    params(MonthQuery),
    responses(
        (status = 200, description = "Transactions ordered by date, newest first", body = ApiResponse),
        (status = 400, description = "Invalid month", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn list_transactions_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Response, AppError> {
    let month = match query.month.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => Some(m.parse::<MonthKey>()?),
        None => None,
    };
    ok(storage::transactions::list(state.db_service.pool(), auth.user_id, month).await?)
}

#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created; data is `{id}`", body = ApiResponse),
        (status = 400, description = "Missing or invalid field", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_transaction_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    request: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = body(request)?;
    let kind: TransactionKind = required("type", request.kind)?.trim().parse()?;
    let description = rules::required_text("description", request.description.as_deref())?;
    let date = required("date", request.date)?;
    let category = rules::normalize_category(request.category.as_deref())?;
    let amounts = rules::split_transaction(kind, required("value", request.value)?, request.split_count)?;

    let transaction = storage::transactions::insert(
        state.db_service.pool(),
        &NewTransaction {
            user_id: auth.user_id,
            kind: kind.as_str(),
            category: &category,
            description: &description,
            value: amounts.value,
            date,
            split_count: amounts.split_count,
            original_value: amounts.original_value,
        },
    )
    .await?;

    created(transaction.id)
}

#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    params(("id" = i32, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction deleted", body = ApiResponse),
        (status = 404, description = "No such transaction for this user", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_transaction_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, AppError> {
    if !storage::transactions::delete(state.db_service.pool(), auth.user_id, id).await? {
        return Err(AppError::not_found("Transaction"));
    }
    message("Transaction deleted")
}

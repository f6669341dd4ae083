//! Read-only aggregates behind the dashboard: the current month at a glance, a
//! multi-month series and the all-time category split.

use crate::domain::report::{self, DEFAULT_REPORT_MONTHS};
use crate::error::AppError;
use crate::transport::http::auth::AuthUser;
use crate::transport::http::handlers::common::{month_or_current, ok, ApiQuery};
use crate::transport::http::types::{ApiResponse, AppState, MonthQuery, MonthlyReportQuery};
use axum::extract::State;
use axum::response::Response;

#[utoipa::path(
    get,
    path = "/api/reports/summary",
    params(MonthQuery),
    responses(
        (status = 200, description = "Totals, pending amounts, savings target and category split for the month", body = ApiResponse),
        (status = 400, description = "Invalid month", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn summary_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Response, AppError> {
    let month = month_or_current(query.month.as_deref())?;
    let ledger = state.db_service.load_ledger(auth.user_id).await?;
    ok(report::month_summary(&ledger, month))
}

#[utoipa::path(
    get,
    path = "/api/reports/monthly",
    params(MonthlyReportQuery),
    responses(
        (status = 200, description = "One row per month, oldest first, plus period totals", body = ApiResponse),
        (status = 400, description = "Invalid month or period length", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn monthly_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<MonthlyReportQuery>,
) -> Result<Response, AppError> {
    let until = month_or_current(query.until.as_deref())?;
    let months = query.months.unwrap_or(DEFAULT_REPORT_MONTHS);
    let ledger = state.db_service.load_ledger(auth.user_id).await?;
    ok(report::monthly_report(&ledger, until, months)?)
}

#[utoipa::path(
    get,
    path = "/api/reports/categories",
    responses(
        (status = 200, description = "All-time expense totals per category, largest first", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn categories_handler(State(state): State<AppState>, auth: AuthUser) -> Result<Response, AppError> {
    let ledger = state.db_service.load_ledger(auth.user_id).await?;
    ok(report::expenses_by_category(&ledger.transactions))
}

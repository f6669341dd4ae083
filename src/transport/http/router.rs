use crate::app::database_service::AdminSnapshot;
use crate::domain::model::{
    AdminUser, FixedExpense, FixedExpenseView, Installment, InstallmentView, MovementKind, PublicUser,
    SavingsBox, SavingsBoxView, Transaction, TransactionKind,
};
use crate::domain::report::{CategoryTotal, MonthRow, MonthSummary, MonthlyReport, ReportTotals};
use crate::transport::http::handlers::{
    admin, auth, fixed_expenses, health, installments, reports, savings, settings, transactions,
};
use crate::transport::http::types::{
    AdminLoginRequest, ApiResponse, AppState, CreateFixedExpenseRequest, CreateInstallmentRequest,
    CreateSavingsRequest, CreateTransactionRequest, LoginRequest, MonthRequest, RegisterRequest,
    SavingsActionRequest,
};
use axum::http::{header, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        auth::register_handler,
        auth::login_handler,
        auth::list_users_handler,
        auth::me_handler,
        settings::get_settings_handler,
        settings::update_settings_handler,
        transactions::list_transactions_handler,
        transactions::create_transaction_handler,
        transactions::delete_transaction_handler,
        fixed_expenses::list_fixed_expenses_handler,
        fixed_expenses::create_fixed_expense_handler,
        fixed_expenses::pay_fixed_expense_handler,
        fixed_expenses::unpay_fixed_expense_handler,
        fixed_expenses::reset_fixed_expenses_handler,
        fixed_expenses::delete_fixed_expense_handler,
        installments::list_installments_handler,
        installments::create_installment_handler,
        installments::pay_installment_handler,
        installments::delete_installment_handler,
        savings::list_savings_handler,
        savings::create_savings_handler,
        savings::savings_action_handler,
        savings::delete_savings_handler,
        reports::summary_handler,
        reports::monthly_handler,
        reports::categories_handler,
        admin::admin_login_handler,
        admin::admin_data_handler
    ),
    components(schemas(
        ApiResponse,
        RegisterRequest,
        LoginRequest,
        AdminLoginRequest,
        CreateTransactionRequest,
        CreateFixedExpenseRequest,
        MonthRequest,
        CreateInstallmentRequest,
        CreateSavingsRequest,
        SavingsActionRequest,
        auth::AuthPayload,
        PublicUser,
        AdminUser,
        Transaction,
        TransactionKind,
        FixedExpense,
        FixedExpenseView,
        Installment,
        InstallmentView,
        SavingsBox,
        SavingsBoxView,
        MovementKind,
        CategoryTotal,
        MonthSummary,
        MonthRow,
        ReportTotals,
        MonthlyReport,
        AdminSnapshot
    )),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Any origin may call the API; credentials travel in the `Authorization` header.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/users", get(auth::list_users_handler))
        .route("/api/auth/me", get(auth::me_handler))
        .route(
            "/api/settings",
            get(settings::get_settings_handler).put(settings::update_settings_handler),
        )
        .route(
            "/api/transactions",
            get(transactions::list_transactions_handler).post(transactions::create_transaction_handler),
        )
        .route("/api/transactions/:id", delete(transactions::delete_transaction_handler))
        .route(
            "/api/fixed-expenses",
            get(fixed_expenses::list_fixed_expenses_handler).post(fixed_expenses::create_fixed_expense_handler),
        )
        .route("/api/fixed-expenses/reset", post(fixed_expenses::reset_fixed_expenses_handler))
        .route("/api/fixed-expenses/:id", delete(fixed_expenses::delete_fixed_expense_handler))
        .route("/api/fixed-expenses/:id/pay", post(fixed_expenses::pay_fixed_expense_handler))
        .route("/api/fixed-expenses/:id/unpay", post(fixed_expenses::unpay_fixed_expense_handler))
        .route(
            "/api/installments",
            get(installments::list_installments_handler).post(installments::create_installment_handler),
        )
        .route("/api/installments/:id", delete(installments::delete_installment_handler))
        .route("/api/installments/:id/pay", post(installments::pay_installment_handler))
        .route(
            "/api/savings",
            get(savings::list_savings_handler).post(savings::create_savings_handler),
        )
        .route("/api/savings/:id", delete(savings::delete_savings_handler))
        .route("/api/savings/:id/action", post(savings::savings_action_handler))
        .route("/api/reports/summary", get(reports::summary_handler))
        .route("/api/reports/monthly", get(reports::monthly_handler))
        .route("/api/reports/categories", get(reports::categories_handler))
        .route("/api/admin/login", post(admin::admin_login_handler))
        .route("/api/admin/data", get(admin::admin_data_handler))
        .with_state(app_state)
}

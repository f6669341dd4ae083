use crate::app::database_service::DatabaseService;
use crate::crypto::token::TokenService;
use crate::infra::config::Config;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub db_service: Arc<DatabaseService>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db_service: DatabaseService, config: Config) -> Self {
        Self {
            db_service: Arc::new(db_service),
            tokens: Arc::new(TokenService::from_config(&config)),
            config: Arc::new(config),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// --- Auth ---

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct AdminLoginRequest {
    pub password: Option<String>,
}

// --- Transactions ---

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub value: Option<Decimal>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "2025-01-31")]
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    /// Number of people sharing an expense (default 1).
    pub split_count: Option<i32>,
}

// --- Fixed expenses ---

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFixedExpenseRequest {
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub value: Option<Decimal>,
    /// Due day of the month, 1 to 31.
    pub day: Option<i32>,
    pub category: Option<String>,
}

/// Optional target month for pay/unpay/reset. Defaults to the current month.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct MonthRequest {
    #[schema(example = "2025-01")]
    pub month: Option<String>,
}

// --- Installments ---

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstallmentRequest {
    pub description: Option<String>,
    pub category: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub total_value: Option<Decimal>,
    /// Pro-rated from `totalValue` when omitted.
    #[schema(value_type = Option<f64>)]
    pub installment_value: Option<Decimal>,
    pub total_installments: Option<i32>,
    pub paid_installments: Option<i32>,
    #[schema(value_type = Option<String>, example = "2025-01-10")]
    pub start_date: Option<NaiveDate>,
}

// --- Savings ---

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSavingsRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub goal: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub current_value: Option<Decimal>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SavingsActionRequest {
    /// `deposit` or `withdraw`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub value: Option<Decimal>,
}

// --- Query strings ---

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    /// `YYYY-MM`; defaults to the current month.
    pub month: Option<String>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthlyReportQuery {
    /// Number of months in the series (1 to 120, default 12).
    pub months: Option<u32>,
    /// Last month of the series, `YYYY-MM`; defaults to the current month.
    pub until: Option<String>,
}

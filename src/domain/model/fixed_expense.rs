use crate::domain::MonthKey;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A recurring monthly expense. `paid_months` lists the `YYYY-MM` keys already paid.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FixedExpense {
    pub id: i32,
    pub user_id: i32,
    pub description: String,
    pub value: Decimal,
    /// Due day of the month (1..=31).
    pub day: i32,
    pub category: String,
    pub paid_months: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl FixedExpense {
    pub fn is_paid_for(&self, month: MonthKey) -> bool {
        crate::domain::rules::is_month_paid(&self.paid_months, month)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FixedExpenseView {
    #[serde(flatten)]
    pub expense: FixedExpense,
    /// Whether the expense is paid for the month the listing was made for.
    pub paid: bool,
}

impl FixedExpenseView {
    pub fn for_month(expense: FixedExpense, month: MonthKey) -> Self {
        let paid = expense.is_paid_for(month);
        Self { expense, paid }
    }
}

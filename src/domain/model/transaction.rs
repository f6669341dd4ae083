use crate::domain::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(DomainError::InvalidKind {
                field: "type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Transaction {
    pub id: i32,
    pub user_id: i32,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: String,
    /// The amount that hit this user's balance (their share, for split expenses).
    pub value: Decimal,
    pub date: NaiveDate,
    /// Number of people sharing the expense; 1 when not split.
    pub split_count: i32,
    /// Full amount before splitting, when `split_count > 1`.
    pub original_value: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income.as_str()
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense.as_str()
    }
}

use crate::domain::money::percent_of;
use crate::domain::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;

pub const DEFAULT_ICON: &str = "🐷";
pub const DEFAULT_COLOR: &str = "#6366f1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Deposit,
    Withdraw,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Deposit => "deposit",
            MovementKind::Withdraw => "withdraw",
        }
    }
}

impl FromStr for MovementKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(MovementKind::Deposit),
            "withdraw" => Ok(MovementKind::Withdraw),
            other => Err(DomainError::InvalidKind {
                field: "type",
                value: other.to_string(),
            }),
        }
    }
}

/// A savings goal ("box") with its current balance.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SavingsBox {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub goal: Decimal,
    pub current_value: Decimal,
    pub icon: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SavingsBoxView {
    #[serde(flatten)]
    pub savings_box: SavingsBox,
    /// Balance as a percentage of the goal; null when there is no goal.
    pub progress: Option<Decimal>,
}

impl From<SavingsBox> for SavingsBoxView {
    fn from(savings_box: SavingsBox) -> Self {
        Self {
            progress: percent_of(savings_box.current_value, savings_box.goal),
            savings_box,
        }
    }
}

/// One deposit into or withdrawal from a savings box.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SavingsMovement {
    pub id: i32,
    pub savings_box_id: i32,
    pub user_id: i32,
    /// `deposit` or `withdraw`.
    pub kind: String,
    pub value: Decimal,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl SavingsMovement {
    /// The movement's effect on the box balance.
    pub fn signed_value(&self) -> Decimal {
        if self.kind == MovementKind::Withdraw.as_str() {
            -self.value
        } else {
            self.value
        }
    }
}

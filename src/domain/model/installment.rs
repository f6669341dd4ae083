use crate::domain::money::percent_of;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A purchase paid in equal monthly installments.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Installment {
    pub id: i32,
    pub user_id: i32,
    pub description: String,
    pub category: String,
    pub total_value: Decimal,
    pub installment_value: Decimal,
    pub total_installments: i32,
    pub paid_installments: i32,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Installment {
    pub fn remaining(&self) -> i32 {
        (self.total_installments - self.paid_installments).max(0)
    }

    pub fn is_completed(&self) -> bool {
        self.remaining() == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InstallmentView {
    #[serde(flatten)]
    pub installment: Installment,
    pub remaining: i32,
    /// Paid share in percent.
    pub progress: Decimal,
    pub completed: bool,
}

impl From<Installment> for InstallmentView {
    fn from(installment: Installment) -> Self {
        let progress = percent_of(
            Decimal::from(installment.paid_installments),
            Decimal::from(installment.total_installments),
        )
        .unwrap_or(Decimal::ZERO);
        Self {
            remaining: installment.remaining(),
            completed: installment.is_completed(),
            progress,
            installment,
        }
    }
}

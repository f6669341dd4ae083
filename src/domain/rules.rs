//! Business rules applied before anything is written.

use super::model::{Installment, MovementKind, TransactionKind};
use super::money::{ensure_non_negative, ensure_positive, prorate_installment, split_value};
use super::{DomainError, MonthKey};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value as JsonValue};

pub const MIN_PASSWORD_LEN: usize = 4;
pub const DEFAULT_CATEGORY: &str = "other";
pub const MAX_CATEGORY_LEN: usize = 50;
pub const DEFAULT_SAVINGS_PERCENTAGE: i64 = 20;
pub const SAVINGS_PERCENTAGE_KEY: &str = "savingsPercentage";

// --- Accounts ---

pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

/// Trims `value` and rejects it when missing or blank.
pub fn required_text(field: &'static str, value: Option<&str>) -> Result<String, DomainError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(DomainError::Required(field)),
    }
}

pub fn normalize_category(raw: Option<&str>) -> Result<String, DomainError> {
    let category = raw.map(str::trim).filter(|c| !c.is_empty()).unwrap_or(DEFAULT_CATEGORY);
    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(DomainError::TooLarge("category"));
    }
    Ok(category.to_string())
}

// --- Transactions ---

/// Stored amounts of a new transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionAmounts {
    pub value: Decimal,
    pub split_count: i32,
    pub original_value: Option<Decimal>,
}

/// Splits an expense between `split_count` co-payers. The user's share becomes the
/// transaction value and the full amount is kept alongside. Income is never split.
pub fn split_transaction(
    kind: TransactionKind,
    value: Decimal,
    split_count: Option<i32>,
) -> Result<TransactionAmounts, DomainError> {
    let value = ensure_positive("value", value)?;
    let split_count = split_count.unwrap_or(1);
    if split_count < 1 {
        return Err(DomainError::InvalidSplit(split_count));
    }

    if kind == TransactionKind::Expense && split_count > 1 {
        Ok(TransactionAmounts {
            value: split_value(value, split_count)?,
            split_count,
            original_value: Some(value),
        })
    } else {
        Ok(TransactionAmounts {
            value,
            split_count: 1,
            original_value: None,
        })
    }
}

// --- Fixed expenses ---

pub fn validate_due_day(day: i32) -> Result<i32, DomainError> {
    if !(1..=31).contains(&day) {
        return Err(DomainError::InvalidDueDay(day));
    }
    Ok(day)
}

pub fn is_month_paid(paid_months: &[String], month: MonthKey) -> bool {
    paid_months
        .iter()
        .any(|m| m.parse::<MonthKey>().map(|k| k == month).unwrap_or(false))
}

/// Adds `month` to the paid list. Returns `false` when it was already there.
pub fn mark_month_paid(paid_months: &mut Vec<String>, month: MonthKey) -> bool {
    if is_month_paid(paid_months, month) {
        return false;
    }
    paid_months.push(month.to_string());
    paid_months.sort();
    true
}

/// Removes `month` from the paid list. Returns `false` when it was not there.
pub fn mark_month_unpaid(paid_months: &mut Vec<String>, month: MonthKey) -> bool {
    let before = paid_months.len();
    paid_months.retain(|m| m.parse::<MonthKey>().map(|k| k != month).unwrap_or(true));
    paid_months.len() != before
}

/// Date of the expense transaction recorded when a fixed expense is paid: today for the
/// current month, otherwise the due day within the paid month.
pub fn fixed_payment_date(month: MonthKey, due_day: i32, today: NaiveDate) -> NaiveDate {
    if month.contains(today) {
        today
    } else {
        month.day_clamped(due_day.max(1) as u32)
    }
}

pub fn fixed_payment_description(description: &str) -> String {
    format!("{} (fixed expense)", description)
}

// --- Installments ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentPlan {
    pub total_value: Decimal,
    pub installment_value: Decimal,
    pub total_installments: i32,
    pub paid_installments: i32,
}

/// Validates a new installment purchase, pro-rating the monthly value when not given.
pub fn plan_installment(
    total_value: Decimal,
    total_installments: i32,
    installment_value: Option<Decimal>,
    paid_installments: Option<i32>,
) -> Result<InstallmentPlan, DomainError> {
    let total_value = ensure_positive("totalValue", total_value)?;
    if total_installments < 1 {
        return Err(DomainError::InvalidInstallmentCount(total_installments));
    }
    let paid_installments = paid_installments.unwrap_or(0);
    if !(0..=total_installments).contains(&paid_installments) {
        return Err(DomainError::PaidOutOfRange {
            paid: paid_installments,
            total: total_installments,
        });
    }
    let installment_value = match installment_value {
        Some(v) => ensure_positive("installmentValue", v)?,
        None => prorate_installment(total_value, total_installments)?,
    };

    Ok(InstallmentPlan {
        total_value,
        installment_value,
        total_installments,
        paid_installments,
    })
}

/// Number of the installment paid next (1-based).
pub fn next_installment(installment: &Installment) -> Result<i32, DomainError> {
    if installment.paid_installments >= installment.total_installments {
        return Err(DomainError::AllInstallmentsPaid);
    }
    Ok(installment.paid_installments + 1)
}

pub fn installment_payment_description(description: &str, number: i32, total: i32) -> String {
    format!("{} (installment {}/{})", description, number, total)
}

// --- Savings ---

/// New balance after a deposit or withdrawal. Balances never go below zero.
pub fn apply_movement(current: Decimal, kind: MovementKind, value: Decimal) -> Result<Decimal, DomainError> {
    let value = ensure_positive("value", value)?;
    let next = match kind {
        MovementKind::Deposit => current + value,
        MovementKind::Withdraw => {
            if value > current {
                return Err(DomainError::InsufficientBalance);
            }
            current - value
        }
    };
    ensure_non_negative("currentValue", next)
}

// --- Settings ---

pub fn default_settings() -> JsonValue {
    json!({ SAVINGS_PERCENTAGE_KEY: DEFAULT_SAVINGS_PERCENTAGE })
}

/// Shallow-merges `patch` over `current`. Both must be JSON objects.
pub fn merge_settings(current: JsonValue, patch: JsonValue) -> Result<JsonValue, DomainError> {
    let JsonValue::Object(patch) = patch else {
        return Err(DomainError::InvalidSettings("body must be a JSON object".to_string()));
    };
    if let Some(pct) = patch.get(SAVINGS_PERCENTAGE_KEY) {
        match pct.as_f64() {
            Some(p) if (0.0..=100.0).contains(&p) => {}
            _ => {
                return Err(DomainError::InvalidSettings(format!(
                    "{} must be a number between 0 and 100",
                    SAVINGS_PERCENTAGE_KEY
                )))
            }
        }
    }

    let mut merged = match current {
        JsonValue::Object(map) => map,
        _ => Map::new(),
    };
    merged.extend(patch);
    Ok(JsonValue::Object(merged))
}

/// The share of income the user wants to save, in percent.
pub fn savings_percentage(settings: &JsonValue) -> Decimal {
    settings
        .get(SAVINGS_PERCENTAGE_KEY)
        .and_then(|v| match v {
            JsonValue::Number(n) => n
                .as_i64()
                .map(Decimal::from)
                .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
            JsonValue::String(s) => s.trim().parse::<Decimal>().ok(),
            _ => None,
        })
        .unwrap_or(Decimal::from(DEFAULT_SAVINGS_PERCENTAGE))
}

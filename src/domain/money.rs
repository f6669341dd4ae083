//! Decimal arithmetic on currency amounts. Amounts are kept to cents.

use super::DomainError;
use rust_decimal::{Decimal, RoundingStrategy};

pub const CENT_PLACES: u32 = 2;

/// Largest amount a `NUMERIC(12,2)` column holds (9_999_999_999.99).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// One co-payer's share of an expense shared by `payers` people.
pub fn split_value(total: Decimal, payers: i32) -> Result<Decimal, DomainError> {
    if payers < 1 {
        return Err(DomainError::InvalidSplit(payers));
    }
    Ok(round_cents(total / Decimal::from(payers)))
}

/// The monthly amount of a purchase of `total` spread over `count` installments.
pub fn prorate_installment(total: Decimal, count: i32) -> Result<Decimal, DomainError> {
    if count < 1 {
        return Err(DomainError::InvalidInstallmentCount(count));
    }
    Ok(round_cents(total / Decimal::from(count)))
}

/// `part / whole` as a percentage rounded to cents. `None` when `whole` is zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    Some(round_cents(part * Decimal::ONE_HUNDRED / whole))
}

/// Validates a strictly positive amount and rounds it to cents.
pub fn ensure_positive(field: &'static str, value: Decimal) -> Result<Decimal, DomainError> {
    if value <= Decimal::ZERO {
        return Err(DomainError::NotPositive(field));
    }
    ensure_in_range(field, value)
}

/// Validates a zero-or-positive amount and rounds it to cents.
pub fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<Decimal, DomainError> {
    if value < Decimal::ZERO {
        return Err(DomainError::Negative(field));
    }
    ensure_in_range(field, value)
}

fn ensure_in_range(field: &'static str, value: Decimal) -> Result<Decimal, DomainError> {
    let value = round_cents(value);
    if value > MAX_AMOUNT {
        return Err(DomainError::TooLarge(field));
    }
    Ok(value)
}

//! Dashboard and report aggregates computed over a user's rows.

use super::model::{FixedExpense, Installment, SavingsBox, SavingsMovement, Transaction};
use super::money::round_cents;
use super::{DomainError, MonthKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use utoipa::ToSchema;

pub const RECENT_LIMIT: usize = 5;
pub const MAX_REPORT_MONTHS: u32 = 120;
pub const DEFAULT_REPORT_MONTHS: u32 = 12;

/// Everything a report needs about one user.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    pub fixed_expenses: Vec<FixedExpense>,
    pub installments: Vec<Installment>,
    pub savings: Vec<SavingsBox>,
    pub movements: Vec<SavingsMovement>,
    pub savings_percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthSummary {
    #[schema(value_type = String, example = "2025-01")]
    pub month: MonthKey,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    /// Fixed expenses not yet paid this month.
    pub pending_fixed: Decimal,
    /// One installment of every purchase that still has installments left.
    pub pending_installments: Decimal,
    pub pending_total: Decimal,
    pub total_savings: Decimal,
    pub savings_percentage: Decimal,
    /// `income * savings_percentage / 100`.
    pub savings_target: Decimal,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub recent: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthRow {
    #[schema(value_type = String, example = "2025-01")]
    pub month: MonthKey,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    /// Savings held across all boxes at the end of the month.
    pub savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportTotals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub total_balance: Decimal,
    pub average_income: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlyReport {
    pub months: Vec<MonthRow>,
    pub totals: ReportTotals,
}

fn sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, |acc, v| acc + v)
}

/// Income and expense totals over the transactions that fall in `month`.
fn month_totals<'a, I>(transactions: I, month: MonthKey) -> (Decimal, Decimal)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in transactions.into_iter().filter(|t| month.contains(t.date)) {
        if t.is_income() {
            income += t.value;
        } else if t.is_expense() {
            expense += t.value;
        }
    }
    (income, expense)
}

/// Expense totals per category, largest first (ties by name).
pub fn expenses_by_category<'a, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for t in transactions.into_iter().filter(|t| t.is_expense()) {
        *totals.entry(t.category.as_str()).or_insert(Decimal::ZERO) += t.value;
    }

    let mut out: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    out
}

pub fn month_summary(ledger: &Ledger, month: MonthKey) -> MonthSummary {
    let in_month: Vec<&Transaction> = ledger
        .transactions
        .iter()
        .filter(|t| month.contains(t.date))
        .collect();
    let (income, expense) = month_totals(in_month.iter().copied(), month);

    let pending_fixed = sum(ledger
        .fixed_expenses
        .iter()
        .filter(|f| !f.is_paid_for(month))
        .map(|f| f.value));
    let pending_installments = sum(ledger
        .installments
        .iter()
        .filter(|i| !i.is_completed())
        .map(|i| i.installment_value));
    let total_savings = sum(ledger.savings.iter().map(|s| s.current_value));

    let mut recent: Vec<Transaction> = in_month.iter().map(|t| (*t).clone()).collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    recent.truncate(RECENT_LIMIT);

    MonthSummary {
        month,
        income,
        expense,
        balance: income - expense,
        pending_fixed,
        pending_installments,
        pending_total: pending_fixed + pending_installments,
        total_savings,
        savings_percentage: ledger.savings_percentage,
        savings_target: round_cents(income * ledger.savings_percentage / Decimal::ONE_HUNDRED),
        expenses_by_category: expenses_by_category(in_month.iter().copied()),
        recent,
    }
}

/// Savings held at the end of `month`: per box, the running net of its movements up to
/// that date floored at zero, summed over boxes.
fn savings_at(movements_by_box: &BTreeMap<i32, Vec<&SavingsMovement>>, month: MonthKey) -> Decimal {
    let end = month.last_day();
    sum(movements_by_box.values().map(|movements| {
        let net = sum(movements.iter().filter(|m| m.date <= end).map(|m| m.signed_value()));
        net.max(Decimal::ZERO)
    }))
}

/// `months` consecutive months ending with `until`, oldest first.
pub fn monthly_report(ledger: &Ledger, until: MonthKey, months: u32) -> Result<MonthlyReport, DomainError> {
    if !(1..=MAX_REPORT_MONTHS).contains(&months) {
        return Err(DomainError::InvalidPeriod {
            got: months,
            max: MAX_REPORT_MONTHS,
        });
    }

    let mut movements_by_box: BTreeMap<i32, Vec<&SavingsMovement>> = BTreeMap::new();
    for m in &ledger.movements {
        movements_by_box.entry(m.savings_box_id).or_default().push(m);
    }

    let mut rows = Vec::with_capacity(months as usize);
    for back in (0..months as i32).rev() {
        let Some(month) = until.shift(-back) else {
            continue;
        };
        let (income, expense) = month_totals(&ledger.transactions, month);
        rows.push(MonthRow {
            month,
            income,
            expense,
            balance: income - expense,
            savings: savings_at(&movements_by_box, month),
        });
    }

    let total_income = sum(rows.iter().map(|r| r.income));
    let total_expense = sum(rows.iter().map(|r| r.expense));
    // Months outside the calendar range are skipped, so average over what was reported.
    let average_income = match rows.len() {
        0 => Decimal::ZERO,
        n => round_cents(total_income / Decimal::from(n)),
    };
    let totals = ReportTotals {
        total_income,
        total_expense,
        total_balance: total_income - total_expense,
        average_income,
    };

    Ok(MonthlyReport { months: rows, totals })
}

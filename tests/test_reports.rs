//! Dashboard aggregates over an in-memory ledger.

use chrono::{NaiveDate, Utc};
use finance_tracker::domain::model::{FixedExpense, Installment, SavingsBox, SavingsMovement, Transaction};
use finance_tracker::domain::report::{self, Ledger, MAX_REPORT_MONTHS, RECENT_LIMIT};
use finance_tracker::{DomainError, MonthKey};
use rust_decimal::Decimal;
use std::str::FromStr;

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn month(s: &str) -> MonthKey {
    s.parse().unwrap()
}

fn tx(id: i32, kind: &str, category: &str, value: &str, on: &str) -> Transaction {
    Transaction {
        id,
        user_id: 1,
        kind: kind.to_string(),
        category: category.to_string(),
        description: format!("tx {id}"),
        value: d(value),
        date: date(on),
        split_count: 1,
        original_value: None,
        created_at: Utc::now(),
    }
}

fn fixed(id: i32, value: &str, paid_months: &[&str]) -> FixedExpense {
    FixedExpense {
        id,
        user_id: 1,
        description: format!("fixed {id}"),
        value: d(value),
        day: 10,
        category: "housing".to_string(),
        paid_months: paid_months.iter().map(|m| m.to_string()).collect(),
        created_at: Utc::now(),
    }
}

fn installment(id: i32, value: &str, paid: i32, total: i32) -> Installment {
    Installment {
        id,
        user_id: 1,
        description: format!("installment {id}"),
        category: "tech".to_string(),
        total_value: d(value) * Decimal::from(total),
        installment_value: d(value),
        total_installments: total,
        paid_installments: paid,
        start_date: date("2025-01-01"),
        created_at: Utc::now(),
    }
}

fn savings_box(id: i32, current: &str) -> SavingsBox {
    SavingsBox {
        id,
        user_id: 1,
        name: format!("box {id}"),
        goal: d("1000"),
        current_value: d(current),
        icon: "🐷".to_string(),
        color: "#6366f1".to_string(),
        created_at: Utc::now(),
    }
}

fn movement(id: i32, box_id: i32, kind: &str, value: &str, on: &str) -> SavingsMovement {
    SavingsMovement {
        id,
        savings_box_id: box_id,
        user_id: 1,
        kind: kind.to_string(),
        value: d(value),
        date: date(on),
        created_at: Utc::now(),
    }
}

fn sample_ledger() -> Ledger {
    Ledger {
        transactions: vec![
            tx(1, "income", "salary", "5000", "2025-03-01"),
            tx(2, "expense", "food", "300", "2025-03-05"),
            tx(3, "expense", "transport", "120.50", "2025-03-07"),
            tx(4, "expense", "food", "80", "2025-03-20"),
            tx(5, "income", "salary", "4800", "2025-02-01"),
            tx(6, "expense", "housing", "1500", "2025-02-10"),
        ],
        fixed_expenses: vec![fixed(1, "1500", &["2025-02"]), fixed(2, "99.90", &["2025-03"])],
        installments: vec![installment(1, "100", 3, 12), installment(2, "250", 4, 4)],
        savings: vec![savings_box(1, "700"), savings_box(2, "50")],
        movements: vec![
            movement(1, 1, "deposit", "500", "2025-01-15"),
            movement(2, 1, "deposit", "300", "2025-02-15"),
            movement(3, 1, "withdraw", "100", "2025-03-02"),
            movement(4, 2, "deposit", "50", "2025-03-10"),
        ],
        savings_percentage: d("20"),
    }
}

#[test]
fn summary_totals_for_month() {
    let summary = report::month_summary(&sample_ledger(), month("2025-03"));

    assert_eq!(summary.month, month("2025-03"));
    assert_eq!(summary.income, d("5000"));
    assert_eq!(summary.expense, d("500.50"));
    assert_eq!(summary.balance, d("4499.50"));
    // Rent unpaid for March; internet already paid.
    assert_eq!(summary.pending_fixed, d("1500"));
    // Only the unfinished purchase counts.
    assert_eq!(summary.pending_installments, d("100"));
    assert_eq!(summary.pending_total, d("1600"));
    assert_eq!(summary.total_savings, d("750"));
    assert_eq!(summary.savings_target, d("1000"));
}

#[test]
fn summary_categories_and_recent() {
    let summary = report::month_summary(&sample_ledger(), month("2025-03"));

    let categories: Vec<(&str, Decimal)> = summary
        .expenses_by_category
        .iter()
        .map(|c| (c.category.as_str(), c.total))
        .collect();
    assert_eq!(categories, vec![("food", d("380")), ("transport", d("120.50"))]);

    let recent: Vec<i32> = summary.recent.iter().map(|t| t.id).collect();
    assert_eq!(recent, vec![4, 3, 2, 1]);
}

#[test]
fn recent_is_capped() {
    let mut ledger = Ledger::default();
    for i in 0..8 {
        ledger
            .transactions
            .push(tx(i + 1, "expense", "food", "1", &format!("2025-05-{:02}", i + 1)));
    }
    let summary = report::month_summary(&ledger, month("2025-05"));
    assert_eq!(summary.recent.len(), RECENT_LIMIT);
    assert_eq!(summary.recent[0].id, 8);
}

#[test]
fn empty_month_is_all_zero() {
    let summary = report::month_summary(&Ledger::default(), month("2030-01"));
    assert_eq!(summary.income, Decimal::ZERO);
    assert_eq!(summary.expense, Decimal::ZERO);
    assert_eq!(summary.pending_total, Decimal::ZERO);
    assert!(summary.expenses_by_category.is_empty());
    assert!(summary.recent.is_empty());
}

#[test]
fn category_ties_break_by_name() {
    let txs = vec![
        tx(1, "expense", "zoo", "10", "2025-01-01"),
        tx(2, "expense", "art", "10", "2025-01-02"),
        tx(3, "income", "salary", "999", "2025-01-03"),
    ];
    let totals = report::expenses_by_category(&txs);
    let names: Vec<&str> = totals.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["art", "zoo"]);
}

#[test]
fn monthly_series_oldest_first_with_savings_history() {
    let report = report::monthly_report(&sample_ledger(), month("2025-03"), 3).unwrap();

    let months: Vec<String> = report.months.iter().map(|r| r.month.to_string()).collect();
    assert_eq!(months, vec!["2025-01", "2025-02", "2025-03"]);

    let jan = &report.months[0];
    assert_eq!(jan.income, Decimal::ZERO);
    assert_eq!(jan.savings, d("500"));

    let feb = &report.months[1];
    assert_eq!(feb.income, d("4800"));
    assert_eq!(feb.expense, d("1500"));
    assert_eq!(feb.balance, d("3300"));
    assert_eq!(feb.savings, d("800"));

    let mar = &report.months[2];
    assert_eq!(mar.balance, d("4499.50"));
    assert_eq!(mar.savings, d("750"));

    assert_eq!(report.totals.total_income, d("9800"));
    assert_eq!(report.totals.total_expense, d("2000.50"));
    assert_eq!(report.totals.total_balance, d("7799.50"));
    assert_eq!(report.totals.average_income, d("3266.67"));
}

#[test]
fn monthly_savings_floor_at_zero_per_box() {
    let mut ledger = Ledger::default();
    ledger.movements = vec![
        movement(1, 1, "withdraw", "40", "2025-01-05"),
        movement(2, 2, "deposit", "10", "2025-01-06"),
    ];
    let report = report::monthly_report(&ledger, month("2025-01"), 1).unwrap();
    assert_eq!(report.months[0].savings, d("10"));
}

#[test]
fn monthly_average_covers_only_reported_months() {
    let ledger = Ledger {
        transactions: vec![tx(1, "income", "salary", "300", "0001-02-10")],
        ..Ledger::default()
    };
    let report = report::monthly_report(&ledger, month("0001-03"), 12).unwrap();

    let months: Vec<String> = report.months.iter().map(|r| r.month.to_string()).collect();
    assert_eq!(months, vec!["0001-01", "0001-02", "0001-03"]);
    assert_eq!(report.totals.total_income, d("300"));
    assert_eq!(report.totals.average_income, d("100"));
}

#[test]
fn monthly_period_bounds() {
    let ledger = Ledger::default();
    assert!(matches!(
        report::monthly_report(&ledger, month("2025-01"), 0),
        Err(DomainError::InvalidPeriod { got: 0, .. })
    ));
    assert!(matches!(
        report::monthly_report(&ledger, month("2025-01"), MAX_REPORT_MONTHS + 1),
        Err(DomainError::InvalidPeriod { .. })
    ));
    let full = report::monthly_report(&ledger, month("2025-01"), MAX_REPORT_MONTHS).unwrap();
    assert_eq!(full.months.len(), MAX_REPORT_MONTHS as usize);
    assert_eq!(full.months[0].month, month("2015-02"));
}

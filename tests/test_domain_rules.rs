//! Month keys, money arithmetic and the write-side business rules. No database needed.

use chrono::{NaiveDate, Utc};
use finance_tracker::domain::model::{Installment, MovementKind, TransactionKind};
use finance_tracker::domain::money::{
    ensure_non_negative, ensure_positive, percent_of, prorate_installment, round_cents, split_value, MAX_AMOUNT,
};
use finance_tracker::domain::rules::{self, InstallmentPlan};
use finance_tracker::{DomainError, MonthKey};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn month(s: &str) -> MonthKey {
    s.parse().unwrap()
}

fn installment(paid: i32, total: i32) -> Installment {
    Installment {
        id: 1,
        user_id: 1,
        description: "Laptop".to_string(),
        category: "tech".to_string(),
        total_value: d("1200.00"),
        installment_value: d("100.00"),
        total_installments: total,
        paid_installments: paid,
        start_date: date(2025, 1, 10),
        created_at: Utc::now(),
    }
}

// --- Month keys ---

#[test]
fn month_key_parses_and_displays_canonical_form() {
    let key = month("2025-03");
    assert_eq!(key.year(), 2025);
    assert_eq!(key.month(), 3);
    assert_eq!(key.to_string(), "2025-03");
    assert_eq!(month(" 2025-03 "), key);
}

#[test]
fn month_key_rejects_malformed_input() {
    for raw in ["2025-3", "25-03", "2025-13", "2025-00", "2025/03", "abcd-ef", "", "2025-03-01"] {
        assert!(
            matches!(raw.parse::<MonthKey>(), Err(DomainError::InvalidMonth(_))),
            "{raw:?} should be rejected"
        );
    }
}

#[test]
fn month_key_bounds_and_clamping() {
    let feb_leap = month("2024-02");
    assert_eq!(feb_leap.last_day(), date(2024, 2, 29));
    assert_eq!(feb_leap.day_clamped(31), date(2024, 2, 29));
    assert_eq!(month("2025-02").day_clamped(31), date(2025, 2, 28));
    assert_eq!(month("2025-04").day_clamped(31), date(2025, 4, 30));
    assert_eq!(month("2025-01").day_clamped(0), date(2025, 1, 1));

    assert!(month("2025-01").contains(date(2025, 1, 31)));
    assert!(!month("2025-01").contains(date(2025, 2, 1)));
}

#[test]
fn month_key_shift_crosses_years() {
    assert_eq!(month("2025-01").shift(-1), Some(month("2024-12")));
    assert_eq!(month("2024-11").shift(3), Some(month("2025-02")));
    assert_eq!(month("2025-06").shift(0), Some(month("2025-06")));
    assert_eq!(month("0001-02").shift(-2), None);
    assert_eq!(month("9999-11").shift(2), None);
}

#[test]
fn month_key_serializes_as_string() {
    let key = month("2025-09");
    assert_eq!(serde_json::to_value(key).unwrap(), json!("2025-09"));
    let back: MonthKey = serde_json::from_value(json!("2025-09")).unwrap();
    assert_eq!(back, key);
    assert!(serde_json::from_value::<MonthKey>(json!("09-2025")).is_err());
}

// --- Money ---

#[test]
fn rounding_is_half_away_from_zero() {
    assert_eq!(round_cents(d("0.025")), d("0.03"));
    assert_eq!(round_cents(d("-0.025")), d("-0.03"));
    assert_eq!(round_cents(d("10.004")), d("10.00"));
}

#[test]
fn split_and_prorate_round_to_cents() {
    assert_eq!(split_value(d("100"), 3).unwrap(), d("33.33"));
    assert_eq!(split_value(d("0.05"), 2).unwrap(), d("0.03"));
    assert_eq!(split_value(d("90"), 1).unwrap(), d("90"));
    assert_eq!(split_value(d("90"), 0), Err(DomainError::InvalidSplit(0)));

    assert_eq!(prorate_installment(d("1000"), 3).unwrap(), d("333.33"));
    assert_eq!(prorate_installment(d("1200"), 12).unwrap(), d("100"));
    assert_eq!(prorate_installment(d("1200"), 0), Err(DomainError::InvalidInstallmentCount(0)));
}

#[test]
fn amount_validation() {
    assert_eq!(ensure_positive("value", d("12.345")).unwrap(), d("12.35"));
    assert_eq!(ensure_positive("value", d("0")), Err(DomainError::NotPositive("value")));
    assert_eq!(ensure_positive("value", d("-1")), Err(DomainError::NotPositive("value")));
    assert_eq!(ensure_non_negative("goal", d("0")).unwrap(), d("0"));
    assert_eq!(ensure_non_negative("goal", d("-0.01")), Err(DomainError::Negative("goal")));
    assert_eq!(MAX_AMOUNT, d("9999999999.99"));
    assert_eq!(
        ensure_positive("value", MAX_AMOUNT + d("0.01")),
        Err(DomainError::TooLarge("value"))
    );
}

#[test]
fn percent_of_zero_whole_is_none() {
    assert_eq!(percent_of(d("50"), d("200")), Some(d("25")));
    assert_eq!(percent_of(d("1"), d("3")), Some(d("33.33")));
    assert_eq!(percent_of(d("10"), Decimal::ZERO), None);
}

// --- Accounts ---

#[test]
fn usernames_are_trimmed_and_lowercased() {
    assert_eq!(rules::normalize_username("  Maria.Silva "), "maria.silva");
}

#[test]
fn password_minimum_length() {
    assert!(rules::validate_password("abcd").is_ok());
    assert_eq!(rules::validate_password("abc"), Err(DomainError::PasswordTooShort(4)));
}

#[test]
fn required_text_and_category_defaults() {
    assert_eq!(rules::required_text("name", Some("  Ana ")).unwrap(), "Ana");
    assert_eq!(rules::required_text("name", Some("   ")), Err(DomainError::Required("name")));
    assert_eq!(rules::required_text("name", None), Err(DomainError::Required("name")));

    assert_eq!(rules::normalize_category(None).unwrap(), "other");
    assert_eq!(rules::normalize_category(Some(" ")).unwrap(), "other");
    assert_eq!(rules::normalize_category(Some("food")).unwrap(), "food");
    let long = "x".repeat(rules::MAX_CATEGORY_LEN + 1);
    assert_eq!(rules::normalize_category(Some(&long)), Err(DomainError::TooLarge("category")));
}

// --- Transactions ---

#[test]
fn split_expense_keeps_original_value() {
    let amounts = rules::split_transaction(TransactionKind::Expense, d("100"), Some(3)).unwrap();
    assert_eq!(amounts.value, d("33.33"));
    assert_eq!(amounts.split_count, 3);
    assert_eq!(amounts.original_value, Some(d("100")));
}

#[test]
fn income_is_never_split() {
    let amounts = rules::split_transaction(TransactionKind::Income, d("100"), Some(4)).unwrap();
    assert_eq!(amounts.value, d("100"));
    assert_eq!(amounts.split_count, 1);
    assert_eq!(amounts.original_value, None);
}

#[test]
fn unsplit_expense_and_invalid_split() {
    let amounts = rules::split_transaction(TransactionKind::Expense, d("42.5"), None).unwrap();
    assert_eq!(amounts.value, d("42.50"));
    assert_eq!(amounts.split_count, 1);
    assert_eq!(amounts.original_value, None);

    assert_eq!(
        rules::split_transaction(TransactionKind::Expense, d("10"), Some(0)),
        Err(DomainError::InvalidSplit(0))
    );
    assert_eq!(
        rules::split_transaction(TransactionKind::Expense, d("0"), Some(2)),
        Err(DomainError::NotPositive("value"))
    );
}

#[test]
fn transaction_kind_parsing() {
    assert_eq!("income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
    assert_eq!("expense".parse::<TransactionKind>().unwrap(), TransactionKind::Expense);
    assert!(matches!(
        "transfer".parse::<TransactionKind>(),
        Err(DomainError::InvalidKind { field: "type", .. })
    ));
}

// --- Fixed expenses ---

#[test]
fn due_day_range() {
    assert_eq!(rules::validate_due_day(1), Ok(1));
    assert_eq!(rules::validate_due_day(31), Ok(31));
    assert_eq!(rules::validate_due_day(0), Err(DomainError::InvalidDueDay(0)));
    assert_eq!(rules::validate_due_day(32), Err(DomainError::InvalidDueDay(32)));
}

#[test]
fn paid_months_have_no_duplicates_and_stay_sorted() {
    let mut paid = Vec::new();
    assert!(rules::mark_month_paid(&mut paid, month("2025-03")));
    assert!(rules::mark_month_paid(&mut paid, month("2025-01")));
    assert!(!rules::mark_month_paid(&mut paid, month("2025-03")));
    assert_eq!(paid, vec!["2025-01".to_string(), "2025-03".to_string()]);

    assert!(rules::is_month_paid(&paid, month("2025-01")));
    assert!(!rules::is_month_paid(&paid, month("2025-02")));

    assert!(rules::mark_month_unpaid(&mut paid, month("2025-01")));
    assert!(!rules::mark_month_unpaid(&mut paid, month("2025-01")));
    assert_eq!(paid, vec!["2025-03".to_string()]);
}

#[test]
fn fixed_payment_date_uses_today_only_in_the_paid_month() {
    let today = date(2025, 2, 14);
    assert_eq!(rules::fixed_payment_date(month("2025-02"), 5, today), today);
    assert_eq!(rules::fixed_payment_date(month("2025-01"), 31, today), date(2025, 1, 31));
    assert_eq!(rules::fixed_payment_date(month("2024-02"), 31, today), date(2024, 2, 29));
    assert_eq!(rules::fixed_payment_description("Rent"), "Rent (fixed expense)");
}

// --- Installments ---

#[test]
fn plan_prorates_when_value_missing() {
    let plan = rules::plan_installment(d("1000"), 3, None, None).unwrap();
    assert_eq!(
        plan,
        InstallmentPlan {
            total_value: d("1000"),
            installment_value: d("333.33"),
            total_installments: 3,
            paid_installments: 0,
        }
    );

    let given = rules::plan_installment(d("1000"), 3, Some(d("350")), Some(1)).unwrap();
    assert_eq!(given.installment_value, d("350"));
    assert_eq!(given.paid_installments, 1);
}

#[test]
fn plan_validation() {
    assert_eq!(
        rules::plan_installment(d("1000"), 0, None, None),
        Err(DomainError::InvalidInstallmentCount(0))
    );
    assert_eq!(
        rules::plan_installment(d("1000"), 3, None, Some(4)),
        Err(DomainError::PaidOutOfRange { paid: 4, total: 3 })
    );
    assert_eq!(
        rules::plan_installment(d("1000"), 3, None, Some(-1)),
        Err(DomainError::PaidOutOfRange { paid: -1, total: 3 })
    );
    assert_eq!(
        rules::plan_installment(d("-5"), 3, None, None),
        Err(DomainError::NotPositive("totalValue"))
    );
    assert!(rules::plan_installment(d("1000"), 3, None, Some(3)).is_ok());
}

#[test]
fn next_installment_stops_at_total() {
    assert_eq!(rules::next_installment(&installment(0, 12)), Ok(1));
    assert_eq!(rules::next_installment(&installment(11, 12)), Ok(12));
    assert_eq!(rules::next_installment(&installment(12, 12)), Err(DomainError::AllInstallmentsPaid));
    assert_eq!(
        rules::installment_payment_description("Laptop", 3, 12),
        "Laptop (installment 3/12)"
    );

    let done = installment(12, 12);
    assert!(done.is_completed());
    assert_eq!(done.remaining(), 0);
}

// --- Savings ---

#[test]
fn savings_movements() {
    assert_eq!(rules::apply_movement(d("100"), MovementKind::Deposit, d("50")), Ok(d("150")));
    assert_eq!(rules::apply_movement(d("100"), MovementKind::Withdraw, d("100")), Ok(d("0")));
    assert_eq!(
        rules::apply_movement(d("100"), MovementKind::Withdraw, d("100.01")),
        Err(DomainError::InsufficientBalance)
    );
    assert_eq!(
        rules::apply_movement(d("100"), MovementKind::Deposit, d("0")),
        Err(DomainError::NotPositive("value"))
    );
    assert_eq!("withdraw".parse::<MovementKind>().unwrap(), MovementKind::Withdraw);
    assert!("steal".parse::<MovementKind>().is_err());
}

// --- Settings ---

#[test]
fn settings_merge_is_shallow_and_validated() {
    let current = rules::default_settings();
    assert_eq!(current, json!({ "savingsPercentage": 20 }));

    let merged = rules::merge_settings(current.clone(), json!({ "theme": "dark" })).unwrap();
    assert_eq!(merged, json!({ "savingsPercentage": 20, "theme": "dark" }));

    let merged = rules::merge_settings(merged, json!({ "savingsPercentage": 35 })).unwrap();
    assert_eq!(merged["savingsPercentage"], json!(35));
    assert_eq!(merged["theme"], json!("dark"));

    assert!(matches!(
        rules::merge_settings(current.clone(), json!({ "savingsPercentage": 101 })),
        Err(DomainError::InvalidSettings(_))
    ));
    assert!(matches!(
        rules::merge_settings(current.clone(), json!({ "savingsPercentage": "ten" })),
        Err(DomainError::InvalidSettings(_))
    ));
    assert!(matches!(
        rules::merge_settings(current, json!([1, 2])),
        Err(DomainError::InvalidSettings(_))
    ));
}

#[test]
fn savings_percentage_reads_numbers_and_falls_back() {
    assert_eq!(rules::savings_percentage(&json!({ "savingsPercentage": 15 })), d("15"));
    assert_eq!(rules::savings_percentage(&json!({ "savingsPercentage": 12.5 })), d("12.5"));
    assert_eq!(rules::savings_percentage(&json!({ "savingsPercentage": "30" })), d("30"));
    assert_eq!(rules::savings_percentage(&json!({})), d("20"));
}

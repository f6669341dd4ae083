//! Finance domain: row types, month keys, money arithmetic, business rules and reports.
//!
//! Nothing in here touches the database; the storage layer feeds rows in and the
//! rules decide what gets written back.

use thiserror::Error;

pub mod model;
pub mod money;
pub mod month;
pub mod report;
pub mod rules;

pub use month::MonthKey;

/// A request that breaks a business rule. Always the client's fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("{0} is too large")]
    TooLarge(&'static str),

    #[error("invalid month '{0}' (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("split count must be at least 1, got {0}")]
    InvalidSplit(i32),

    #[error("installment count must be at least 1, got {0}")]
    InvalidInstallmentCount(i32),

    #[error("paid installments ({paid}) must be between 0 and the total ({total})")]
    PaidOutOfRange { paid: i32, total: i32 },

    #[error("all installments are already paid")]
    AllInstallmentsPaid,

    #[error("due day must be between 1 and 31, got {0}")]
    InvalidDueDay(i32),

    #[error("value is greater than the available balance")]
    InsufficientBalance,

    #[error("invalid {field} '{value}'")]
    InvalidKind { field: &'static str, value: String },

    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("months must be between 1 and {max}, got {got}")]
    InvalidPeriod { got: u32, max: u32 },
}

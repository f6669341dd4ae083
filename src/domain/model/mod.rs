//! Row types for the finance tables, plus the derived views the API returns.

pub mod fixed_expense;
pub mod installment;
pub mod savings;
pub mod transaction;
pub mod user;

pub use fixed_expense::{FixedExpense, FixedExpenseView};
pub use installment::{Installment, InstallmentView};
pub use savings::{MovementKind, SavingsBox, SavingsBoxView, SavingsMovement};
pub use transaction::{Transaction, TransactionKind};
pub use user::{AdminUser, PublicUser, User};

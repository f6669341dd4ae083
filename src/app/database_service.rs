//! The finance data service.
//!
//! Owns the PostgreSQL pool and runs every operation that touches more than one row or
//! table inside a single SQL transaction:
//! 1.  Registering a user together with their default settings.
//! 2.  Paying a fixed expense or an installment, which also books an expense transaction.
//! 3.  Moving money in or out of a savings box, which also records the movement.
//!
//! Single-statement CRUD goes straight to `crate::storage` from the handlers.

use crate::domain::model::{
    AdminUser, FixedExpense, Installment, MovementKind, SavingsBox, Transaction, TransactionKind, User,
};
use crate::domain::report::Ledger;
use crate::domain::rules;
use crate::domain::MonthKey;
use crate::error::AppError;
use crate::infra::config::Config;
use crate::storage::{self, savings::NewSavingsBox, schema, transactions::NewTransaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use utoipa::ToSchema;

/// Every row in the database, for the admin console.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminSnapshot {
    pub users: Vec<AdminUser>,
    pub transactions: Vec<Transaction>,
    pub fixed_expenses: Vec<FixedExpense>,
    pub installments: Vec<Installment>,
    pub savings: Vec<SavingsBox>,
}

#[derive(Clone)]
pub struct DatabaseService {
    pool: PgPool,
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

impl DatabaseService {
    /// Connects to `DATABASE_URL` and makes sure the schema exists.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await?;

        schema::init_schema(&pool).await?;
        info!("database schema ready ({} tables)", schema::TABLES.len());

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ping(&self) -> sqlx::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // --- Accounts ---

    /// Inserts the user and their default settings. A taken username is a conflict.
    pub async fn register_user(&self, username: &str, password_hash: &str, name: &str) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        if storage::users::exists_username(&mut *tx, username).await? {
            return Err(AppError::Conflict("This username is already taken".to_string()));
        }
        let user = match storage::users::insert(&mut *tx, username, password_hash, name).await {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => {
                return Err(AppError::Conflict("This username is already taken".to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        storage::settings::upsert(&mut *tx, user.id, &rules::default_settings()).await?;

        tx.commit().await?;
        info!(user_id = user.id, "registered user '{}'", user.username);
        Ok(user)
    }

    // --- Settings ---

    /// The user's settings, creating the default row on first access.
    pub async fn load_settings(&self, user_id: i32) -> Result<JsonValue, AppError> {
        if let Some(settings) = storage::settings::find(&self.pool, user_id).await? {
            return Ok(settings);
        }
        Ok(storage::settings::insert_if_missing(&self.pool, user_id, &rules::default_settings()).await?)
    }

    pub async fn update_settings(&self, user_id: i32, patch: JsonValue) -> Result<JsonValue, AppError> {
        let mut tx = self.pool.begin().await?;
        let current = storage::settings::find_for_update(&mut *tx, user_id)
            .await?
            .unwrap_or_else(|| JsonValue::Object(Default::default()));
        let merged = rules::merge_settings(current, patch)?;
        storage::settings::upsert(&mut *tx, user_id, &merged).await?;
        tx.commit().await?;
        Ok(merged)
    }

    // --- Fixed expenses ---

    /// Marks `month` paid and books the matching expense transaction.
    pub async fn pay_fixed_expense(
        &self,
        user_id: i32,
        id: i32,
        month: MonthKey,
        today: NaiveDate,
    ) -> Result<(FixedExpense, Transaction), AppError> {
        let mut tx = self.pool.begin().await?;

        let mut expense = storage::fixed_expenses::find_for_update(&mut *tx, user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Fixed expense"))?;
        if !rules::mark_month_paid(&mut expense.paid_months, month) {
            return Err(AppError::Conflict(format!("Fixed expense already paid for {}", month)));
        }
        storage::fixed_expenses::set_paid_months(&mut *tx, expense.id, &expense.paid_months).await?;

        let description = rules::fixed_payment_description(&expense.description);
        let transaction = storage::transactions::insert(
            &mut *tx,
            &NewTransaction {
                user_id,
                kind: TransactionKind::Expense.as_str(),
                category: &expense.category,
                description: &description,
                value: expense.value,
                date: rules::fixed_payment_date(month, expense.day, today),
                split_count: 1,
                original_value: None,
            },
        )
        .await?;

        tx.commit().await?;
        info!(user_id, fixed_expense_id = id, "fixed expense paid for {}", month);
        Ok((expense, transaction))
    }

    /// Removes `month` from the paid list. The booked transaction stays.
    pub async fn unpay_fixed_expense(&self, user_id: i32, id: i32, month: MonthKey) -> Result<FixedExpense, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut expense = storage::fixed_expenses::find_for_update(&mut *tx, user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Fixed expense"))?;
        if !rules::mark_month_unpaid(&mut expense.paid_months, month) {
            return Err(AppError::Conflict(format!("Fixed expense is not paid for {}", month)));
        }
        storage::fixed_expenses::set_paid_months(&mut *tx, expense.id, &expense.paid_months).await?;

        tx.commit().await?;
        Ok(expense)
    }

    // --- Installments ---

    /// Pays the next installment and books it as an expense dated `today`.
    pub async fn pay_installment(
        &self,
        user_id: i32,
        id: i32,
        today: NaiveDate,
    ) -> Result<(Installment, Transaction), AppError> {
        let mut tx = self.pool.begin().await?;

        let mut installment = storage::installments::find_for_update(&mut *tx, user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Installment"))?;
        let number = rules::next_installment(&installment)?;
        storage::installments::set_paid(&mut *tx, installment.id, number).await?;
        installment.paid_installments = number;

        let description =
            rules::installment_payment_description(&installment.description, number, installment.total_installments);
        let transaction = storage::transactions::insert(
            &mut *tx,
            &NewTransaction {
                user_id,
                kind: TransactionKind::Expense.as_str(),
                category: &installment.category,
                description: &description,
                value: installment.installment_value,
                date: today,
                split_count: 1,
                original_value: None,
            },
        )
        .await?;

        tx.commit().await?;
        info!(user_id, installment_id = id, "installment {}/{} paid", number, installment.total_installments);
        Ok((installment, transaction))
    }

    // --- Savings ---

    /// Creates the box; a non-zero opening balance is recorded as a deposit.
    pub async fn create_savings_box(&self, new: &NewSavingsBox<'_>, today: NaiveDate) -> Result<SavingsBox, AppError> {
        let mut tx = self.pool.begin().await?;
        let savings_box = storage::savings::insert_box(&mut *tx, new).await?;
        if savings_box.current_value > Decimal::ZERO {
            storage::savings::insert_movement(
                &mut *tx,
                &savings_box,
                MovementKind::Deposit,
                savings_box.current_value,
                today,
            )
            .await?;
        }
        tx.commit().await?;
        Ok(savings_box)
    }

    pub async fn move_savings(
        &self,
        user_id: i32,
        id: i32,
        kind: MovementKind,
        value: Decimal,
        today: NaiveDate,
    ) -> Result<SavingsBox, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut savings_box = storage::savings::find_box_for_update(&mut *tx, user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Savings box"))?;
        let next = rules::apply_movement(savings_box.current_value, kind, value)?;
        storage::savings::set_current_value(&mut *tx, savings_box.id, next).await?;
        let moved = (next - savings_box.current_value).abs();
        storage::savings::insert_movement(&mut *tx, &savings_box, kind, moved, today).await?;
        savings_box.current_value = next;

        tx.commit().await?;
        Ok(savings_box)
    }

    // --- Reports ---

    /// Loads every row a report needs for one user.
    pub async fn load_ledger(&self, user_id: i32) -> Result<Ledger, AppError> {
        let (transactions, fixed_expenses, installments, savings, movements, settings) = tokio::try_join!(
            storage::transactions::list(&self.pool, user_id, None),
            storage::fixed_expenses::list(&self.pool, user_id),
            storage::installments::list(&self.pool, user_id),
            storage::savings::list_boxes(&self.pool, user_id),
            storage::savings::list_movements(&self.pool, user_id),
            storage::settings::find(&self.pool, user_id),
        )?;

        let savings_percentage = settings
            .as_ref()
            .map(rules::savings_percentage)
            .unwrap_or_else(|| rules::savings_percentage(&rules::default_settings()));

        Ok(Ledger {
            transactions,
            fixed_expenses,
            installments,
            savings,
            movements,
            savings_percentage,
        })
    }

    // --- Admin ---

    pub async fn admin_snapshot(&self) -> Result<AdminSnapshot, AppError> {
        let (users, transactions, fixed_expenses, installments, savings) = tokio::try_join!(
            storage::users::list_with_settings(&self.pool),
            storage::transactions::list_all(&self.pool),
            storage::fixed_expenses::list_all(&self.pool),
            storage::installments::list_all(&self.pool),
            storage::savings::list_all_boxes(&self.pool),
        )?;

        Ok(AdminSnapshot {
            users,
            transactions,
            fixed_expenses,
            installments,
            savings,
        })
    }
}

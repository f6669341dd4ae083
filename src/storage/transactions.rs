use crate::domain::model::Transaction;
use crate::domain::MonthKey;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgExecutor;

const COLUMNS: &str =
    "id, user_id, type, category, description, value, date, split_count, original_value, created_at";

/// Fields of a transaction about to be inserted.
#[derive(Debug, Clone)]
pub struct NewTransaction<'a> {
    pub user_id: i32,
    pub kind: &'a str,
    pub category: &'a str,
    pub description: &'a str,
    pub value: Decimal,
    pub date: NaiveDate,
    pub split_count: i32,
    pub original_value: Option<Decimal>,
}

pub async fn insert<'e, E: PgExecutor<'e>>(db: E, new: &NewTransaction<'_>) -> sqlx::Result<Transaction> {
    sqlx::query_as::<_, Transaction>(&format!(
        "INSERT INTO transactions
            (user_id, type, category, description, value, date, split_count, original_value)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {}",
        COLUMNS
    ))
    .bind(new.user_id)
    .bind(new.kind)
    .bind(new.category)
    .bind(new.description)
    .bind(new.value)
    .bind(new.date)
    .bind(new.split_count)
    .bind(new.original_value)
    .fetch_one(db)
    .await
}

/// The user's transactions, newest first, optionally limited to one month.
pub async fn list<'e, E: PgExecutor<'e>>(
    db: E,
    user_id: i32,
    month: Option<MonthKey>,
) -> sqlx::Result<Vec<Transaction>> {
    let (from, to) = match month {
        Some(m) => (Some(m.first_day()), Some(m.last_day())),
        None => (None, None),
    };
    sqlx::query_as::<_, Transaction>(&format!(
        "SELECT {} FROM transactions
         WHERE user_id = $1
           AND ($2::date IS NULL OR date >= $2)
           AND ($3::date IS NULL OR date <= $3)
         ORDER BY date DESC, id DESC",
        COLUMNS
    ))
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await
}

pub async fn list_all<'e, E: PgExecutor<'e>>(db: E) -> sqlx::Result<Vec<Transaction>> {
    sqlx::query_as::<_, Transaction>(&format!(
        "SELECT {} FROM transactions ORDER BY date DESC, id DESC",
        COLUMNS
    ))
    .fetch_all(db)
    .await
}

/// Returns `false` when no row of this user had that id.
pub async fn delete<'e, E: PgExecutor<'e>>(db: E, user_id: i32, id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM transactions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

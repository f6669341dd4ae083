use crate::domain::model::FixedExpense;
use crate::domain::MonthKey;
use rust_decimal::Decimal;
use sqlx::PgExecutor;

const COLUMNS: &str = "id, user_id, description, value, day, category, paid_months, created_at";

pub async fn insert<'e, E: PgExecutor<'e>>(
    db: E,
    user_id: i32,
    description: &str,
    value: Decimal,
    day: i32,
    category: &str,
) -> sqlx::Result<FixedExpense> {
    sqlx::query_as::<_, FixedExpense>(&format!(
        "INSERT INTO fixed_expenses (user_id, description, value, day, category)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {}",
        COLUMNS
    ))
    .bind(user_id)
    .bind(description)
    .bind(value)
    .bind(day)
    .bind(category)
    .fetch_one(db)
    .await
}

pub async fn list<'e, E: PgExecutor<'e>>(db: E, user_id: i32) -> sqlx::Result<Vec<FixedExpense>> {
    sqlx::query_as::<_, FixedExpense>(&format!(
        "SELECT {} FROM fixed_expenses WHERE user_id = $1 ORDER BY day, id",
        COLUMNS
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn list_all<'e, E: PgExecutor<'e>>(db: E) -> sqlx::Result<Vec<FixedExpense>> {
    sqlx::query_as::<_, FixedExpense>(&format!(
        "SELECT {} FROM fixed_expenses ORDER BY day, id",
        COLUMNS
    ))
    .fetch_all(db)
    .await
}

/// Fetches and row-locks one of the user's fixed expenses.
pub async fn find_for_update<'e, E: PgExecutor<'e>>(
    db: E,
    user_id: i32,
    id: i32,
) -> sqlx::Result<Option<FixedExpense>> {
    sqlx::query_as::<_, FixedExpense>(&format!(
        "SELECT {} FROM fixed_expenses WHERE id = $1 AND user_id = $2 FOR UPDATE",
        COLUMNS
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn set_paid_months<'e, E: PgExecutor<'e>>(db: E, id: i32, paid_months: &[String]) -> sqlx::Result<()> {
    sqlx::query("UPDATE fixed_expenses SET paid_months = $1 WHERE id = $2")
        .bind(paid_months)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

/// Drops `month` from the paid list of every fixed expense of the user. Returns the
/// number of expenses that were marked paid for it.
pub async fn clear_month<'e, E: PgExecutor<'e>>(db: E, user_id: i32, month: MonthKey) -> sqlx::Result<u64> {
    let result = sqlx::query(
        "UPDATE fixed_expenses SET paid_months = array_remove(paid_months, $1)
         WHERE user_id = $2 AND $1 = ANY(paid_months)",
    )
    .bind(month.to_string())
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete<'e, E: PgExecutor<'e>>(db: E, user_id: i32, id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM fixed_expenses WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

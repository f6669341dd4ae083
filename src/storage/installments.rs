use crate::domain::model::Installment;
use crate::domain::rules::InstallmentPlan;
use chrono::NaiveDate;
use sqlx::PgExecutor;

const COLUMNS: &str = "id, user_id, description, category, total_value, installment_value, \
                       total_installments, paid_installments, start_date, created_at";

pub async fn insert<'e, E: PgExecutor<'e>>(
    db: E,
    user_id: i32,
    description: &str,
    category: &str,
    plan: &InstallmentPlan,
    start_date: NaiveDate,
) -> sqlx::Result<Installment> {
    sqlx::query_as::<_, Installment>(&format!(
        "INSERT INTO installments
            (user_id, description, category, total_value, installment_value,
             total_installments, paid_installments, start_date)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {}",
        COLUMNS
    ))
    .bind(user_id)
    .bind(description)
    .bind(category)
    .bind(plan.total_value)
    .bind(plan.installment_value)
    .bind(plan.total_installments)
    .bind(plan.paid_installments)
    .bind(start_date)
    .fetch_one(db)
    .await
}

pub async fn list<'e, E: PgExecutor<'e>>(db: E, user_id: i32) -> sqlx::Result<Vec<Installment>> {
    sqlx::query_as::<_, Installment>(&format!(
        "SELECT {} FROM installments WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        COLUMNS
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn list_all<'e, E: PgExecutor<'e>>(db: E) -> sqlx::Result<Vec<Installment>> {
    sqlx::query_as::<_, Installment>(&format!(
        "SELECT {} FROM installments ORDER BY created_at DESC, id DESC",
        COLUMNS
    ))
    .fetch_all(db)
    .await
}

pub async fn find_for_update<'e, E: PgExecutor<'e>>(
    db: E,
    user_id: i32,
    id: i32,
) -> sqlx::Result<Option<Installment>> {
    sqlx::query_as::<_, Installment>(&format!(
        "SELECT {} FROM installments WHERE id = $1 AND user_id = $2 FOR UPDATE",
        COLUMNS
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn set_paid<'e, E: PgExecutor<'e>>(db: E, id: i32, paid_installments: i32) -> sqlx::Result<()> {
    sqlx::query("UPDATE installments SET paid_installments = $1 WHERE id = $2")
        .bind(paid_installments)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete<'e, E: PgExecutor<'e>>(db: E, user_id: i32, id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM installments WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

use crate::domain::model::{MovementKind, SavingsBox, SavingsMovement};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgExecutor;

const BOX_COLUMNS: &str = "id, user_id, name, goal, current_value, icon, color, created_at";
const MOVEMENT_COLUMNS: &str = "id, savings_box_id, user_id, kind, value, date, created_at";

#[derive(Debug, Clone)]
pub struct NewSavingsBox<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub goal: Decimal,
    pub current_value: Decimal,
    pub icon: &'a str,
    pub color: &'a str,
}

pub async fn insert_box<'e, E: PgExecutor<'e>>(db: E, new: &NewSavingsBox<'_>) -> sqlx::Result<SavingsBox> {
    sqlx::query_as::<_, SavingsBox>(&format!(
        "INSERT INTO savings_boxes (user_id, name, goal, current_value, icon, color)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {}",
        BOX_COLUMNS
    ))
    .bind(new.user_id)
    .bind(new.name)
    .bind(new.goal)
    .bind(new.current_value)
    .bind(new.icon)
    .bind(new.color)
    .fetch_one(db)
    .await
}

pub async fn list_boxes<'e, E: PgExecutor<'e>>(db: E, user_id: i32) -> sqlx::Result<Vec<SavingsBox>> {
    sqlx::query_as::<_, SavingsBox>(&format!(
        "SELECT {} FROM savings_boxes WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        BOX_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn list_all_boxes<'e, E: PgExecutor<'e>>(db: E) -> sqlx::Result<Vec<SavingsBox>> {
    sqlx::query_as::<_, SavingsBox>(&format!(
        "SELECT {} FROM savings_boxes ORDER BY created_at DESC, id DESC",
        BOX_COLUMNS
    ))
    .fetch_all(db)
    .await
}

pub async fn find_box_for_update<'e, E: PgExecutor<'e>>(
    db: E,
    user_id: i32,
    id: i32,
) -> sqlx::Result<Option<SavingsBox>> {
    sqlx::query_as::<_, SavingsBox>(&format!(
        "SELECT {} FROM savings_boxes WHERE id = $1 AND user_id = $2 FOR UPDATE",
        BOX_COLUMNS
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn set_current_value<'e, E: PgExecutor<'e>>(db: E, id: i32, value: Decimal) -> sqlx::Result<()> {
    sqlx::query("UPDATE savings_boxes SET current_value = $1 WHERE id = $2")
        .bind(value)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete_box<'e, E: PgExecutor<'e>>(db: E, user_id: i32, id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM savings_boxes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn insert_movement<'e, E: PgExecutor<'e>>(
    db: E,
    savings_box: &SavingsBox,
    kind: MovementKind,
    value: Decimal,
    date: NaiveDate,
) -> sqlx::Result<SavingsMovement> {
    sqlx::query_as::<_, SavingsMovement>(&format!(
        "INSERT INTO savings_movements (savings_box_id, user_id, kind, value, date)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {}",
        MOVEMENT_COLUMNS
    ))
    .bind(savings_box.id)
    .bind(savings_box.user_id)
    .bind(kind.as_str())
    .bind(value)
    .bind(date)
    .fetch_one(db)
    .await
}

pub async fn list_movements<'e, E: PgExecutor<'e>>(db: E, user_id: i32) -> sqlx::Result<Vec<SavingsMovement>> {
    sqlx::query_as::<_, SavingsMovement>(&format!(
        "SELECT {} FROM savings_movements WHERE user_id = $1 ORDER BY date, id",
        MOVEMENT_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

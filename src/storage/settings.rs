use serde_json::Value as JsonValue;
use sqlx::PgExecutor;

pub async fn find<'e, E: PgExecutor<'e>>(db: E, user_id: i32) -> sqlx::Result<Option<JsonValue>> {
    sqlx::query_scalar("SELECT settings FROM user_settings WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(db)
        .await
}

/// Inserts the row unless one already exists. Returns the settings now stored.
pub async fn insert_if_missing<'e, E: PgExecutor<'e>>(
    db: E,
    user_id: i32,
    settings: &JsonValue,
) -> sqlx::Result<JsonValue> {
    sqlx::query_scalar(
        "INSERT INTO user_settings (user_id, settings) VALUES ($1, $2)
         ON CONFLICT (user_id) DO UPDATE SET settings = user_settings.settings
         RETURNING settings",
    )
    .bind(user_id)
    .bind(settings)
    .fetch_one(db)
    .await
}

pub async fn upsert<'e, E: PgExecutor<'e>>(db: E, user_id: i32, settings: &JsonValue) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO user_settings (user_id, settings) VALUES ($1, $2)
         ON CONFLICT (user_id) DO UPDATE SET settings = EXCLUDED.settings",
    )
    .bind(user_id)
    .bind(settings)
    .execute(db)
    .await?;
    Ok(())
}

/// Locks the user's settings row for the rest of the transaction.
pub async fn find_for_update<'e, E: PgExecutor<'e>>(db: E, user_id: i32) -> sqlx::Result<Option<JsonValue>> {
    sqlx::query_scalar("SELECT settings FROM user_settings WHERE user_id = $1 FOR UPDATE")
        .bind(user_id)
        .fetch_optional(db)
        .await
}

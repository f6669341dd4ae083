use crate::domain::model::{AdminUser, PublicUser, User};
use sqlx::PgExecutor;

pub async fn insert<'e, E: PgExecutor<'e>>(
    db: E,
    username: &str,
    password_hash: &str,
    name: &str,
) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password, name) VALUES ($1, $2, $3)
         RETURNING id, username, password, name, created_at",
    )
    .bind(username)
    .bind(password_hash)
    .bind(name)
    .fetch_one(db)
    .await
}

pub async fn find_by_username<'e, E: PgExecutor<'e>>(db: E, username: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, password, name, created_at FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(db)
    .await
}

pub async fn find_public<'e, E: PgExecutor<'e>>(db: E, id: i32) -> sqlx::Result<Option<PublicUser>> {
    sqlx::query_as::<_, PublicUser>("SELECT id, name, username FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn exists_username<'e, E: PgExecutor<'e>>(db: E, username: &str) -> sqlx::Result<bool> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
        .bind(username)
        .fetch_one(db)
        .await
}

/// Public listing for the login picker. Users without a display name sort by username.
pub async fn list_public<'e, E: PgExecutor<'e>>(db: E) -> sqlx::Result<Vec<PublicUser>> {
    sqlx::query_as::<_, PublicUser>(
        "SELECT id, COALESCE(NULLIF(name, ''), username) AS name, username
         FROM users ORDER BY COALESCE(NULLIF(name, ''), username), id",
    )
    .fetch_all(db)
    .await
}

pub async fn list_with_settings<'e, E: PgExecutor<'e>>(db: E) -> sqlx::Result<Vec<AdminUser>> {
    sqlx::query_as::<_, AdminUser>(
        "SELECT u.id, u.username, COALESCE(NULLIF(u.name, ''), u.username) AS name,
                u.created_at, us.settings
         FROM users u LEFT JOIN user_settings us ON u.id = us.user_id
         ORDER BY u.id",
    )
    .fetch_all(db)
    .await
}

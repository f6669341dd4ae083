use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A `users` row. Carries the bcrypt hash, so it is never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow, ToSchema)]
pub struct PublicUser {
    pub id: i32,
    pub name: String,
    pub username: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
        }
    }
}

/// User listing for the admin console, joined with the user's settings object.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AdminUser {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Option<Object>)]
    pub settings: Option<JsonValue>,
}

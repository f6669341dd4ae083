//! HS256 bearer tokens for users and for the admin console.

use crate::infra::config::Config;
use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserClaims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminClaims {
    #[serde(default)]
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies both token kinds. User and admin tokens use separate secrets.
#[derive(Clone)]
pub struct TokenService {
    user_encoding: EncodingKey,
    user_decoding: DecodingKey,
    admin_encoding: EncodingKey,
    admin_decoding: DecodingKey,
    user_ttl: Duration,
    admin_ttl: Duration,
}

impl TokenService {
    pub fn new(user_secret: &str, admin_secret: &str, user_ttl: Duration, admin_ttl: Duration) -> Self {
        Self {
            user_encoding: EncodingKey::from_secret(user_secret.as_bytes()),
            user_decoding: DecodingKey::from_secret(user_secret.as_bytes()),
            admin_encoding: EncodingKey::from_secret(admin_secret.as_bytes()),
            admin_decoding: DecodingKey::from_secret(admin_secret.as_bytes()),
            user_ttl,
            admin_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            &config.admin_secret,
            Duration::hours(config.jwt_ttl_hours),
            Duration::hours(config.admin_ttl_hours),
        )
    }

    pub fn issue_user_token(&self, user_id: i32) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = UserClaims {
            user_id,
            iat: now.timestamp(),
            exp: expiry(now, self.user_ttl)?,
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.user_encoding)?)
    }

    pub fn verify_user_token(&self, token: &str) -> jsonwebtoken::errors::Result<UserClaims> {
        decode::<UserClaims>(token, &self.user_decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
    }

    pub fn issue_admin_token(&self) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = AdminClaims {
            admin: true,
            iat: now.timestamp(),
            exp: expiry(now, self.admin_ttl)?,
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.admin_encoding)?)
    }

    /// Verifies signature and expiry only; callers must still check `claims.admin`.
    pub fn verify_admin_token(&self, token: &str) -> jsonwebtoken::errors::Result<AdminClaims> {
        decode::<AdminClaims>(token, &self.admin_decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
    }
}

/// A token must outlive the moment it is issued.
fn expiry(now: DateTime<Utc>, ttl: Duration) -> anyhow::Result<i64> {
    if ttl <= Duration::zero() {
        return Err(anyhow!("token lifetime must be positive"));
    }
    now.checked_add_signed(ttl)
        .map(|exp| exp.timestamp())
        .ok_or_else(|| anyhow!("token lifetime overflows the calendar"))
}

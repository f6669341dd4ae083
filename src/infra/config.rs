//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context};
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use tracing::info;

/// Token lifetimes are bounded to ten years.
pub const MAX_TTL_HOURS: i64 = 24 * 365 * 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    /// HMAC secret for user tokens.
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    /// HMAC secret for admin tokens. Kept apart from `jwt_secret` so a user
    /// token can never verify as an admin one.
    pub admin_secret: String,
    /// Admin login is disabled when unset.
    pub admin_password: Option<String>,
    pub admin_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bcrypt_cost: u32 = optional(&lookup, "BCRYPT_COST", "10")?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(anyhow!("BCRYPT_COST must be between 4 and 31, got {}", bcrypt_cost));
        }

        let jwt_ttl_hours = ttl_hours(&lookup, "JWT_TTL_HOURS", "168")?;
        let admin_ttl_hours = ttl_hours(&lookup, "ADMIN_TTL_HOURS", "24")?;

        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            bind_addr: optional(&lookup, "BIND_ADDR", "0.0.0.0:3000")?,
            db_max_connections: optional::<u32, _>(&lookup, "DB_MAX_CONNECTIONS", "5")?.max(1),
            jwt_secret: required(&lookup, "JWT_SECRET")?,
            jwt_ttl_hours,
            admin_secret: required(&lookup, "ADMIN_SECRET")?,
            admin_password: lookup("ADMIN_PASSWORD").filter(|p| !p.is_empty()),
            admin_ttl_hours,
            bcrypt_cost,
        })
    }
}

fn ttl_hours<F>(lookup: &F, key: &str, default: &str) -> anyhow::Result<i64>
where
    F: Fn(&str) -> Option<String>,
{
    let hours: i64 = optional(lookup, key, default)?;
    if !(1..=MAX_TTL_HOURS).contains(&hours) {
        return Err(anyhow!("{} must be between 1 and {}, got {}", key, MAX_TTL_HOURS, hours));
    }
    Ok(hours)
}

fn required<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("{} must be set", key))
}

fn optional<T, F>(lookup: &F, key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("invalid {} value '{}'", key, raw))
}

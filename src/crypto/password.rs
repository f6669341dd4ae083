//! bcrypt password hashing.
//!
//! bcrypt is CPU-bound, so the async wrappers move the work onto tokio's blocking pool.

use anyhow::Context;

pub fn hash_password(password: &str, cost: u32) -> anyhow::Result<String> {
    bcrypt::hash(password, cost).context("failed to hash password")
}

/// Returns `false` for a wrong password and for a stored hash that is not valid bcrypt.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

pub async fn hash_password_async(password: String, cost: u32) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .context("password hashing task panicked")?
}

pub async fn verify_password_async(password: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .context("password verification task panicked")
}

/// Compares two plaintext secrets without stopping at the first differing byte.
pub fn secrets_match(given: &str, expected: &str) -> bool {
    let (given, expected) = (given.as_bytes(), expected.as_bytes());
    if given.len() != expected.len() {
        return false;
    }
    given.iter().zip(expected).fold(0u8, |diff, (a, b)| diff | (a ^ b)) == 0
}

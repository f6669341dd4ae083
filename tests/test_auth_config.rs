//! Tokens, password hashing, bearer parsing and environment configuration.

use chrono::{Duration, Utc};
use finance_tracker::crypto::password::{
    hash_password, hash_password_async, secrets_match, verify_password, verify_password_async,
};
use finance_tracker::crypto::token::{AdminClaims, TokenService, UserClaims};
use finance_tracker::transport::http::auth::parse_bearer;
use finance_tracker::infra::config::MAX_TTL_HOURS;
use finance_tracker::{AppError, Config};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::collections::HashMap;

const USER_SECRET: &str = "user-secret";
const ADMIN_SECRET: &str = "admin-secret";

fn tokens() -> TokenService {
    TokenService::new(USER_SECRET, ADMIN_SECRET, Duration::hours(168), Duration::hours(24))
}

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key: &str| map.get(key).cloned()
}

const REQUIRED: [(&str, &str); 3] = [
    ("DATABASE_URL", "postgres://localhost/finance"),
    ("JWT_SECRET", USER_SECRET),
    ("ADMIN_SECRET", ADMIN_SECRET),
];

// --- Tokens ---

#[test]
fn user_token_round_trip() {
    let service = tokens();
    let token = service.issue_user_token(42).unwrap();
    let claims = service.verify_user_token(&token).unwrap();
    assert_eq!(claims.user_id, 42);
    assert_eq!(claims.exp - claims.iat, 168 * 3600);
}

#[test]
fn user_token_carries_user_id_claim() {
    let token = tokens().issue_user_token(7).unwrap();
    // The claim name is part of the wire contract with existing clients.
    let decoded = jsonwebtoken::decode::<serde_json::Value>(
        &token,
        &jsonwebtoken::DecodingKey::from_secret(USER_SECRET.as_bytes()),
        &jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256),
    )
    .unwrap();
    assert_eq!(decoded.claims["userId"], serde_json::json!(7));
}

#[test]
fn tokens_do_not_cross_secrets() {
    let service = tokens();
    let user_token = service.issue_user_token(1).unwrap();
    let admin_token = service.issue_admin_token().unwrap();

    assert!(service.verify_admin_token(&user_token).is_err());
    assert!(service.verify_user_token(&admin_token).is_err());
    assert!(service.verify_admin_token(&admin_token).unwrap().admin);

    let other = TokenService::new("other", "other-admin", Duration::hours(1), Duration::hours(1));
    assert!(other.verify_user_token(&user_token).is_err());
}

#[test]
fn expired_token_is_rejected() {
    let now = Utc::now().timestamp();
    let claims = UserClaims {
        user_id: 3,
        iat: now - 7200,
        exp: now - 3600,
    };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(USER_SECRET.as_bytes())).unwrap();
    assert!(tokens().verify_user_token(&token).is_err());
}

#[test]
fn admin_secret_token_without_admin_flag_verifies_but_is_not_admin() {
    let now = Utc::now().timestamp();
    let claims = AdminClaims {
        admin: false,
        iat: now,
        exp: now + 600,
    };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(ADMIN_SECRET.as_bytes())).unwrap();
    let verified = tokens().verify_admin_token(&token).unwrap();
    assert!(!verified.admin);
}

#[test]
fn unrepresentable_lifetimes_fail_to_issue() {
    let far = TokenService::new(USER_SECRET, ADMIN_SECRET, Duration::MAX, Duration::MAX);
    assert!(far.issue_user_token(1).is_err());
    assert!(far.issue_admin_token().is_err());

    let expired = TokenService::new(USER_SECRET, ADMIN_SECRET, Duration::hours(-1), Duration::zero());
    assert!(expired.issue_user_token(1).is_err());
    assert!(expired.issue_admin_token().is_err());
}

#[test]
fn longest_configured_lifetime_issues_and_verifies() {
    let mut pairs = REQUIRED.to_vec();
    pairs.push(("JWT_TTL_HOURS", "87600"));
    let config = Config::from_lookup(lookup(&pairs)).unwrap();
    assert_eq!(config.jwt_ttl_hours, MAX_TTL_HOURS);
    let service = TokenService::from_config(&config);
    let token = service.issue_user_token(5).unwrap();
    assert_eq!(service.verify_user_token(&token).unwrap().user_id, 5);
}

#[test]
fn garbage_token_is_rejected() {
    assert!(tokens().verify_user_token("not-a-jwt").is_err());
    assert!(tokens().verify_admin_token("").is_err());
}

// --- Bearer header ---

#[test]
fn bearer_header_parsing() {
    assert_eq!(parse_bearer(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    assert_eq!(parse_bearer(Some("bearer xyz")).unwrap(), "xyz");

    assert!(matches!(parse_bearer(None), Err(AppError::Unauthorized(m)) if m == "Token not provided"));
    for malformed in ["Bearer", "Basic abc", "Bearer a b", "", "abc.def.ghi"] {
        assert!(
            matches!(parse_bearer(Some(malformed)), Err(AppError::Unauthorized(ref m)) if m == "Malformed token"),
            "{malformed:?} should be malformed"
        );
    }
}

// --- Passwords ---

#[test]
fn password_hash_and_verify() {
    let hash = hash_password("s3cret", 4).unwrap();
    assert_ne!(hash, "s3cret");
    assert!(verify_password("s3cret", &hash));
    assert!(!verify_password("wrong", &hash));
    assert!(!verify_password("s3cret", "not-a-bcrypt-hash"));
}

#[test]
fn admin_secret_comparison() {
    assert!(secrets_match("hunter2", "hunter2"));
    assert!(!secrets_match("hunter3", "hunter2"));
    assert!(!secrets_match("hunter", "hunter2"));
    assert!(!secrets_match("", "hunter2"));
    assert!(secrets_match("", ""));
}

#[tokio::test]
async fn password_hash_and_verify_off_the_runtime() {
    let hash = hash_password_async("abcd".to_string(), 4).await.unwrap();
    assert!(verify_password_async("abcd".to_string(), hash.clone()).await.unwrap());
    assert!(!verify_password_async("abce".to_string(), hash).await.unwrap());
}

// --- Config ---

#[test]
fn config_defaults() {
    let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
    assert_eq!(config.database_url, "postgres://localhost/finance");
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(config.db_max_connections, 5);
    assert_eq!(config.jwt_ttl_hours, 168);
    assert_eq!(config.admin_ttl_hours, 24);
    assert_eq!(config.bcrypt_cost, 10);
    assert_eq!(config.admin_password, None);
}

#[test]
fn config_overrides() {
    let mut pairs = REQUIRED.to_vec();
    pairs.extend([
        ("BIND_ADDR", "127.0.0.1:8080"),
        ("DB_MAX_CONNECTIONS", "12"),
        ("JWT_TTL_HOURS", "1"),
        ("ADMIN_PASSWORD", "hunter2"),
        ("BCRYPT_COST", "4"),
    ]);
    let config = Config::from_lookup(lookup(&pairs)).unwrap();
    assert_eq!(config.bind_addr.port(), 8080);
    assert_eq!(config.db_max_connections, 12);
    assert_eq!(config.jwt_ttl_hours, 1);
    assert_eq!(config.admin_password.as_deref(), Some("hunter2"));
    assert_eq!(config.bcrypt_cost, 4);
}

#[test]
fn config_missing_or_invalid_values_are_errors() {
    let err = Config::from_lookup(lookup(&REQUIRED[..2])).unwrap_err();
    assert!(err.to_string().contains("ADMIN_SECRET"));

    let mut pairs = REQUIRED.to_vec();
    pairs.push(("BIND_ADDR", "not-an-address"));
    assert!(Config::from_lookup(lookup(&pairs)).is_err());

    let mut pairs = REQUIRED.to_vec();
    pairs.push(("BCRYPT_COST", "40"));
    assert!(Config::from_lookup(lookup(&pairs)).is_err());

    for (key, value) in [
        ("JWT_TTL_HOURS", "2000000000000"),
        ("JWT_TTL_HOURS", "0"),
        ("JWT_TTL_HOURS", "-1"),
        ("ADMIN_TTL_HOURS", "87601"),
        ("ADMIN_TTL_HOURS", "-24"),
    ] {
        let mut pairs = REQUIRED.to_vec();
        pairs.push((key, value));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains(key), "{key}={value} accepted");
    }

    let mut pairs = REQUIRED.to_vec();
    pairs.push(("ADMIN_PASSWORD", ""));
    assert_eq!(Config::from_lookup(lookup(&pairs)).unwrap().admin_password, None);
}

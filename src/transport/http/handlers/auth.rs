use crate::crypto::password::{hash_password_async, verify_password_async};
use crate::domain::model::PublicUser;
use crate::domain::rules;
use crate::error::AppError;
use crate::storage;
use crate::transport::http::auth::AuthUser;
use crate::transport::http::handlers::common::{body, ok, respond};
use crate::transport::http::types::{ApiResponse, AppState, LoginRequest, RegisterRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Serialize, Debug, ToSchema)]
pub struct AuthPayload {
    pub token: String,
    pub user: PublicUser,
}

fn issue(state: &AppState, user: PublicUser) -> Result<AuthPayload, AppError> {
    let token = state.tokens.issue_user_token(user.id)?;
    Ok(AuthPayload { token, user })
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created; data is `{token, user}`", body = ApiResponse),
        (status = 400, description = "Missing field or password too short", body = ApiResponse),
        (status = 409, description = "Username already taken", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse)
    )
)]
pub async fn register_handler(
    State(state): State<AppState>,
    request: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = body(request)?;
    let name = rules::required_text("name", request.name.as_deref())?;
    let username = rules::normalize_username(&rules::required_text("username", request.username.as_deref())?);
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("password is required".to_string()))?;
    rules::validate_password(&password)?;

    let hash = hash_password_async(password, state.config.bcrypt_cost).await?;
    let user = state.db_service.register_user(&username, &hash, &name).await?;

    respond(StatusCode::CREATED, issue(&state, PublicUser::from(&user))?)
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; data is `{token, user}`", body = ApiResponse),
        (status = 400, description = "Missing username or password", body = ApiResponse),
        (status = 401, description = "Wrong username or password", body = ApiResponse)
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = body(request)?;
    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(AppError::BadRequest("username and password are required".to_string()));
    };
    let username = rules::normalize_username(&username);

    let rejected = || AppError::Unauthorized("Invalid username or password".to_string());
    let user = storage::users::find_by_username(state.db_service.pool(), &username)
        .await?
        .ok_or_else(rejected)?;
    if !verify_password_async(password, user.password.clone()).await? {
        return Err(rejected());
    }

    info!(user_id = user.id, "user logged in");
    ok(issue(&state, PublicUser::from(&user))?)
}

#[utoipa::path(
    get,
    path = "/api/auth/users",
    responses(
        (status = 200, description = "All users as `{id, name, username}`, ordered by name", body = ApiResponse)
    )
)]
pub async fn list_users_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    ok(storage::users::list_public(state.db_service.pool()).await?)
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The authenticated user", body = ApiResponse),
        (status = 401, description = "Missing or invalid token", body = ApiResponse),
        (status = 404, description = "User no longer exists", body = ApiResponse)
    ),
    security(("bearer" = []))
)]
pub async fn me_handler(State(state): State<AppState>, auth: AuthUser) -> Result<Response, AppError> {
    let user = storage::users::find_public(state.db_service.pool(), auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    ok(user)
}

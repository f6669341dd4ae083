use crate::domain::MonthKey;
use crate::error::AppError;
use crate::transport::http::types::ApiResponse;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Wraps `data` in a successful envelope.
pub fn respond<T: Serialize>(status: StatusCode, data: T) -> Result<Response, AppError> {
    let data = serde_json::to_value(data).map_err(anyhow::Error::from)?;
    Ok((status, Json(ApiResponse::ok(data))).into_response())
}

pub fn ok<T: Serialize>(data: T) -> Result<Response, AppError> {
    respond(StatusCode::OK, data)
}

pub fn created(id: i32) -> Result<Response, AppError> {
    respond(StatusCode::CREATED, serde_json::json!({ "id": id }))
}

pub fn message(text: &str) -> Result<Response, AppError> {
    ok(serde_json::json!({ "message": text }))
}

/// Unwraps a JSON body, turning a rejection into a 422.
pub fn body<T>(request: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    let Json(body) = request?;
    Ok(body)
}

/// `Path` whose rejection renders as the error envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// `Query` whose rejection renders as the error envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Parses a body that may be left out entirely. Only an empty (or all-whitespace) body
/// yields `None`; anything else must be valid JSON for `T` or the request is rejected.
pub fn optional_body<T: DeserializeOwned>(raw: &Bytes) -> Result<Option<T>, AppError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let Json(body) = Json::<T>::from_bytes(raw)?;
    Ok(Some(body))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses an optional `YYYY-MM`; blank or absent means the current month.
pub fn month_or_current(raw: Option<&str>) -> Result<MonthKey, AppError> {
    match raw.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => Ok(m.parse::<MonthKey>()?),
        None => Ok(MonthKey::current()),
    }
}

pub fn required<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::BadRequest(format!("{} is required", field)))
}

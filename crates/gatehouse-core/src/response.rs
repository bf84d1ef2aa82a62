//! JSON envelopes shared by every endpoint.
//!
//! Successful calls answer with [`ApiResponse`], failures with [`ErrorResponse`].
//! Both carry the numeric status code in the body so clients that only look at
//! the payload still see it.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde::Serialize;
use utoipa::ToSchema;

/// Format of [`ErrorResponse::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Error envelope: `{message, error, statusCode, timestamp}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human readable description of the failure
    pub message: String,
    /// HTTP reason phrase, e.g. `Unauthorized`
    pub error: String,
    pub status_code: u16,
    /// Local server time, `yyyy-MM-dd HH:mm:ss`
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            status_code: status.as_u16(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Success envelope: `{message, statusCode, data}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub message: String,
    pub status_code: u16,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            status_code: status.as_u16(),
            data,
        }
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, data)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

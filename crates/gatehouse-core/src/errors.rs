//! Application error type.
//!
//! [`AppError`] pairs an HTTP status with an [`anyhow::Error`] and renders as the
//! shared [`ErrorResponse`] envelope. Anything convertible into `anyhow::Error`
//! turns into a 500 through `?`; use the named constructors for client errors.

use anyhow::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::ErrorResponse;

/// Message sent to clients for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    /// Builds the envelope this error renders as.
    pub fn to_error_response(&self) -> ErrorResponse {
        if self.status.is_server_error() {
            ErrorResponse::new(self.status, INTERNAL_ERROR_MESSAGE)
        } else {
            ErrorResponse::new(self.status, self.error.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }
        self.to_error_response().into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

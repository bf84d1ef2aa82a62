//! Authentication failure taxonomy.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gatehouse_core::ErrorResponse;
use thiserror::Error;

/// Why a presented token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidTokenKind {
    BadSignature,
    Malformed,
    Unsupported,
    Expired,
}

/// Every way authentication can fail.
///
/// The `Display` text is the message clients see. [`AuthError::Internal`]
/// keeps its cause as the error source but never prints it.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is missing or malformed.")]
    HeaderMissing,

    #[error("Malformed JWT token.")]
    Malformed,

    #[error("Invalid JWT token.")]
    BadSignature,

    #[error("Unsupported JWT token.")]
    Unsupported,

    #[error("Expired token. Please log in again.")]
    Expired,

    #[error("Invalid refresh token.")]
    InvalidRefreshToken,

    #[error("Authentication error.")]
    Internal(#[source] anyhow::Error),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::HeaderMissing => StatusCode::BAD_REQUEST,
            AuthError::Malformed
            | AuthError::BadSignature
            | AuthError::Unsupported
            | AuthError::Expired
            | AuthError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine readable name, used in logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::HeaderMissing => "header_missing",
            AuthError::Malformed => "malformed_token",
            AuthError::BadSignature => "bad_signature",
            AuthError::Unsupported => "unsupported_token",
            AuthError::Expired => "token_expired",
            AuthError::InvalidRefreshToken => "invalid_refresh_token",
            AuthError::Internal(_) => "internal_auth_failure",
        }
    }

    /// The token verdict this error stands for, if it is one.
    pub fn invalid_token_kind(&self) -> Option<InvalidTokenKind> {
        match self {
            AuthError::BadSignature => Some(InvalidTokenKind::BadSignature),
            AuthError::Malformed => Some(InvalidTokenKind::Malformed),
            AuthError::Unsupported => Some(InvalidTokenKind::Unsupported),
            AuthError::Expired => Some(InvalidTokenKind::Expired),
            _ => None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        AuthError::Internal(err.into())
    }
}

impl From<InvalidTokenKind> for AuthError {
    fn from(kind: InvalidTokenKind) -> Self {
        match kind {
            InvalidTokenKind::BadSignature => AuthError::BadSignature,
            InvalidTokenKind::Malformed => AuthError::Malformed,
            InvalidTokenKind::Unsupported => AuthError::Unsupported,
            InvalidTokenKind::Expired => AuthError::Expired,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ErrorResponse::new(self.status_code(), self.to_string()).into_response()
    }
}

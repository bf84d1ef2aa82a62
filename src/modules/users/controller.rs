use axum::{extract::State, http::StatusCode};
use gatehouse_core::{ApiResponse, AppError, ErrorResponse};
use gatehouse_models::{
    CheckResponse, SignRequest, SignResponse, SignUpRequest, SignUpResponse,
};

use super::service::UserService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new user
#[utoipa::path(
    post,
    path = "/users/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "User signed up"),
        (status = 400, description = "Unparsable request body", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignUpRequest>,
) -> Result<ApiResponse<SignUpResponse>, AppError> {
    let user = UserService::sign_up(state.users.as_ref(), state.hasher.as_ref(), dto).await?;

    Ok(ApiResponse::new(
        StatusCode::CREATED,
        "Signed up successfully.",
        SignUpResponse::from(&user),
    ))
}

/// Sign in and receive an access and refresh token
///
/// Both tokens come back with the `Bearer ` prefix already applied.
#[utoipa::path(
    get,
    path = "/users/sign",
    request_body = SignRequest,
    responses(
        (status = 200, description = "Signed in"),
        (status = 400, description = "Unknown user or wrong password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn sign(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignRequest>,
) -> Result<ApiResponse<SignResponse>, AppError> {
    let pair = UserService::sign_in(
        state.users.as_ref(),
        state.hasher.as_ref(),
        &state.issuer,
        dto,
    )
    .await?;

    Ok(ApiResponse::ok(
        "Signed in successfully.",
        SignResponse {
            access_token: pair.access.bearer(),
            refresh_token: pair.refresh.bearer(),
        },
    ))
}

/// Report who the caller is signed in as
#[utoipa::path(
    get,
    path = "/check",
    responses(
        (status = 200, description = "Caller is signed in"),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
pub async fn check(auth_user: AuthUser) -> ApiResponse<CheckResponse> {
    ApiResponse::ok("Sign-in check", UserService::check(&auth_user))
}

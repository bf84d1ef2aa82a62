use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{check, sign, sign_up};
use crate::state::AppState;

/// Routes mounted under `/users`.
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/sign", get(sign))
}

pub fn init_check_router() -> Router<AppState> {
    Router::new().route("/check", get(check))
}

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use chrono::{DateTime, Utc};
use gatehouse::gatehouse_auth::{Identity, IssuedToken, TokenIssuer, TokenKind};
use gatehouse::gatehouse_config::{CorsConfig, JwtConfig};
use gatehouse::gatehouse_core::{BcryptHasher, UserRole};
use gatehouse::modules::users::store::InMemoryUserStore;
use gatehouse::router::init_router;
use gatehouse::state::AppState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-with-32-plus-bytes";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: 300,
        refresh_token_expiry: 86_400,
    }
}

pub fn test_state() -> AppState {
    AppState::new(
        test_jwt_config(),
        CorsConfig::default(),
        Arc::new(InMemoryUserStore::new()),
        Arc::new(BcryptHasher::new(4)),
    )
}

pub fn setup_test_app() -> Router {
    init_router(test_state())
}

pub fn test_issuer() -> TokenIssuer {
    TokenIssuer::from_config(&test_jwt_config())
}

/// An access token signed with the test secret as of `issued_at`.
#[allow(dead_code)]
pub fn access_token_issued_at(subject: &str, issued_at: DateTime<Utc>) -> IssuedToken {
    test_issuer()
        .issue_at(
            &Identity::new(subject, UserRole::User),
            TokenKind::Access,
            issued_at,
        )
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn authorized_request(method: &str, uri: &str, authorization: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn sign_up(app: &Router, username: &str, password: &str) -> Response<Body> {
    app.clone()
        .oneshot(json_request(
            "POST",
            "/users/signup",
            json!({ "username": username, "password": password, "nickname": "tester" }),
        ))
        .await
        .unwrap()
}

/// Signs in and returns the `data` object of the envelope.
#[allow(dead_code)]
pub async fn sign_in(app: &Router, username: &str, password: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/users/sign",
            json!({ "username": username, "password": password }),
        ))
        .await
        .unwrap();
    body_json(response).await["data"].clone()
}

use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, Method, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use gatehouse_auth::{AuthError, BEARER_PREFIX, Identity, TokenValidator, ValidationResult};
use gatehouse_config::JwtConfig;
use gatehouse_core::{AppError, UserRole};
use tracing::{debug, error, warn};

use crate::state::AppState;

/// A method and exact path that never requires a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicRoute {
    pub method: Method,
    pub path: String,
}

impl PublicRoute {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method == *method && self.path == path
    }
}

/// Sign-up and sign-in.
pub fn default_public_routes() -> Vec<PublicRoute> {
    vec![
        PublicRoute::new(Method::POST, "/users/signup"),
        PublicRoute::new(Method::GET, "/users/sign"),
    ]
}

/// What the mediator decided for one request.
#[derive(Debug)]
pub enum AuthenticationOutcome {
    /// Passed through without any identity.
    Bypassed,
    Authenticated(Identity),
    Rejected(AuthError),
}

/// Decides, per request, whether to bypass, authenticate or reject.
///
/// Holds no per-request state; the identity it produces is attached to the
/// request's own extensions by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthenticationMediator {
    validator: TokenValidator,
    public_routes: Arc<[PublicRoute]>,
}

impl AuthenticationMediator {
    pub fn new(validator: TokenValidator, public_routes: Vec<PublicRoute>) -> Self {
        Self {
            validator,
            public_routes: public_routes.into(),
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(TokenValidator::from_config(config), default_public_routes())
    }

    pub fn public_routes(&self) -> &[PublicRoute] {
        &self.public_routes
    }

    /// True for allow-listed routes and for any GET without an
    /// `Authorization` header.
    pub fn is_bypassed(&self, method: &Method, path: &str, headers: &HeaderMap) -> bool {
        if self.public_routes.iter().any(|r| r.matches(method, path)) {
            return true;
        }
        *method == Method::GET && !headers.contains_key(header::AUTHORIZATION)
    }

    pub fn authorize(&self, method: &Method, path: &str, headers: &HeaderMap) -> AuthenticationOutcome {
        if self.is_bypassed(method, path, headers) {
            return AuthenticationOutcome::Bypassed;
        }

        let token = match extract_bearer_token(headers) {
            Ok(token) => token,
            Err(err) => return AuthenticationOutcome::Rejected(err),
        };

        match self.validator.validate(token) {
            Ok(ValidationResult::Valid(claims)) => {
                AuthenticationOutcome::Authenticated(claims.into_identity())
            }
            Ok(ValidationResult::Invalid(kind)) => AuthenticationOutcome::Rejected(kind.into()),
            Err(err) => AuthenticationOutcome::Rejected(err),
        }
    }
}

/// Returns the token after `Bearer `, or [`AuthError::HeaderMissing`].
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthError::HeaderMissing)
}

/// Middleware running the [`AuthenticationMediator`] in front of every route.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let outcome = state
        .mediator
        .authorize(req.method(), req.uri().path(), req.headers());

    match outcome {
        AuthenticationOutcome::Bypassed => next.run(req).await,
        AuthenticationOutcome::Authenticated(identity) => {
            debug!(subject = %identity.subject, role = %identity.role, "Request authenticated");
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        AuthenticationOutcome::Rejected(err) => {
            match &err {
                AuthError::Internal(source) => error!(
                    method = %req.method(),
                    path = %req.uri().path(),
                    error = ?source,
                    "Authentication failed unexpectedly"
                ),
                _ => warn!(
                    method = %req.method(),
                    path = %req.uri().path(),
                    code = err.error_code(),
                    "Authentication rejected"
                ),
            }
            err.into_response()
        }
    }
}

/// Extractor for the identity established by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn subject(&self) -> &str {
        &self.0.subject
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.0.role == role
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized(anyhow!("Authentication required.")))
    }
}

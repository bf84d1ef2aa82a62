//! # Gatehouse API
//!
//! A stateless bearer-token authentication service built with Rust and Axum.
//!
//! ## Overview
//!
//! Users sign up with a username and password, sign in to receive a signed
//! access token and a longer-lived refresh token, and present the access token
//! as `Authorization: Bearer <token>` on every protected request. No session
//! state is kept on the server; the token alone carries subject and role.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── gatehouse-core/     # AppError, response envelopes, roles, password hashing
//! ├── gatehouse-config/   # JWT, server and CORS configuration
//! ├── gatehouse-auth/     # token codec, issuer, validator, failure taxonomy
//! └── gatehouse-models/   # user record and request/response DTOs
//! src/
//! ├── middleware/         # authentication mediator and AuthUser extractor
//! ├── modules/users/      # controller, service, router, in-memory store
//! ├── docs.rs             # OpenAPI document
//! ├── logging.rs          # request logging and subscriber setup
//! ├── router.rs           # application router
//! ├── state.rs            # shared application state
//! └── validator.rs        # ValidatedJson extractor
//! ```
//!
//! ## Authentication
//!
//! | Situation | Result |
//! |-----------|--------|
//! | `POST /users/signup`, `GET /users/sign` | bypassed |
//! | `GET` without `Authorization` | bypassed |
//! | header missing or not `Bearer ` | 400 |
//! | bad signature, malformed, unsupported | 401 |
//! | expired | 401, asks the caller to log in again |
//! | anything unexpected | 500 |
//!
//! ## Quick Start
//!
//! ```bash
//! JWT_SECRET=at-least-32-bytes-of-random-secret-material
//! JWT_ACCESS_EXPIRY=3600
//! JWT_REFRESH_EXPIRY=1209600
//! ```
//!
//! Swagger UI is served at `/swagger-ui`.

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use gatehouse_auth;
pub use gatehouse_config;
pub use gatehouse_core;
pub use gatehouse_models;

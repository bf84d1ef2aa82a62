//! Request authentication.
//!
//! [`auth::authenticate`] runs in front of every route and either bypasses,
//! authenticates or rejects the request:
//!
//! 1. `POST /users/signup` and `GET /users/sign` always pass
//! 2. A `GET` with no `Authorization` header passes unauthenticated
//! 3. Otherwise the header must read `Bearer <token>` and the token must validate
//!
//! Handlers that need a caller take the [`auth::AuthUser`] extractor, which
//! rejects with 401 when no identity was established.
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn whoami(auth_user: AuthUser) -> String {
//!     auth_user.subject().to_string()
//! }
//! ```

pub mod auth;

//! # Gatehouse Auth
//!
//! Stateless bearer-token authentication for the Gatehouse API.
//!
//! This crate provides:
//!
//! - [`claims`]: identity and token claim structures, wire and in-memory
//! - [`codec`]: HS256 signing and parsing of compact tokens
//! - [`validator`]: signature, structure and expiry checks with a typed verdict
//! - [`issuer`]: access/refresh token issuance and refresh renewal
//! - [`error`]: the authentication failure taxonomy
//!
//! Nothing in this crate performs I/O or logs; callers decide how a failure is
//! reported.
//!
//! # Token Types
//!
//! Access and refresh tokens share one wire format and differ only in lifetime:
//!
//! - **Access Token**: short-lived, presented on every protected request
//! - **Refresh Token**: long-lived, exchanged for a fresh access token
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_auth::{Identity, TokenIssuer, TokenValidator, ValidationResult};
//! use gatehouse_config::JwtConfig;
//! use gatehouse_core::UserRole;
//!
//! let config = JwtConfig::from_env();
//! let issuer = TokenIssuer::from_config(&config);
//! let validator = TokenValidator::from_config(&config);
//!
//! let access = issuer.issue_access_token(&Identity::new("alice", UserRole::User))?;
//! let verdict = validator.validate(&access.token)?;
//! assert_eq!(verdict.extract_subject(), "alice");
//! ```

pub mod claims;
pub mod codec;
pub mod error;
pub mod issuer;
pub mod validator;

// Re-export commonly used types at crate root
pub use claims::{BEARER_PREFIX, Claims, Identity, IssuedToken, TokenClaims, TokenKind, TokenPair};
pub use codec::TokenCodec;
pub use error::{AuthError, InvalidTokenKind};
pub use issuer::TokenIssuer;
pub use validator::{TokenValidator, ValidationResult};

//! # Gatehouse Core
//!
//! Core types, errors, and utilities for the Gatehouse API.
//!
//! This crate provides foundational types used throughout the Gatehouse application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: The JSON envelopes every endpoint answers with
//! - [`roles`]: The user role table and its granted authorities
//! - [`password`]: Password hashing behind the [`PasswordHasher`] trait
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_core::{AppError, ApiResponse, BcryptHasher, PasswordHasher};
//!
//! let hasher = BcryptHasher::default();
//! let hash = hasher.hash("secure_password")?;
//!
//! if !hasher.verify("secure_password", &hash)? {
//!     return Err(AppError::bad_request(anyhow::anyhow!("Password does not match.")));
//! }
//! ```

pub mod errors;
pub mod password;
pub mod response;
pub mod roles;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{BcryptHasher, PasswordHasher};
pub use response::{ApiResponse, ErrorResponse};
pub use roles::UserRole;

//! # Gatehouse Config
//!
//! Configuration types for the Gatehouse API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: Token signing secret and expiry configuration
//! - [`server`]: Listen address
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! All configuration is read once at startup and never mutated afterwards.
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! jwt_config.validate()?;
//! let server_config = ServerConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;

use thiserror::Error;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be at least {min} bytes long (got {actual})")]
    SecretTooShort { min: usize, actual: usize },

    #[error("{name} must be a positive number of seconds")]
    NonPositiveExpiry { name: &'static str },

    #[error(
        "JWT_REFRESH_EXPIRY ({refresh}s) must be longer than JWT_ACCESS_EXPIRY ({access}s)"
    )]
    RefreshNotLongerThanAccess { access: i64, refresh: i64 },
}

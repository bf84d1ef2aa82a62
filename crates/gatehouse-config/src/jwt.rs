use std::env;

use crate::ConfigError;

/// HS256 keys shorter than the hash output weaken the MAC.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            refresh_token_expiry: env::var("JWT_REFRESH_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1_209_600), // 2 weeks
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LEN,
                actual: self.secret.len(),
            });
        }
        if self.access_token_expiry <= 0 {
            return Err(ConfigError::NonPositiveExpiry {
                name: "JWT_ACCESS_EXPIRY",
            });
        }
        if self.refresh_token_expiry <= 0 {
            return Err(ConfigError::NonPositiveExpiry {
                name: "JWT_REFRESH_EXPIRY",
            });
        }
        if self.refresh_token_expiry <= self.access_token_expiry {
            return Err(ConfigError::RefreshNotLongerThanAccess {
                access: self.access_token_expiry,
                refresh: self.refresh_token_expiry,
            });
        }
        Ok(())
    }
}

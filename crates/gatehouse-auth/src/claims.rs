//! Identity and token claim structures.
//!
//! - [`Claims`]: the payload exactly as it is signed and sent on the wire
//! - [`TokenClaims`]: the same payload with typed timestamps, used everywhere else
//! - [`Identity`]: who a token speaks for; also the per-request identity context
//! - [`IssuedToken`] / [`TokenPair`]: what the issuer hands back

use chrono::{DateTime, Utc};
use gatehouse_core::UserRole;
use serde::{Deserialize, Serialize};

/// Scheme prefix of the `Authorization` header and of tokens handed out at sign-in.
pub const BEARER_PREFIX: &str = "Bearer ";

/// An authenticated principal: a unique username and the role it was issued with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub subject: String,
    pub role: UserRole,
}

impl Identity {
    pub fn new(subject: impl Into<String>, role: UserRole) -> Self {
        Self {
            subject: subject.into(),
            role,
        }
    }
}

/// Token payload as serialized inside the signed token.
///
/// # Fields
///
/// - `sub`: username (subject)
/// - `auth`: role name, e.g. `USER`
/// - `iat`: issued-at, seconds since the Unix epoch
/// - `exp`: expiry, seconds since the Unix epoch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub auth: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Decoded token payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub subject: String,
    pub role: UserRole,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TokenClaims {
    pub fn identity(&self) -> Identity {
        Identity::new(self.subject.clone(), self.role)
    }

    pub fn into_identity(self) -> Identity {
        Identity {
            subject: self.subject,
            role: self.role,
        }
    }

    /// True once `now` is past the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

impl From<&TokenClaims> for Claims {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            sub: claims.subject.clone(),
            auth: claims.role,
            iat: claims.issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
        }
    }
}

/// A wire timestamp outside the range `chrono` can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampOutOfRange(pub i64);

impl TryFrom<Claims> for TokenClaims {
    type Error = TimestampOutOfRange;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let issued_at =
            DateTime::from_timestamp(claims.iat, 0).ok_or(TimestampOutOfRange(claims.iat))?;
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or(TimestampOutOfRange(claims.exp))?;

        Ok(Self {
            subject: claims.sub,
            role: claims.auth,
            issued_at,
            expires_at,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub kind: TokenKind,
    /// Compact `header.payload.signature` form, without scheme prefix
    pub token: String,
    pub claims: TokenClaims,
}

impl IssuedToken {
    /// The token prefixed with `Bearer `, as sent to clients.
    pub fn bearer(&self) -> String {
        format!("{}{}", BEARER_PREFIX, self.token)
    }
}

/// Access and refresh token issued together at sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

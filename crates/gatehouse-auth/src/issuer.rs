//! Access and refresh token issuance.
//!
//! Both kinds share the wire format; they differ only in lifetime. Issued
//! tokens are not recorded anywhere.

use anyhow::anyhow;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use gatehouse_config::JwtConfig;
use gatehouse_core::UserRole;

use crate::claims::{BEARER_PREFIX, Identity, IssuedToken, TokenClaims, TokenKind, TokenPair};
use crate::codec::TokenCodec;
use crate::error::AuthError;
use crate::validator::{TokenValidator, ValidationResult};

#[derive(Debug, Clone)]
pub struct TokenIssuer {
    codec: TokenCodec,
    validator: TokenValidator,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(codec: TokenCodec, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            validator: TokenValidator::new(codec.clone()),
            codec,
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            TokenCodec::from_config(config),
            Duration::seconds(config.access_token_expiry),
            Duration::seconds(config.refresh_token_expiry),
        )
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Issues a short-lived access token for `identity`.
    pub fn issue_access_token(&self, identity: &Identity) -> Result<IssuedToken, AuthError> {
        self.issue_at(identity, TokenKind::Access, Utc::now())
    }

    /// Issues a long-lived refresh token for `identity`.
    pub fn issue_refresh_token(&self, identity: &Identity) -> Result<IssuedToken, AuthError> {
        self.issue_at(identity, TokenKind::Refresh, Utc::now())
    }

    /// Issues an access and a refresh token sharing one issue instant.
    pub fn issue_pair(&self, identity: &Identity) -> Result<TokenPair, AuthError> {
        let now = Utc::now();
        Ok(TokenPair {
            access: self.issue_at(identity, TokenKind::Access, now)?,
            refresh: self.issue_at(identity, TokenKind::Refresh, now)?,
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// `refresh_token` may carry the `Bearer ` prefix it was handed out with.
    /// The new token is issued for the refresh token's subject and role;
    /// `claimed_role` must match the role the refresh token was issued with.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidRefreshToken`] for any token the validator rejects
    /// or a role mismatch. [`AuthError::Internal`] if signing fails.
    pub fn renew_access_from_refresh(
        &self,
        refresh_token: &str,
        claimed_role: UserRole,
    ) -> Result<IssuedToken, AuthError> {
        let raw = refresh_token
            .strip_prefix(BEARER_PREFIX)
            .unwrap_or(refresh_token);

        let claims = match self.validator.validate(raw)? {
            ValidationResult::Valid(claims) => claims,
            ValidationResult::Invalid(_) => return Err(AuthError::InvalidRefreshToken),
        };

        if claims.role != claimed_role {
            return Err(AuthError::InvalidRefreshToken);
        }

        self.issue_access_token(&claims.into_identity())
    }

    /// Issues a token of `kind` as if the current time were `now`.
    pub fn issue_at(
        &self,
        identity: &Identity,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        // The wire carries whole seconds.
        let issued_at = now.trunc_subsecs(0);
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::internal(anyhow!("token expiry out of range")))?;

        let claims = TokenClaims {
            subject: identity.subject.clone(),
            role: identity.role,
            issued_at,
            expires_at,
        };
        let token = self.codec.encode(&claims)?;

        Ok(IssuedToken {
            kind,
            token,
            claims,
        })
    }
}

//! Token verification with a typed verdict.
//!
//! [`TokenValidator::validate`] answers with [`ValidationResult`] for every
//! token a client could send; `Err` is reserved for failures of the
//! validator itself.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. signature and structure ([`InvalidTokenKind::BadSignature`],
//!    [`InvalidTokenKind::Malformed`], [`InvalidTokenKind::Unsupported`])
//! 2. expiry ([`InvalidTokenKind::Expired`])
//! 3. issue time not after the validation instant ([`InvalidTokenKind::Malformed`])
//!
//! A forged token therefore never reports `Expired`, whatever its `exp` says.

use chrono::{DateTime, Utc};
use gatehouse_config::JwtConfig;
use gatehouse_core::UserRole;

use crate::claims::TokenClaims;
use crate::codec::TokenCodec;
use crate::error::{AuthError, InvalidTokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(TokenClaims),
    Invalid(InvalidTokenKind),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub fn claims(&self) -> Option<&TokenClaims> {
        match self {
            ValidationResult::Valid(claims) => Some(claims),
            ValidationResult::Invalid(_) => None,
        }
    }

    /// Subject of a valid token.
    ///
    /// # Panics
    ///
    /// When called on [`ValidationResult::Invalid`]; check validity first.
    pub fn extract_subject(&self) -> &str {
        match self {
            ValidationResult::Valid(claims) => &claims.subject,
            ValidationResult::Invalid(kind) => {
                panic!("extract_subject called on an invalid token ({kind:?})")
            }
        }
    }

    /// Role of a valid token.
    ///
    /// # Panics
    ///
    /// When called on [`ValidationResult::Invalid`]; check validity first.
    pub fn extract_role(&self) -> UserRole {
        match self {
            ValidationResult::Valid(claims) => claims.role,
            ValidationResult::Invalid(kind) => {
                panic!("extract_role called on an invalid token ({kind:?})")
            }
        }
    }

    pub fn into_result(self) -> Result<TokenClaims, InvalidTokenKind> {
        match self {
            ValidationResult::Valid(claims) => Ok(claims),
            ValidationResult::Invalid(kind) => Err(kind),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenValidator {
    codec: TokenCodec,
}

impl TokenValidator {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(TokenCodec::from_config(config))
    }

    /// Validates a raw token (no `Bearer ` prefix) against the current time.
    pub fn validate(&self, token: &str) -> Result<ValidationResult, AuthError> {
        self.validate_at(token, Utc::now())
    }

    /// Validates a raw token as of `now`.
    pub fn validate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<ValidationResult, AuthError> {
        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(err) => {
                return match err.invalid_token_kind() {
                    Some(kind) => Ok(ValidationResult::Invalid(kind)),
                    None => Err(err),
                };
            }
        };

        if claims.is_expired_at(now) {
            return Ok(ValidationResult::Invalid(InvalidTokenKind::Expired));
        }

        // Accepted only while issued_at <= now <= expires_at.
        if claims.issued_at > now {
            return Ok(ValidationResult::Invalid(InvalidTokenKind::Malformed));
        }

        Ok(ValidationResult::Valid(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-at-least-32-characters-long";

    fn validator() -> TokenValidator {
        TokenValidator::new(TokenCodec::new(SECRET))
    }

    fn token(issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> String {
        TokenCodec::new(SECRET)
            .encode(&TokenClaims {
                subject: "testUser".to_string(),
                role: UserRole::User,
                issued_at,
                expires_at,
            })
            .unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_valid_token() {
        let result = validator()
            .validate_at(&token(at(1000), at(2000)), at(1500))
            .unwrap();
        assert!(result.is_valid());
        assert_eq!(result.extract_subject(), "testUser");
        assert_eq!(result.extract_role(), UserRole::User);
    }

    #[test]
    fn test_expired_token() {
        let result = validator()
            .validate_at(&token(at(1000), at(2000)), at(2001))
            .unwrap();
        assert_eq!(result, ValidationResult::Invalid(InvalidTokenKind::Expired));
    }

    #[test]
    fn test_expiry_instant_is_still_valid() {
        let result = validator()
            .validate_at(&token(at(1000), at(2000)), at(2000))
            .unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn test_forged_expired_token_reports_bad_signature() {
        let forged = TokenCodec::new(b"attacker-secret-attacker-secret-attacker")
            .encode(&TokenClaims {
                subject: "testUser".to_string(),
                role: UserRole::Admin,
                issued_at: at(1000),
                expires_at: at(2000),
            })
            .unwrap();
        let result = validator().validate_at(&forged, at(5000)).unwrap();
        assert_eq!(
            result,
            ValidationResult::Invalid(InvalidTokenKind::BadSignature)
        );
    }

    #[test]
    fn test_issued_in_future_is_malformed() {
        let result = validator()
            .validate_at(&token(at(5000), at(9000)), at(1000))
            .unwrap();
        assert_eq!(
            result,
            ValidationResult::Invalid(InvalidTokenKind::Malformed)
        );
    }

    #[test]
    fn test_issue_instant_boundary() {
        let token = token(at(1000), at(9000));

        assert!(validator().validate_at(&token, at(1000)).unwrap().is_valid());
        assert_eq!(
            validator().validate_at(&token, at(999)).unwrap(),
            ValidationResult::Invalid(InvalidTokenKind::Malformed)
        );
    }

    #[test]
    fn test_tampered_signature_of_expired_token_is_bad_signature() {
        let genuine = token(at(1000), at(2000));
        let (head, signature) = genuine.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{head}.{}", chars.into_iter().collect::<String>());

        let result = validator().validate_at(&tampered, at(5000)).unwrap();
        assert_eq!(
            result,
            ValidationResult::Invalid(InvalidTokenKind::BadSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let result = validator().validate("invalidToken").unwrap();
        assert_eq!(
            result,
            ValidationResult::Invalid(InvalidTokenKind::Malformed)
        );
    }

    #[test]
    #[should_panic(expected = "extract_subject called on an invalid token")]
    fn test_extract_subject_on_invalid_panics() {
        ValidationResult::Invalid(InvalidTokenKind::Expired).extract_subject();
    }

    #[test]
    #[should_panic(expected = "extract_role called on an invalid token")]
    fn test_extract_role_on_invalid_panics() {
        ValidationResult::Invalid(InvalidTokenKind::BadSignature).extract_role();
    }

    #[test]
    fn test_into_result() {
        assert_eq!(
            ValidationResult::Invalid(InvalidTokenKind::Unsupported).into_result(),
            Err(InvalidTokenKind::Unsupported)
        );
    }
}

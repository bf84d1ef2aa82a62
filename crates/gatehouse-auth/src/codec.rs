//! Signing and parsing of compact tokens.
//!
//! Tokens are HS256 JWTs: `base64url(header).base64url(payload).base64url(signature)`
//! with a [`Claims`] payload. The codec only proves a token was signed with the
//! process secret and reveals its claims; deciding whether those claims are
//! still acceptable (expiry, issue time) is [`TokenValidator`]'s job.
//!
//! [`TokenValidator`]: crate::validator::TokenValidator

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use gatehouse_config::JwtConfig;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Deserialize;

use crate::claims::{Claims, TokenClaims};
use crate::error::AuthError;

/// The only signature scheme tokens are issued with or accepted in.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Time-based checks belong to the validator.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(config.secret.as_bytes())
    }

    /// Signs `claims`. The output is deterministic for a given secret and claims.
    ///
    /// # Errors
    ///
    /// Only [`AuthError::Internal`]; encoding HMAC tokens has no expected failure.
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        encode(&Header::new(ALGORITHM), &Claims::from(claims), &self.encoding_key)
            .map_err(AuthError::internal)
    }

    /// Verifies the signature of `token` and returns its claims.
    ///
    /// Expiry is not checked.
    ///
    /// # Errors
    ///
    /// - [`AuthError::BadSignature`] when the signature does not match the secret
    /// - [`AuthError::Malformed`] when the token is not three base64url JSON parts
    ///   or its payload lacks a required claim
    /// - [`AuthError::Unsupported`] when the header names another algorithm,
    ///   including `none`, or the signature segment is empty
    /// - [`AuthError::Internal`] for anything else the JWT library reports
    pub fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| classify(token, err))?;

        TokenClaims::try_from(data.claims).map_err(|_| AuthError::Malformed)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}

fn classify(token: &str, err: JwtError) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature => AuthError::BadSignature,
        ErrorKind::Base64(_) | ErrorKind::Json(_) if names_unsupported_scheme(token) => {
            AuthError::Unsupported
        }
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::ImmatureSignature => AuthError::Malformed,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => AuthError::Unsupported,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::internal(err),
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// True for a three-part token whose header is readable JSON but either names
/// an algorithm the library does not parse (such as `none`) or comes without
/// a signature.
fn names_unsupported_scheme(token: &str) -> bool {
    let mut parts = token.split('.');
    let (Some(header), Some(_payload), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    let Ok(bytes) = URL_SAFE_NO_PAD.decode(header) else {
        return false;
    };
    let Ok(raw) = serde_json::from_slice::<RawHeader>(&bytes) else {
        return false;
    };

    raw.alg != "HS256" || signature.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use gatehouse_core::UserRole;

    const SECRET: &[u8] = b"secretKeysecretKeysecretKeysecretKey";

    fn claims(subject: &str, role: UserRole) -> TokenClaims {
        TokenClaims {
            subject: subject.to_string(),
            role,
            issued_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            expires_at: DateTime::from_timestamp(1_700_000_060, 0).unwrap(),
        }
    }

    #[test]
    fn test_encode_decode_recovers_claims() {
        let codec = TokenCodec::new(SECRET);
        for role in UserRole::ALL {
            let original = claims("testUser", role);
            let token = codec.encode(&original).unwrap();
            assert_eq!(token.split('.').count(), 3);
            assert_eq!(codec.decode(&token).unwrap(), original);
        }
    }

    #[test]
    fn test_encode_is_deterministic() {
        let codec = TokenCodec::new(SECRET);
        let c = claims("alice", UserRole::Admin);
        assert_eq!(codec.encode(&c).unwrap(), codec.encode(&c).unwrap());
    }

    #[test]
    fn test_decode_does_not_judge_expiry() {
        // exp lies far in the past relative to any test run.
        let codec = TokenCodec::new(SECRET);
        let token = codec.encode(&claims("old", UserRole::User)).unwrap();
        assert!(codec.decode(&token).is_ok());
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let token = TokenCodec::new(SECRET)
            .encode(&claims("alice", UserRole::User))
            .unwrap();
        let other = TokenCodec::new(b"another-secret-another-secret-another");
        assert!(matches!(other.decode(&token), Err(AuthError::BadSignature)));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = TokenCodec::new(SECRET);
        for garbage in ["", "invalidToken", "a.b", "invalid.token.here", "@@@.@@@.@@@"] {
            assert!(
                matches!(codec.decode(garbage), Err(AuthError::Malformed)),
                "{garbage:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_other_algorithm_is_unsupported() {
        let c = claims("alice", UserRole::User);
        let token = encode(
            &Header::new(Algorithm::HS512),
            &Claims::from(&c),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        let codec = TokenCodec::new(SECRET);
        assert!(matches!(codec.decode(&token), Err(AuthError::Unsupported)));
    }

    fn unsigned_token(alg: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(format!(r#"{{"alg":"{alg}","typ":"JWT"}}"#));
        let payload = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&Claims::from(&claims("mallory", UserRole::Admin))).unwrap(),
        );
        format!("{header}.{payload}.")
    }

    #[test]
    fn test_alg_none_is_unsupported() {
        let codec = TokenCodec::new(SECRET);
        assert!(matches!(
            codec.decode(&unsigned_token("none")),
            Err(AuthError::Unsupported)
        ));
    }

    #[test]
    fn test_unknown_algorithm_name_is_unsupported() {
        let codec = TokenCodec::new(SECRET);
        assert!(matches!(
            codec.decode(&unsigned_token("XS999")),
            Err(AuthError::Unsupported)
        ));
    }

    #[test]
    fn test_tampered_signature_is_bad_signature() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.encode(&claims("alice", UserRole::User)).unwrap();
        let last = token.chars().last().unwrap();
        let replacement = if last == 'A' { 'E' } else { 'A' };
        let tampered = format!("{}{replacement}", &token[..token.len() - 1]);

        assert!(matches!(codec.decode(&tampered), Err(AuthError::BadSignature)));
    }

    #[test]
    fn test_unknown_role_is_malformed() {
        #[derive(serde::Serialize)]
        struct Foreign {
            sub: &'static str,
            auth: &'static str,
            iat: i64,
            exp: i64,
        }
        let token = encode(
            &Header::new(ALGORITHM),
            &Foreign {
                sub: "mallory",
                auth: "ROOT",
                iat: 1_700_000_000,
                exp: 1_700_000_060,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        let codec = TokenCodec::new(SECRET);
        assert!(matches!(codec.decode(&token), Err(AuthError::Malformed)));
    }

    #[test]
    fn test_debug_hides_keys() {
        let rendered = format!("{:?}", TokenCodec::new(SECRET));
        assert!(rendered.contains("HS256"));
        assert!(!rendered.contains("secretKey"));
    }
}

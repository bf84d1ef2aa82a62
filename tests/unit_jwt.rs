use chrono::{Duration, Utc};
use gatehouse::gatehouse_auth::{
    AuthError, Identity, InvalidTokenKind, TokenIssuer, TokenKind, TokenValidator,
    ValidationResult,
};
use gatehouse::gatehouse_config::JwtConfig;
use gatehouse::gatehouse_core::UserRole;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 1_209_600,
    }
}

#[test]
fn test_issue_then_validate_every_role() {
    let config = get_test_jwt_config();
    let issuer = TokenIssuer::from_config(&config);
    let validator = TokenValidator::from_config(&config);

    for role in UserRole::ALL {
        let token = issuer
            .issue_access_token(&Identity::new("testUser", role))
            .unwrap();
        let verdict = validator.validate(&token.token).unwrap();

        assert!(verdict.is_valid());
        assert_eq!(verdict.extract_subject(), "testUser");
        assert_eq!(verdict.extract_role(), role);
    }
}

#[test]
fn test_refresh_outlives_access() {
    let issuer = TokenIssuer::from_config(&get_test_jwt_config());
    let pair = issuer
        .issue_pair(&Identity::new("testUser", UserRole::User))
        .unwrap();

    assert_eq!(pair.access.claims.issued_at, pair.refresh.claims.issued_at);
    assert_eq!(
        pair.refresh.claims.expires_at - pair.access.claims.expires_at,
        Duration::seconds(1_209_600 - 3600)
    );
}

#[test]
fn test_renew_from_bearer_prefixed_refresh_token() {
    let issuer = TokenIssuer::from_config(&get_test_jwt_config());
    let pair = issuer
        .issue_pair(&Identity::new("testUser", UserRole::Admin))
        .unwrap();

    let renewed = issuer
        .renew_access_from_refresh(&pair.refresh.bearer(), UserRole::Admin)
        .unwrap();

    assert_eq!(renewed.kind, TokenKind::Access);
    assert_eq!(renewed.claims.subject, "testUser");
    assert_eq!(renewed.claims.role, UserRole::Admin);
}

#[test]
fn test_renew_rejects_role_mismatch() {
    let issuer = TokenIssuer::from_config(&get_test_jwt_config());
    let pair = issuer
        .issue_pair(&Identity::new("testUser", UserRole::User))
        .unwrap();

    let err = issuer
        .renew_access_from_refresh(&pair.refresh.token, UserRole::Admin)
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidRefreshToken));
}

#[test]
fn test_renew_rejects_expired_refresh_token() {
    let issuer = TokenIssuer::from_config(&get_test_jwt_config());
    let stale = issuer
        .issue_at(
            &Identity::new("testUser", UserRole::User),
            TokenKind::Refresh,
            Utc::now() - Duration::days(30),
        )
        .unwrap();

    let err = issuer
        .renew_access_from_refresh(&stale.token, UserRole::User)
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidRefreshToken));
}

#[test]
fn test_token_from_other_secret_is_bad_signature() {
    let issuer = TokenIssuer::from_config(&get_test_jwt_config());
    let token = issuer
        .issue_access_token(&Identity::new("testUser", UserRole::User))
        .unwrap();

    let other = TokenValidator::from_config(&JwtConfig {
        secret: "another_secret_key_for_testing_only".to_string(),
        ..get_test_jwt_config()
    });

    assert_eq!(
        other.validate(&token.token).unwrap(),
        ValidationResult::Invalid(InvalidTokenKind::BadSignature)
    );
}

#[test]
fn test_expired_token_is_expired() {
    let issuer = TokenIssuer::from_config(&get_test_jwt_config());
    let validator = TokenValidator::from_config(&get_test_jwt_config());
    let token = issuer
        .issue_at(
            &Identity::new("testUser", UserRole::User),
            TokenKind::Access,
            Utc::now() - Duration::hours(2),
        )
        .unwrap();

    assert_eq!(
        validator.validate(&token.token).unwrap(),
        ValidationResult::Invalid(InvalidTokenKind::Expired)
    );
}

#[test]
fn test_tampered_signature_outranks_expiry() {
    let issuer = TokenIssuer::from_config(&get_test_jwt_config());
    let validator = TokenValidator::from_config(&get_test_jwt_config());
    let expired = issuer
        .issue_at(
            &Identity::new("testUser", UserRole::User),
            TokenKind::Access,
            Utc::now() - Duration::hours(2),
        )
        .unwrap();

    let (signed_part, signature) = expired.token.rsplit_once('.').unwrap();
    let first = signature.chars().next().unwrap();
    let replacement = if first == 'A' { 'B' } else { 'A' };
    let tampered = format!("{signed_part}.{replacement}{}", &signature[1..]);

    assert_eq!(
        validator.validate(&tampered).unwrap(),
        ValidationResult::Invalid(InvalidTokenKind::BadSignature)
    );
}

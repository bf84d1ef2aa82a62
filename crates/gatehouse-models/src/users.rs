//! User domain models and DTOs.

use gatehouse_core::UserRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A registered user as held by the user store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub nickname: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
}

/// Everything needed to create a [`User`]; the password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub nickname: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
}

impl From<NewUser> for User {
    fn from(new: NewUser) -> Self {
        Self {
            username: new.username,
            nickname: new.nickname,
            password_hash: new.password_hash,
            role: new.role,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 64, message = "username must be 1 to 64 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(length(max = 64, message = "nickname must be at most 64 characters"))]
    pub nickname: Option<String>,
}

/// One granted authority, e.g. `ROLE_USER`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthorityDto {
    pub authority: String,
}

impl From<UserRole> for AuthorityDto {
    fn from(role: UserRole) -> Self {
        Self {
            authority: role.authority().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignUpResponse {
    pub username: String,
    pub nickname: Option<String>,
    pub authorities: Vec<AuthorityDto>,
}

impl From<&User> for SignUpResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            nickname: user.nickname.clone(),
            authorities: vec![AuthorityDto::from(user.role)],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Tokens handed out at sign-in, each prefixed with `Bearer `.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CheckResponse {
    pub check: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_response_lists_authority() {
        let user = User {
            username: "testUser".to_string(),
            nickname: Some("tester".to_string()),
            password_hash: "$2b$04$hash".to_string(),
            role: UserRole::User,
        };
        let json = serde_json::to_value(SignUpResponse::from(&user)).unwrap();
        assert_eq!(json["username"], "testUser");
        assert_eq!(json["authorities"][0]["authority"], "ROLE_USER");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_sign_response_is_camel_case() {
        let json = serde_json::to_value(SignResponse {
            access_token: "Bearer a".to_string(),
            refresh_token: "Bearer r".to_string(),
        })
        .unwrap();
        assert_eq!(json["accessToken"], "Bearer a");
        assert_eq!(json["refreshToken"], "Bearer r");
    }

    #[test]
    fn test_sign_up_request_validation() {
        let empty = SignUpRequest {
            username: String::new(),
            password: "pw".to_string(),
            nickname: None,
        };
        assert!(empty.validate().is_err());

        let ok = SignUpRequest {
            username: "bob".to_string(),
            password: "pw".to_string(),
            nickname: None,
        };
        assert!(ok.validate().is_ok());
    }
}

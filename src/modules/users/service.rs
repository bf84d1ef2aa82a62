use anyhow::anyhow;
use gatehouse_auth::{Identity, TokenIssuer, TokenPair};
use gatehouse_core::{AppError, PasswordHasher, UserRole};
use gatehouse_models::{CheckResponse, NewUser, SignRequest, SignUpRequest, User};
use tracing::{info, instrument};

use super::store::{StoreError, UserStore};
use crate::middleware::auth::AuthUser;

pub const DUPLICATE_USERNAME_MESSAGE: &str = "A user with the same username already exists.";
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Password does not match.";

fn store_error(err: StoreError) -> AppError {
    match err {
        StoreError::Duplicate(_) => AppError::conflict(anyhow!(DUPLICATE_USERNAME_MESSAGE)),
        StoreError::Backend(e) => AppError::internal(e),
    }
}

pub struct UserService;

impl UserService {
    /// Registers a new user with the `USER` role.
    #[instrument(skip_all, fields(username = %dto.username))]
    pub async fn sign_up(
        users: &dyn UserStore,
        hasher: &dyn PasswordHasher,
        dto: SignUpRequest,
    ) -> Result<User, AppError> {
        if users
            .find_by_username(&dto.username)
            .await
            .map_err(store_error)?
            .is_some()
        {
            return Err(AppError::conflict(anyhow!(DUPLICATE_USERNAME_MESSAGE)));
        }

        let password_hash = hasher.hash(&dto.password)?;

        let user = users
            .create_user(NewUser {
                username: dto.username,
                nickname: dto.nickname,
                password_hash,
                role: UserRole::User,
            })
            .await
            .map_err(store_error)?;

        info!("User signed up");
        Ok(user)
    }

    /// Checks credentials and issues an access/refresh pair.
    #[instrument(skip_all, fields(username = %dto.username))]
    pub async fn sign_in(
        users: &dyn UserStore,
        hasher: &dyn PasswordHasher,
        issuer: &TokenIssuer,
        dto: SignRequest,
    ) -> Result<TokenPair, AppError> {
        let user = users
            .find_by_username(&dto.username)
            .await
            .map_err(store_error)?
            .ok_or_else(|| AppError::bad_request(anyhow!(USER_NOT_FOUND_MESSAGE)))?;

        if !hasher.verify(&dto.password, &user.password_hash)? {
            return Err(AppError::bad_request(anyhow!(PASSWORD_MISMATCH_MESSAGE)));
        }

        let pair = issuer.issue_pair(&Identity::new(user.username, user.role))?;

        info!("User signed in");
        Ok(pair)
    }

    pub fn check(auth_user: &AuthUser) -> CheckResponse {
        CheckResponse {
            check: format!("{} is signed in.", auth_user.subject()),
        }
    }
}

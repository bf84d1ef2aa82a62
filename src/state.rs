use std::fmt;
use std::sync::Arc;

use gatehouse_auth::TokenIssuer;
use gatehouse_config::{CorsConfig, JwtConfig};
use gatehouse_core::{BcryptHasher, PasswordHasher};

use crate::middleware::auth::AuthenticationMediator;
use crate::modules::users::store::{InMemoryUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub issuer: Arc<TokenIssuer>,
    pub mediator: Arc<AuthenticationMediator>,
    pub users: Arc<dyn UserStore>,
    pub hasher: Arc<dyn PasswordHasher>,
}

impl AppState {
    pub fn new(
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            issuer: Arc::new(TokenIssuer::from_config(&jwt_config)),
            mediator: Arc::new(AuthenticationMediator::from_config(&jwt_config)),
            jwt_config,
            cors_config,
            users,
            hasher,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("cors_config", &self.cors_config)
            .field("issuer", &self.issuer)
            .field("mediator", &self.mediator)
            .finish_non_exhaustive()
    }
}

pub fn init_app_state(jwt_config: JwtConfig) -> AppState {
    AppState::new(
        jwt_config,
        CorsConfig::from_env(),
        Arc::new(InMemoryUserStore::new()),
        Arc::new(BcryptHasher::default()),
    )
}

use std::collections::HashMap;

use async_trait::async_trait;
use gatehouse_models::{NewUser, User};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user `{0}` already exists")]
    Duplicate(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Lookup and creation of registered users, keyed by username.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::Duplicate`] when the username is taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;
}

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&new_user.username) {
            return Err(StoreError::Duplicate(new_user.username));
        }

        let user = User::from(new_user);
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }
}

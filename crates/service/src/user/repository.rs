use async_trait::async_trait;

use super::domain::User;
use crate::errors::ServiceError;

/// Repository abstraction for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, ServiceError>;
    /// Fails with `Conflict` when the username is taken.
    async fn create(&self, username: &str, name: &str, password_hash: &str) -> Result<User, ServiceError>;
    async fn update_profile(&self, username: &str, name: Option<&str>, password_hash: Option<&str>) -> Result<Option<User>, ServiceError>;
    /// Returns false when no such user exists.
    async fn set_token(&self, username: &str, token: Option<String>) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: RwLock<HashMap<String, User>>, // key: username
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
            Ok(self.users.read().await.get(username).cloned())
        }

        async fn find_by_token(&self, token: &str) -> Result<Option<User>, ServiceError> {
            let users = self.users.read().await;
            Ok(users.values().find(|u| u.token.as_deref() == Some(token)).cloned())
        }

        async fn create(&self, username: &str, name: &str, password_hash: &str) -> Result<User, ServiceError> {
            let mut users = self.users.write().await;
            if users.contains_key(username) {
                return Err(ServiceError::Conflict("Username already exists".into()));
            }
            let user = User {
                username: username.to_string(),
                name: name.to_string(),
                password_hash: password_hash.to_string(),
                token: None,
            };
            users.insert(username.to_string(), user.clone());
            Ok(user)
        }

        async fn update_profile(&self, username: &str, name: Option<&str>, password_hash: Option<&str>) -> Result<Option<User>, ServiceError> {
            let mut users = self.users.write().await;
            let Some(user) = users.get_mut(username) else { return Ok(None) };
            if let Some(n) = name { user.name = n.to_string(); }
            if let Some(h) = password_hash { user.password_hash = h.to_string(); }
            Ok(Some(user.clone()))
        }

        async fn set_token(&self, username: &str, token: Option<String>) -> Result<bool, ServiceError> {
            let mut users = self.users.write().await;
            match users.get_mut(username) {
                Some(user) => {
                    user.token = token;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }
}

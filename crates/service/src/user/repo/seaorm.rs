use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::user::domain::User;
use crate::user::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
        let found = models::user::find_by_username(&self.db, username).await?;
        Ok(found.map(User::from))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, ServiceError> {
        let found = models::user::find_by_token(&self.db, token).await?;
        Ok(found.map(User::from))
    }

    async fn create(&self, username: &str, name: &str, password_hash: &str) -> Result<User, ServiceError> {
        let created = models::user::create(&self.db, username, name, password_hash)
            .await
            .map_err(|e| match e {
                models::errors::ModelError::Conflict(_) => ServiceError::Conflict("Username already exists".into()),
                other => other.into(),
            })?;
        Ok(User::from(created))
    }

    async fn update_profile(&self, username: &str, name: Option<&str>, password_hash: Option<&str>) -> Result<Option<User>, ServiceError> {
        let updated = models::user::update_profile(&self.db, username, name, password_hash).await?;
        Ok(updated.map(User::from))
    }

    async fn set_token(&self, username: &str, token: Option<String>) -> Result<bool, ServiceError> {
        Ok(models::user::set_token(&self.db, username, token).await?)
    }
}

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use common::pagination::Pagination;
use models::contact::{ContactChanges, ContactFilter, NewContact};

use crate::contact::domain::Contact;
use crate::contact::repository::ContactRepository;
use crate::errors::ServiceError;

pub struct SeaOrmContactRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ContactRepository for SeaOrmContactRepository {
    async fn create(&self, username: &str, input: NewContact) -> Result<Contact, ServiceError> {
        Ok(models::contact::create(&self.db, username, input).await?)
    }

    async fn find_owned(&self, username: &str, id: i32) -> Result<Option<Contact>, ServiceError> {
        Ok(models::contact::find_owned(&self.db, username, id).await?)
    }

    async fn update(&self, existing: Contact, changes: ContactChanges) -> Result<Contact, ServiceError> {
        Ok(models::contact::update(&self.db, existing, changes).await?)
    }

    async fn delete_owned(&self, username: &str, id: i32) -> Result<bool, ServiceError> {
        Ok(models::contact::delete_owned(&self.db, username, id).await?)
    }

    async fn search(
        &self,
        username: &str,
        filter: &ContactFilter,
        case_insensitive: bool,
        page: Pagination,
    ) -> Result<(Vec<Contact>, u64), ServiceError> {
        let (rows, total) =
            models::contact::search(&self.db, username, filter, case_insensitive, page.page_index(), page.size).await?;
        Ok((rows, total))
    }
}

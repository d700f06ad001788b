use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::address::{AddressChanges, NewAddress};

use crate::address::domain::Address;
use crate::address::repository::AddressRepository;
use crate::errors::ServiceError;

pub struct SeaOrmAddressRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl AddressRepository for SeaOrmAddressRepository {
    async fn create(&self, contact_id: i32, input: NewAddress) -> Result<Address, ServiceError> {
        Ok(models::address::create(&self.db, contact_id, input).await?)
    }

    async fn find_for_contact(&self, contact_id: i32, id: i32) -> Result<Option<Address>, ServiceError> {
        Ok(models::address::find_for_contact(&self.db, contact_id, id).await?)
    }

    async fn list_for_contact(&self, contact_id: i32) -> Result<Vec<Address>, ServiceError> {
        Ok(models::address::list_for_contact(&self.db, contact_id).await?)
    }

    async fn update(&self, existing: Address, changes: AddressChanges) -> Result<Address, ServiceError> {
        Ok(models::address::update(&self.db, existing, changes).await?)
    }

    async fn delete_for_contact(&self, contact_id: i32, id: i32) -> Result<bool, ServiceError> {
        Ok(models::address::delete_for_contact(&self.db, contact_id, id).await?)
    }
}

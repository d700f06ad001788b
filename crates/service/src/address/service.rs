use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{
    Address, AddressKey, AddressResponse, CreateAddressRequest, GetAddressRequest, RemoveAddressRequest,
    UpdateAddressRequest,
};
use super::repository::AddressRepository;
use crate::contact::ContactService;
use crate::errors::ServiceError;
use crate::user::domain::User;
use crate::validation::Validate;

pub struct AddressService {
    repo: Arc<dyn AddressRepository>,
    contacts: Arc<ContactService>,
}

impl AddressService {
    pub fn new(repo: Arc<dyn AddressRepository>, contacts: Arc<ContactService>) -> Self { Self { repo, contacts } }

    /// Contact ownership first, then the address must hang off that same contact.
    async fn check_address_must_exist(&self, user: &User, key: AddressKey) -> Result<Address, ServiceError> {
        self.contacts.check_contact_must_exist(user, key.contact_id).await?;
        self.repo
            .find_for_contact(key.contact_id, key.address_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Address"))
    }

    #[instrument(skip(self, user, request), fields(username = %user.username, contact_id = request.contact_id))]
    pub async fn create(&self, user: &User, request: CreateAddressRequest) -> Result<AddressResponse, ServiceError> {
        let (contact_id, input) = request.validate()?;
        self.contacts.check_contact_must_exist(user, contact_id).await?;
        let address = self.repo.create(contact_id, input).await?;
        info!(address_id = address.id, "address_created");
        Ok(address.into())
    }

    pub async fn get(&self, user: &User, request: GetAddressRequest) -> Result<AddressResponse, ServiceError> {
        let key = request.validate()?;
        Ok(self.check_address_must_exist(user, key).await?.into())
    }

    #[instrument(skip(self, user, request), fields(username = %user.username, contact_id = request.contact_id, address_id = request.id))]
    pub async fn update(&self, user: &User, request: UpdateAddressRequest) -> Result<AddressResponse, ServiceError> {
        let (key, changes) = request.validate()?;
        let existing = self.check_address_must_exist(user, key).await?;
        let updated = self.repo.update(existing, changes).await?;
        info!("address_updated");
        Ok(updated.into())
    }

    #[instrument(skip(self, user, request), fields(username = %user.username))]
    pub async fn remove(&self, user: &User, request: RemoveAddressRequest) -> Result<(), ServiceError> {
        let key = request.validate()?;
        self.check_address_must_exist(user, key).await?;
        if !self.repo.delete_for_contact(key.contact_id, key.address_id).await? {
            return Err(ServiceError::not_found("Address"));
        }
        info!(contact_id = key.contact_id, address_id = key.address_id, "address_removed");
        Ok(())
    }

    pub async fn list(&self, user: &User, contact_id: i32) -> Result<Vec<AddressResponse>, ServiceError> {
        let contact = self.contacts.check_contact_must_exist(user, contact_id).await?;
        let rows = self.repo.list_for_contact(contact.id).await?;
        Ok(rows.into_iter().map(AddressResponse::from).collect())
    }
}

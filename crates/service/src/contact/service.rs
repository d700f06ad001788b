use std::sync::Arc;

use tracing::{debug, info, instrument};

use common::pagination::Paging;
use configs::SearchConfig;

use super::domain::{Contact, ContactResponse, CreateContactRequest, SearchContactRequest, UpdateContactRequest};
use super::repository::ContactRepository;
use crate::errors::ServiceError;
use crate::user::domain::User;
use crate::validation::Validate;

pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
    search: SearchConfig,
}

impl ContactService {
    pub fn new(repo: Arc<dyn ContactRepository>, search: SearchConfig) -> Self { Self { repo, search } }

    /// The contact `id` owned by `user`, or `NotFound`.
    pub async fn check_contact_must_exist(&self, user: &User, id: i32) -> Result<Contact, ServiceError> {
        self.repo
            .find_owned(&user.username, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Contact"))
    }

    #[instrument(skip(self, user, request), fields(username = %user.username))]
    pub async fn create(&self, user: &User, request: CreateContactRequest) -> Result<ContactResponse, ServiceError> {
        let input = request.validate()?;
        let contact = self.repo.create(&user.username, input).await?;
        info!(contact_id = contact.id, "contact_created");
        Ok(contact.into())
    }

    pub async fn get(&self, user: &User, id: i32) -> Result<ContactResponse, ServiceError> {
        Ok(self.check_contact_must_exist(user, id).await?.into())
    }

    #[instrument(skip(self, user, request), fields(username = %user.username, contact_id = request.id))]
    pub async fn update(&self, user: &User, request: UpdateContactRequest) -> Result<ContactResponse, ServiceError> {
        let (id, changes) = request.validate()?;
        let existing = self.check_contact_must_exist(user, id).await?;
        let updated = self.repo.update(existing, changes).await?;
        info!("contact_updated");
        Ok(updated.into())
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn remove(&self, user: &User, id: i32) -> Result<(), ServiceError> {
        self.check_contact_must_exist(user, id).await?;
        if !self.repo.delete_owned(&user.username, id).await? {
            return Err(ServiceError::not_found("Contact"));
        }
        info!(contact_id = id, "contact_removed");
        Ok(())
    }

    /// Owner-scoped conjunctive search, one page at a time.
    #[instrument(skip(self, user, request), fields(username = %user.username))]
    pub async fn search(&self, user: &User, request: SearchContactRequest) -> Result<(Vec<ContactResponse>, Paging), ServiceError> {
        let (filter, page) = request.validate(&self.search)?;
        let (rows, total) = self.repo
            .search(&user.username, &filter, self.search.case_insensitive, page)
            .await?;
        debug!(total, page = page.page, size = page.size, "contact_search");
        Ok((rows.into_iter().map(ContactResponse::from).collect(), page.paging(total)))
    }
}

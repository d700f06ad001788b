use serde::{Deserialize, Serialize};

use common::pagination::Pagination;
use configs::SearchConfig;
use models::contact::{ContactChanges, ContactFilter, NewContact};

use crate::validation::{Length, Validate, ValidationErrors, Validator};

pub type Contact = models::contact::Model;

const FIRST_NAME: Length = Length::between(1, 100);
const LAST_NAME: Length = Length::max(100);
const EMAIL: Length = Length::max(100);
const PHONE: Length = Length::max(20);
const FILTER: Length = Length::between(1, 100);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<Contact> for ContactResponse {
    fn from(c: Contact) -> Self {
        Self { id: c.id, first_name: c.first_name, last_name: c.last_name, email: c.email, phone: c.phone }
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Validate for CreateContactRequest {
    type Output = NewContact;

    fn validate(self) -> Result<NewContact, ValidationErrors> {
        let mut v = Validator::new();
        let first_name = v.required("first_name", self.first_name, FIRST_NAME);
        let last_name = v.optional("last_name", self.last_name, LAST_NAME);
        let email = v.optional_email("email", self.email, EMAIL);
        let phone = v.optional("phone", self.phone, PHONE);
        v.finish(NewContact { first_name, last_name, email, phone })
    }
}

/// Partial update; `id` comes from the path, never from the body.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateContactRequest {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Validate for UpdateContactRequest {
    type Output = (i32, ContactChanges);

    fn validate(self) -> Result<Self::Output, ValidationErrors> {
        let mut v = Validator::new();
        v.positive("id", i64::from(self.id));
        let first_name = v.optional("first_name", self.first_name, FIRST_NAME);
        let last_name = v.optional("last_name", self.last_name, LAST_NAME);
        let email = v.optional_email("email", self.email, EMAIL);
        let phone = v.optional("phone", self.phone, PHONE);
        v.finish((self.id, ContactChanges { first_name, last_name, email, phone }))
    }
}

/// Query string of `GET /api/contacts`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl SearchContactRequest {
    /// Page size limits come from configuration, so this is not a plain [`Validate`].
    pub fn validate(self, cfg: &SearchConfig) -> Result<(ContactFilter, Pagination), ValidationErrors> {
        let mut v = Validator::new();
        let name = v.optional("name", self.name, FILTER);
        let email = v.optional("email", self.email, FILTER);
        let phone = v.optional("phone", self.phone, FILTER);

        let page = self.page.unwrap_or(1);
        let size = self.size.unwrap_or(cfg.default_page_size as i64);
        v.positive("page", page);
        v.positive("size", size);
        if size > 0 {
            v.at_most("size", size as u64, cfg.max_page_size);
        }

        let paging = Pagination::new(page.max(1) as u64, size.max(1) as u64);
        v.finish((ContactFilter { name, email, phone }, paging))
    }
}

use async_trait::async_trait;

use common::pagination::Pagination;
use models::contact::{ContactChanges, ContactFilter, NewContact};

use super::domain::Contact;
use crate::errors::ServiceError;

/// Repository abstraction for contact persistence. Every lookup is owner-scoped.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, username: &str, input: NewContact) -> Result<Contact, ServiceError>;
    async fn find_owned(&self, username: &str, id: i32) -> Result<Option<Contact>, ServiceError>;
    async fn update(&self, existing: Contact, changes: ContactChanges) -> Result<Contact, ServiceError>;
    async fn delete_owned(&self, username: &str, id: i32) -> Result<bool, ServiceError>;
    /// One page of matches ordered by id, plus the total match count.
    async fn search(
        &self,
        username: &str,
        filter: &ContactFilter,
        case_insensitive: bool,
        page: Pagination,
    ) -> Result<(Vec<Contact>, u64), ServiceError>;
}

/// In-memory repository mirroring the SQL search semantics
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use chrono::Utc;
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct State {
        next_id: i32,
        rows: BTreeMap<i32, Contact>,
    }

    #[derive(Default)]
    pub struct MockContactRepository {
        state: RwLock<State>,
    }

    fn contains(haystack: Option<&str>, needle: &str, case_insensitive: bool) -> bool {
        match haystack {
            Some(h) if case_insensitive => h.to_lowercase().contains(&needle.to_lowercase()),
            Some(h) => h.contains(needle),
            None => false,
        }
    }

    fn matches(c: &Contact, f: &ContactFilter, ci: bool) -> bool {
        let name_ok = f.name.as_deref().map_or(true, |n| {
            contains(Some(&c.first_name), n, ci) || contains(c.last_name.as_deref(), n, ci)
        });
        let email_ok = f.email.as_deref().map_or(true, |e| contains(c.email.as_deref(), e, ci));
        let phone_ok = f.phone.as_deref().map_or(true, |p| contains(c.phone.as_deref(), p, ci));
        name_ok && email_ok && phone_ok
    }

    #[async_trait]
    impl ContactRepository for MockContactRepository {
        async fn create(&self, username: &str, input: NewContact) -> Result<Contact, ServiceError> {
            let mut st = self.state.write().await;
            st.next_id += 1;
            let now = Utc::now().into();
            let contact = Contact {
                id: st.next_id,
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                phone: input.phone,
                username: username.to_string(),
                created_at: now,
                updated_at: now,
            };
            st.rows.insert(contact.id, contact.clone());
            Ok(contact)
        }

        async fn find_owned(&self, username: &str, id: i32) -> Result<Option<Contact>, ServiceError> {
            let st = self.state.read().await;
            Ok(st.rows.get(&id).filter(|c| c.username == username).cloned())
        }

        async fn update(&self, existing: Contact, changes: ContactChanges) -> Result<Contact, ServiceError> {
            let mut st = self.state.write().await;
            let row = st.rows.get_mut(&existing.id).ok_or_else(|| ServiceError::not_found("Contact"))?;
            changes.apply(row);
            Ok(row.clone())
        }

        async fn delete_owned(&self, username: &str, id: i32) -> Result<bool, ServiceError> {
            let mut st = self.state.write().await;
            let owned = st.rows.get(&id).map_or(false, |c| c.username == username);
            if owned {
                st.rows.remove(&id);
            }
            Ok(owned)
        }

        async fn search(
            &self,
            username: &str,
            filter: &ContactFilter,
            case_insensitive: bool,
            page: Pagination,
        ) -> Result<(Vec<Contact>, u64), ServiceError> {
            let st = self.state.read().await;
            let hits: Vec<&Contact> = st
                .rows
                .values()
                .filter(|c| c.username == username && matches(c, filter, case_insensitive))
                .collect();
            let total = hits.len() as u64;
            let rows = hits
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.size as usize)
                .cloned()
                .collect();
            Ok((rows, total))
        }
    }
}

use async_trait::async_trait;

use models::address::{AddressChanges, NewAddress};

use super::domain::Address;
use crate::errors::ServiceError;

/// Repository abstraction for address persistence, scoped by parent contact.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn create(&self, contact_id: i32, input: NewAddress) -> Result<Address, ServiceError>;
    async fn find_for_contact(&self, contact_id: i32, id: i32) -> Result<Option<Address>, ServiceError>;
    async fn list_for_contact(&self, contact_id: i32) -> Result<Vec<Address>, ServiceError>;
    async fn update(&self, existing: Address, changes: AddressChanges) -> Result<Address, ServiceError>;
    async fn delete_for_contact(&self, contact_id: i32, id: i32) -> Result<bool, ServiceError>;
}

pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use chrono::Utc;
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct State {
        next_id: i32,
        rows: BTreeMap<i32, Address>,
    }

    #[derive(Default)]
    pub struct MockAddressRepository {
        state: RwLock<State>,
    }

    impl MockAddressRepository {
        /// Total rows across all contacts.
        pub async fn len(&self) -> usize {
            self.state.read().await.rows.len()
        }
    }

    #[async_trait]
    impl AddressRepository for MockAddressRepository {
        async fn create(&self, contact_id: i32, input: NewAddress) -> Result<Address, ServiceError> {
            let mut st = self.state.write().await;
            st.next_id += 1;
            let now = Utc::now().into();
            let address = Address {
                id: st.next_id,
                street: input.street,
                city: input.city,
                province: input.province,
                country: input.country,
                postal_code: input.postal_code,
                contact_id,
                created_at: now,
                updated_at: now,
            };
            st.rows.insert(address.id, address.clone());
            Ok(address)
        }

        async fn find_for_contact(&self, contact_id: i32, id: i32) -> Result<Option<Address>, ServiceError> {
            let st = self.state.read().await;
            Ok(st.rows.get(&id).filter(|a| a.contact_id == contact_id).cloned())
        }

        async fn list_for_contact(&self, contact_id: i32) -> Result<Vec<Address>, ServiceError> {
            let st = self.state.read().await;
            Ok(st.rows.values().filter(|a| a.contact_id == contact_id).cloned().collect())
        }

        async fn update(&self, existing: Address, changes: AddressChanges) -> Result<Address, ServiceError> {
            let mut st = self.state.write().await;
            let row = st.rows.get_mut(&existing.id).ok_or_else(|| ServiceError::not_found("Address"))?;
            changes.apply(row);
            Ok(row.clone())
        }

        async fn delete_for_contact(&self, contact_id: i32, id: i32) -> Result<bool, ServiceError> {
            let mut st = self.state.write().await;
            let hit = st.rows.get(&id).map_or(false, |a| a.contact_id == contact_id);
            if hit {
                st.rows.remove(&id);
            }
            Ok(hit)
        }
    }
}

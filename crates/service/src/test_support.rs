#![cfg(test)]
use std::sync::Arc;

use configs::SearchConfig;

use crate::address::{repository::mock::MockAddressRepository, AddressService};
use crate::contact::{repository::mock::MockContactRepository, ContactService};
use crate::user::domain::{LoginUserRequest, RegisterUserRequest, User};
use crate::user::{repository::mock::MockUserRepository, UserService};

/// Services wired over in-memory repositories.
pub struct TestServices {
    pub users: UserService,
    pub contacts: Arc<ContactService>,
    pub addresses: AddressService,
    pub address_repo: Arc<MockAddressRepository>,
}

pub fn in_memory() -> TestServices {
    in_memory_with(SearchConfig::default())
}

pub fn in_memory_with(search: SearchConfig) -> TestServices {
    let users = UserService::new(Arc::new(MockUserRepository::default()));
    let contacts = Arc::new(ContactService::new(Arc::new(MockContactRepository::default()), search));
    let address_repo = Arc::new(MockAddressRepository::default());
    let addresses = AddressService::new(address_repo.clone(), contacts.clone());
    TestServices { users, contacts, addresses, address_repo }
}

/// Register `username`, log in and resolve the session back to a [`User`].
pub async fn login(users: &UserService, username: &str) -> User {
    let register = RegisterUserRequest {
        username: Some(username.into()),
        password: Some("rahasia".into()),
        name: Some(username.to_uppercase()),
    };
    users.register(register).await.expect("register");
    let login = LoginUserRequest { username: Some(username.into()), password: Some("rahasia".into()) };
    let token = users.login(login).await.expect("login").token.expect("token");
    users.authenticate(&token).await.expect("authenticate")
}

//! Addresses hanging off a contact, scoped through the contact's owner.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::AddressService;

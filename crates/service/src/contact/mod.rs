//! Contacts owned by a user: CRUD plus paginated search.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::ContactService;

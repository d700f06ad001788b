//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Each service validates its input, checks ownership, then talks to a repository trait.
//! - Repositories come in a SeaORM flavour and an in-memory `mock` flavour.

pub mod errors;
pub mod validation;
pub mod user;
pub mod contact;
pub mod address;
#[cfg(test)]
pub mod test_support;

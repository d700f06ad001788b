//! SeaORM entities and owner-scoped queries for users, contacts and addresses.

pub mod errors;
pub mod db;
pub mod user;
pub mod contact;
pub mod address;

#[cfg(test)]
mod tests;

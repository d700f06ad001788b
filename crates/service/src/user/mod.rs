//! User module: three-layer architecture (domain, repository, service).
//!
//! Registration, login/logout with session tokens, profile read/update and the
//! token lookup used by the HTTP auth middleware.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::UserService;

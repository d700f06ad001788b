//! Shared building blocks for the contacts API crates.
//!
//! - `types`: the JSON response envelope and health payload
//! - `pagination`: page/size parameters and paging metadata
//! - `utils::logging`: tracing subscriber setup

pub mod types;
pub mod utils;
pub mod pagination;

use serde::{Deserialize, Serialize};

use crate::pagination::Paging;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform success envelope: `{ "data": T }` or `{ "data": [T], "paging": {..} }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WebResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl<T> WebResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, paging: None }
    }

    pub fn paged(data: T, paging: Paging) -> Self {
        Self { data, paging: Some(paging) }
    }
}

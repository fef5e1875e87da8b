//! Paginated list payloads as served by the upstream API.
//!
//! Every list endpoint wraps its items under a collection-specific key
//! (`characters`, `clans`, `villages`) next to `currentPage`, `pageSize` and `total`.

use serde::Deserialize;
use validator::Validate;

use crate::entity::Character;
use crate::group::Group;
use crate::pagination::PaginationMeta;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CharactersResponse {
    #[serde(default)]
    pub characters: Vec<Character>,
    #[validate(range(min = 1))]
    pub current_page: u32,
    #[validate(range(min = 1))]
    pub page_size: u32,
    pub total: u64,
}

impl CharactersResponse {
    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta::from_response(self.current_page, self.page_size, self.total)
    }
}

/// Clan and village listings share one shape; only the items key differs.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GroupsResponse {
    #[serde(default, alias = "clans", alias = "villages")]
    pub groups: Vec<Group>,
    #[validate(range(min = 1))]
    pub current_page: u32,
    #[validate(range(min = 1))]
    pub page_size: u32,
    pub total: u64,
}

impl GroupsResponse {
    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta::from_response(self.current_page, self.page_size, self.total)
    }
}

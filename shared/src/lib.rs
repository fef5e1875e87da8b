pub mod avatar;
pub mod entity;
pub mod group;
pub mod pagination;
pub mod response;
pub mod search;

pub use avatar::{avatar_color, avatar_color_hex, initial};
pub use entity::*;
pub use group::*;
pub use pagination::*;
pub use response::*;
pub use search::{Searchable, filter_entities, normalize_query};

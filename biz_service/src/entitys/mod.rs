pub mod favorite_entity;
pub mod profile_entity;
pub mod search_entity;

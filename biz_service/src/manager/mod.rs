pub mod favorite_manager_core;
pub mod favorite_manager_impl;

pub use favorite_manager_core::{FavoriteManager, FavoriteManagerOpt};

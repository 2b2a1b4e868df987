//! Keyman 收藏客户端：本地缓存 + 乐观更新 + 与服务端对账

pub mod api;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;
pub mod toggle;

pub use api::{FavoriteApi, HttpFavoriteApi};
pub use error::ClientError;
pub use model::FavoriteUser;
pub use storage::{FavoriteStorage, FileStorage, MemoryStorage};
pub use store::FavoriteStore;
pub use toggle::{FavoriteState, FavoriteToggle};

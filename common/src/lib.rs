pub mod config;
pub mod errors;
pub mod redis;
pub mod util;

/// 已登录调用方的标识（会话中的邮箱），所有收藏数据以此为作用域
pub type Identity = String;

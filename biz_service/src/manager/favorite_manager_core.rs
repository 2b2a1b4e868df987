use crate::entitys::favorite_entity::{FavoriteEntry, FavoriteRecord};
use async_trait::async_trait;
use common::errors::AppError;
use common::redis::KvStore;
use common::util::date_util::now_millis;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// 被收藏员工 ID 的最大长度
pub const MAX_TARGET_ID_LEN: usize = 128;

/// 收藏管理器
///
/// 每个调用方维护三个 key：成员集合、按时间排序的有序集合、每个收藏的快照哈希。
/// 三者在一次 `KvStore::exec` 中一起写入或删除，读方看不到中间状态。
#[derive(Clone)]
pub struct FavoriteManager {
    /// 存储后端（Redis 或内存实现）
    pub(crate) store: Arc<dyn KvStore>,
    /// 本进程最近一次分配的排序 score，保证严格递增
    last_score: Arc<AtomicI64>,
}

/// 收藏核心行为抽象接口
#[async_trait]
pub trait FavoriteManagerOpt: Send + Sync {
    /// 添加收藏，已收藏时返回 `AlreadyFavorited`；返回最新的 ID 列表（最近收藏在前）
    async fn add(&self, identity: &str, target_id: &str, record: &FavoriteRecord) -> Result<Vec<String>, AppError>;
    /// 取消收藏，目标不存在时不报错；返回最新的 ID 列表
    async fn remove(&self, identity: &str, target_id: &str) -> Result<Vec<String>, AppError>;
    /// 收藏列表（最近收藏在前），匿名调用返回空列表
    async fn list(&self, identity: Option<&str>) -> Result<Vec<FavoriteEntry>, AppError>;
    /// 是否已收藏，匿名调用返回 false
    async fn is_favorited(&self, identity: Option<&str>, target_id: &str) -> Result<bool, AppError>;
}

impl FavoriteManager {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store, last_score: Arc::new(AtomicI64::new(0)) }
    }

    /// 分配排序 score：当前毫秒时间戳，若不大于上一次则取上一次 + 1
    pub(crate) fn next_score(&self) -> i64 {
        let now = now_millis();
        let prev = self
            .last_score
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
            .unwrap_or_else(|last| last);
        now.max(prev + 1)
    }

    /// 去掉首尾空白后校验，写入、删除、查询都使用同一个规范化 ID
    pub(crate) fn normalize_target_id(target_id: &str) -> Result<&str, AppError> {
        let target_id = target_id.trim();
        if target_id.is_empty() {
            return Err(AppError::Validation("userId must not be empty".to_string()));
        }
        if target_id.len() > MAX_TARGET_ID_LEN {
            return Err(AppError::Validation(format!("userId longer than {} characters", MAX_TARGET_ID_LEN)));
        }
        Ok(target_id)
    }
}

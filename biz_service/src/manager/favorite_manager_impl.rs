use crate::entitys::favorite_entity::{FavoriteEntry, FavoriteKeys, FavoriteRecord};
use crate::manager::favorite_manager_core::{FavoriteManager, FavoriteManagerOpt};
use async_trait::async_trait;
use common::errors::AppError;
use common::redis::WriteOp;
use common::util::date_util::millis_to_str;
use log::{debug, info};

#[async_trait]
impl FavoriteManagerOpt for FavoriteManager {
    async fn add(&self, identity: &str, target_id: &str, record: &FavoriteRecord) -> Result<Vec<String>, AppError> {
        let target_id = Self::normalize_target_id(target_id)?;
        let keys = FavoriteKeys::new(identity);

        // ---------- 1. 三个 key 一次性写入，已是成员时不写 ----------
        let score = self.next_score();
        let ops = vec![
            WriteOp::SAdd { key: keys.members.clone(), member: target_id.to_string() },
            WriteOp::ZAdd { key: keys.order.clone(), member: target_id.to_string(), score },
            WriteOp::HSet { key: keys.record(target_id), fields: record.to_fields(score) },
        ];
        if !self.store.exec_unless_member(&keys.members, target_id, ops).await? {
            return Err(AppError::AlreadyFavorited);
        }
        info!("[FavoriteManager] {} 收藏 {} @ {}", identity, target_id, millis_to_str(score));

        // ---------- 2. 返回最新排序 ----------
        self.store.zrevrange(&keys.order).await
    }

    async fn remove(&self, identity: &str, target_id: &str) -> Result<Vec<String>, AppError> {
        let target_id = Self::normalize_target_id(target_id)?;
        let keys = FavoriteKeys::new(identity);

        self.store
            .exec(vec![
                WriteOp::SRem { key: keys.members.clone(), member: target_id.to_string() },
                WriteOp::ZRem { key: keys.order.clone(), member: target_id.to_string() },
                WriteOp::Del { key: keys.record(target_id) },
            ])
            .await?;
        info!("[FavoriteManager] {} 取消收藏 {}", identity, target_id);

        self.store.zrevrange(&keys.order).await
    }

    async fn list(&self, identity: Option<&str>) -> Result<Vec<FavoriteEntry>, AppError> {
        let Some(identity) = identity else {
            return Ok(Vec::new());
        };
        let keys = FavoriteKeys::new(identity);

        let ids = self.store.zrevrange(&keys.order).await?;
        let record_keys: Vec<String> = ids.iter().map(|id| keys.record(id)).collect();
        let records = self.store.hgetall_many(&record_keys).await?;
        debug!("[FavoriteManager] {} 共 {} 个收藏", identity, ids.len());

        // 快照缺失时返回空字段，而不是让整个列表失败
        let entries = ids
            .into_iter()
            .zip(records.into_iter().chain(std::iter::repeat_with(Default::default)))
            .map(|(user_id, fields)| FavoriteEntry { user_id, record: FavoriteRecord::from_fields(fields) })
            .collect();
        Ok(entries)
    }

    async fn is_favorited(&self, identity: Option<&str>, target_id: &str) -> Result<bool, AppError> {
        let Some(identity) = identity else {
            return Ok(false);
        };
        let keys = FavoriteKeys::new(identity);
        self.store.sismember(&keys.members, target_id.trim()).await
    }
}

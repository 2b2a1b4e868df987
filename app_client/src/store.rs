//! 收藏本地缓存
//!
//! 界面读取的是本地状态；写操作先改本地再请求服务端，服务端失败时撤销本地改动并把错误交给调用方。
//! 成功后以服务端返回的 ID 顺序为准。

use crate::api::FavoriteApi;
use crate::error::ClientError;
use crate::model::FavoriteUser;
use crate::storage::FavoriteStorage;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct FavoriteStore {
    api: Arc<dyn FavoriteApi>,
    storage: Arc<dyn FavoriteStorage>,
    favorites: RwLock<Vec<FavoriteUser>>,
}

impl FavoriteStore {
    pub fn new(api: Arc<dyn FavoriteApi>, storage: Arc<dyn FavoriteStorage>) -> Self {
        Self { api, storage, favorites: RwLock::new(Vec::new()) }
    }

    /// 启动时从本地存储恢复，网络请求完成前即可渲染星标
    pub async fn hydrate(&self) -> Result<(), ClientError> {
        let persisted = self.storage.load().await?;
        info!("[FavoriteStore] 恢复本地收藏 {} 条", persisted.len());
        *self.favorites.write().await = persisted;
        Ok(())
    }

    pub async fn favorites(&self) -> Vec<FavoriteUser> {
        self.favorites.read().await.clone()
    }

    pub async fn contains(&self, user_id: &str) -> bool {
        self.favorites.read().await.iter().any(|f| f.user_id == user_id)
    }

    /// 用服务端完整列表替换本地缓存
    pub async fn fetch_favorites(&self) -> Result<Vec<FavoriteUser>, ClientError> {
        let favorites = self.api.list().await?;
        self.set_favorites(favorites.clone()).await;
        Ok(favorites)
    }

    pub async fn set_favorites(&self, favorites: Vec<FavoriteUser>) {
        let mut guard = self.favorites.write().await;
        *guard = favorites;
        self.persist(&guard).await;
    }

    pub async fn add_favorite(&self, user: FavoriteUser) -> Result<(), ClientError> {
        let inserted = self.insert_front(user.clone()).await;

        match self.api.add(&user).await {
            Ok(ids) => {
                self.apply_server_order(&ids).await;
                Ok(())
            }
            // 服务端已收藏，本地状态本来就该是收藏
            Err(ClientError::AlreadyFavorited) => Ok(()),
            Err(e) => {
                warn!("[FavoriteStore] 收藏 {} 失败，回滚: {}", user.user_id, e);
                if inserted {
                    self.take(&user.user_id).await;
                }
                Err(e)
            }
        }
    }

    pub async fn remove_favorite(&self, user_id: &str) -> Result<(), ClientError> {
        let removed = self.take(user_id).await;

        match self.api.remove(user_id).await {
            Ok(ids) => {
                self.apply_server_order(&ids).await;
                Ok(())
            }
            Err(e) => {
                warn!("[FavoriteStore] 取消收藏 {} 失败，回滚: {}", user_id, e);
                if let Some((index, entry)) = removed {
                    let mut guard = self.favorites.write().await;
                    if !guard.iter().any(|f| f.user_id == entry.user_id) {
                        let index = index.min(guard.len());
                        guard.insert(index, entry);
                        self.persist(&guard).await;
                    }
                }
                Err(e)
            }
        }
    }

    /// 任何失败都视为未收藏
    pub async fn check_is_favorited(&self, user_id: &str) -> bool {
        match self.api.is_favorited(user_id).await {
            Ok(favorited) => favorited,
            Err(e) => {
                warn!("[FavoriteStore] 查询收藏状态失败 {}: {}", user_id, e);
                false
            }
        }
    }

    /// 对账：服务端已收藏但本地缺失时只补本地，不再写服务端
    pub async fn heal(&self, user: FavoriteUser) {
        if self.insert_front(user.clone()).await {
            info!("[FavoriteStore] 对账补回本地收藏 {}", user.user_id);
        }
    }

    async fn insert_front(&self, user: FavoriteUser) -> bool {
        let mut guard = self.favorites.write().await;
        if guard.iter().any(|f| f.user_id == user.user_id) {
            return false;
        }
        guard.insert(0, user);
        self.persist(&guard).await;
        true
    }

    async fn take(&self, user_id: &str) -> Option<(usize, FavoriteUser)> {
        let mut guard = self.favorites.write().await;
        let index = guard.iter().position(|f| f.user_id == user_id)?;
        let entry = guard.remove(index);
        self.persist(&guard).await;
        Some((index, entry))
    }

    /// 按服务端 ID 顺序重排；服务端不再列出的丢弃，本地未知的只保留 ID
    async fn apply_server_order(&self, ids: &[String]) {
        let mut guard = self.favorites.write().await;
        let mut local = std::mem::take(&mut *guard);
        *guard = ids
            .iter()
            .map(|id| match local.iter().position(|f| &f.user_id == id) {
                Some(index) => local.swap_remove(index),
                None => FavoriteUser::bare(id.clone()),
            })
            .collect();
        self.persist(&guard).await;
    }

    // 持久化失败不影响内存状态
    async fn persist(&self, favorites: &[FavoriteUser]) {
        if let Err(e) = self.storage.save(favorites).await {
            warn!("[FavoriteStore] 保存本地收藏失败: {}", e);
        }
    }
}

use crate::error::ClientError;
use crate::model::FavoriteUser;
use crate::store::FavoriteStore;
use std::sync::Arc;

/// 单个收藏按钮的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteState {
    #[default]
    Unknown,
    Checking,
    Favorited,
    NotFavorited,
}

/// 收藏按钮：挂载时查询并对账，点击时乐观切换
///
/// 挂载完成后的状态以共享的 `FavoriteStore` 为准，同一员工的多个按钮看到的状态一致。
pub struct FavoriteToggle {
    store: Arc<FavoriteStore>,
    user: FavoriteUser,
    /// 挂载进度；已挂载时只作为点击中的乐观值
    state: FavoriteState,
}

impl FavoriteToggle {
    pub fn new(store: Arc<FavoriteStore>, user: FavoriteUser) -> Self {
        Self { store, user, state: FavoriteState::Unknown }
    }

    pub async fn state(&self) -> FavoriteState {
        match self.state {
            FavoriteState::Favorited | FavoriteState::NotFavorited => self.cached_state().await,
            pending => pending,
        }
    }

    pub async fn is_favorited(&self) -> bool {
        self.state().await == FavoriteState::Favorited
    }

    async fn cached_state(&self) -> FavoriteState {
        if self.store.contains(&self.user.user_id).await {
            FavoriteState::Favorited
        } else {
            FavoriteState::NotFavorited
        }
    }

    pub async fn mount(&mut self) -> FavoriteState {
        if self.store.contains(&self.user.user_id).await {
            self.state = FavoriteState::Favorited;
            return self.state;
        }

        self.state = FavoriteState::Checking;
        self.state = if self.store.check_is_favorited(&self.user.user_id).await {
            self.store.heal(self.user.clone()).await;
            FavoriteState::Favorited
        } else {
            FavoriteState::NotFavorited
        };
        self.state
    }

    /// 失败时恢复点击前的状态并返回错误
    pub async fn toggle(&mut self) -> Result<FavoriteState, ClientError> {
        let prior = self.state().await;
        let result = if prior == FavoriteState::Favorited {
            self.state = FavoriteState::NotFavorited;
            self.store.remove_favorite(&self.user.user_id).await
        } else {
            self.state = FavoriteState::Favorited;
            self.store.add_favorite(self.user.clone()).await
        };

        match result {
            Ok(()) => Ok(self.state),
            Err(e) => {
                self.state = prior;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::store::tests::{FakeApi, user};
    use std::sync::atomic::Ordering;

    fn setup(server: Vec<FavoriteUser>) -> (Arc<FavoriteStore>, Arc<FakeApi>) {
        let api = Arc::new(FakeApi::with(server));
        let store = Arc::new(FavoriteStore::new(api.clone(), Arc::new(MemoryStorage::new())));
        (store, api)
    }

    #[tokio::test]
    async fn mount_heals_local_cache() {
        let (store, api) = setup(vec![user("KEYMAN001", "Park")]);
        let mut toggle = FavoriteToggle::new(store.clone(), user("KEYMAN001", "Park"));
        assert_eq!(toggle.state().await, FavoriteState::Unknown);

        assert_eq!(toggle.mount().await, FavoriteState::Favorited);
        assert!(store.contains("KEYMAN001").await);
        assert_eq!(api.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn mount_uses_local_cache_first() {
        let (store, api) = setup(Vec::new());
        store.heal(user("KEYMAN002", "Ahn")).await;
        api.fail.store(true, Ordering::SeqCst);

        let mut toggle = FavoriteToggle::new(store, user("KEYMAN002", "Ahn"));
        assert_eq!(toggle.mount().await, FavoriteState::Favorited);
    }

    #[tokio::test]
    async fn toggle_round_trip() {
        let (store, _) = setup(Vec::new());
        let mut toggle = FavoriteToggle::new(store.clone(), user("KEYMAN001", "Park"));
        assert_eq!(toggle.mount().await, FavoriteState::NotFavorited);

        assert_eq!(toggle.toggle().await.unwrap(), FavoriteState::Favorited);
        assert!(store.contains("KEYMAN001").await);

        assert_eq!(toggle.toggle().await.unwrap(), FavoriteState::NotFavorited);
        assert!(!store.contains("KEYMAN001").await);
    }

    #[tokio::test]
    async fn failed_toggle_restores_state() {
        let (store, api) = setup(Vec::new());
        let mut toggle = FavoriteToggle::new(store.clone(), user("KEYMAN001", "Park"));
        toggle.mount().await;

        api.fail.store(true, Ordering::SeqCst);
        assert!(toggle.toggle().await.is_err());
        assert_eq!(toggle.state().await, FavoriteState::NotFavorited);
        assert!(!store.contains("KEYMAN001").await);
    }

    #[tokio::test]
    async fn toggles_share_store_state() {
        let (store, _) = setup(Vec::new());
        let mut card = FavoriteToggle::new(store.clone(), user("KEYMAN001", "Park"));
        let mut profile = FavoriteToggle::new(store.clone(), user("KEYMAN001", "Park"));
        card.mount().await;
        profile.mount().await;

        assert_eq!(card.toggle().await.unwrap(), FavoriteState::Favorited);
        assert!(profile.is_favorited().await);

        // 另一个按钮从共享状态出发，点击即取消
        assert_eq!(profile.toggle().await.unwrap(), FavoriteState::NotFavorited);
        assert_eq!(card.state().await, FavoriteState::NotFavorited);
        assert!(!store.contains("KEYMAN001").await);
    }
}

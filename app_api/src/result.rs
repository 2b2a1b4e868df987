use biz_service::biz_service::identity_service::IdentityService;
use biz_service::biz_service::profile_service::ProfileService;
use biz_service::biz_service::search_service::{SearchService, UpstreamSearch};
use biz_service::entitys::favorite_entity::FavoriteEntry;
use biz_service::entitys::profile_entity::ProfileView;
use biz_service::entitys::search_entity::SearchResult;
use biz_service::manager::{FavoriteManager, FavoriteManagerOpt};
use common::config::AuthConfig;
use common::redis::KvStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::ToSchema;

/// 处理器共享状态
#[derive(Clone)]
pub struct AppState {
    pub favorite_manager: Arc<dyn FavoriteManagerOpt>,
    pub identity_service: Arc<IdentityService>,
    pub search_service: Arc<SearchService>,
    pub profile_service: Arc<ProfileService>,
}

impl AppState {
    pub fn new(auth: AuthConfig, store: Arc<dyn KvStore>, upstream: Arc<dyn UpstreamSearch>, profiles: ProfileService) -> Self {
        Self {
            favorite_manager: Arc::new(FavoriteManager::new(store.clone())),
            identity_service: Arc::new(IdentityService::new(auth, store)),
            search_service: Arc::new(SearchService::new(upstream)),
            profile_service: Arc::new(profiles),
        }
    }
}

/// `POST /api/favorites` 成功响应
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct FavoriteUpdateResult {
    pub success: bool,
    /// 最新的收藏 ID，最近收藏在前
    pub favorites: Vec<String>,
}

/// `GET /api/favorites?userId=`
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCheckResult {
    pub is_favorited: bool,
}

/// `GET /api/favorites`
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct FavoriteListResult {
    pub favorites: Vec<FavoriteEntry>,
}

#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct SearchListResult {
    pub total: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct ProfileResult {
    pub profile: ProfileView,
    /// 上游给出的推荐理由，不可用时为空串
    pub explanation: String,
}

pub fn result() -> Value {
    serde_json::json!({"code":200})
}

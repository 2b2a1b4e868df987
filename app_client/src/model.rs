use serde::{Deserialize, Serialize};

/// 收藏条目，字段与 `/api/favorites` 一致
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteUser {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl FavoriteUser {
    /// 只有 ID、没有展示字段的条目
    pub fn bare(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), ..Default::default() }
    }
}

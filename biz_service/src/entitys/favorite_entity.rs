use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

pub const FIELD_NAME: &str = "name";
pub const FIELD_POSITION: &str = "position";
pub const FIELD_DEPARTMENT: &str = "department";
pub const FIELD_IMAGE_URL: &str = "imageUrl";

/// 快照哈希中的标记字段（收藏时刻，毫秒），保证四个展示字段都缺失时哈希仍然存在
pub const FIELD_SAVED_AT: &str = "savedAt";

/// 收藏时刻的展示数据快照。
///
/// 写入后不随员工资料变化而刷新，是快照而不是对资料的引用。
/// 只写入存在的字段，`Some("")` 与 `None` 读回时保持区分。
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,                   // 姓名
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,               // 职位
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,             // 部门
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,              // 头像地址
}

impl FavoriteRecord {
    /// 转为 Redis 哈希字段：存在的展示字段 + `savedAt` 标记
    pub fn to_fields(&self, saved_at: i64) -> Vec<(String, String)> {
        let mut fields: Vec<(String, String)> = [
            (FIELD_NAME, &self.name),
            (FIELD_POSITION, &self.position),
            (FIELD_DEPARTMENT, &self.department),
            (FIELD_IMAGE_URL, &self.image_url),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_ref().map(|v| (field.to_string(), v.clone())))
        .collect();
        fields.push((FIELD_SAVED_AT.to_string(), saved_at.to_string()));
        fields
    }

    /// 从哈希字段还原，未写入的字段为 `None`
    pub fn from_fields(mut fields: HashMap<String, String>) -> Self {
        let mut take = |field: &str| fields.remove(field);
        Self {
            name: take(FIELD_NAME),
            position: take(FIELD_POSITION),
            department: take(FIELD_DEPARTMENT),
            image_url: take(FIELD_IMAGE_URL),
        }
    }
}

/// 收藏列表中的一项：被收藏员工 ID + 快照
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub user_id: String,
    #[serde(flatten)]
    pub record: FavoriteRecord,
}

/// 一个调用方名下的三个 Redis key
#[derive(Debug, Clone)]
pub struct FavoriteKeys {
    identity: String,
    /// `favorites:{I}`，成员集合
    pub members: String,
    /// `favorites:timestamp:{I}`，按收藏时间排序
    pub order: String,
}

impl FavoriteKeys {
    pub fn new(identity: &str) -> Self {
        Self {
            identity: identity.to_string(),
            members: format!("favorites:{}", identity),
            order: format!("favorites:timestamp:{}", identity),
        }
    }

    /// `favorites:data:{I}:{T}`，快照哈希
    pub fn record(&self, target_id: &str) -> String {
        format!("favorites:data:{}:{}", self.identity, target_id)
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 协作可用状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Busy,
    Unavailable,
    #[default]
    #[serde(other)]
    Unknown,
}

/// 外部搜索服务返回的单个候选人
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub position: String,
    pub skills: Vec<String>,
    /// 工作年限
    pub experience: f64,
    pub department: String,
    pub projects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub highlights: Vec<String>,
    pub availability: Availability,
    /// 公司电话
    pub dphone: String,
    /// 手机
    pub mphone: String,
    pub email: String,
    /// 展示用头像地址，由服务端根据 `profile_image` 计算
    #[serde(skip_deserializing)]
    pub image_url: String,
}

/// 搜索结果排序方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// 按工作年限倒序
    #[default]
    Experience,
    /// 按姓名正序
    Name,
}

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest<'a> {
    pub query: &'a str,
    pub numeric_id: u32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ExplainResponse {
    pub explanation: String,
}

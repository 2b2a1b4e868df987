use crate::entitys::search_entity::{ExplainRequest, ExplainResponse, SearchRequest, SearchResponse, SearchResult, SortBy};
use async_trait::async_trait;
use common::config::UpstreamConfig;
use common::errors::AppError;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_IMAGE_URL: &str = "/images/default.jpg";

/// 外部搜索 / 解释服务
#[async_trait]
pub trait UpstreamSearch: Send + Sync {
    /// `POST /search {query}` → `{results}`
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, AppError>;
    /// `POST /explain_individual {query, numericId}` → `{explanation}`
    async fn explain(&self, query: &str, numeric_id: u32) -> Result<String, AppError>;
}

/// 基于 reqwest 的上游实现
pub struct HttpUpstreamSearch {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUpstreamSearch {
    pub fn new(config: &UpstreamConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build http client: {}", e)))?;
        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, AppError>
    where
        B: serde::Serialize + Sync + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("[Upstream] POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamUnavailable(format!("{} returned {}", url, status)));
        }
        response.json::<R>().await.map_err(|e| AppError::UpstreamUnavailable(format!("{}: invalid body: {}", url, e)))
    }
}

#[async_trait]
impl UpstreamSearch for HttpUpstreamSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, AppError> {
        let response: SearchResponse = self.post("/search", &SearchRequest { query }).await?;
        Ok(response.results)
    }

    async fn explain(&self, query: &str, numeric_id: u32) -> Result<String, AppError> {
        let response: ExplainResponse = self.post("/explain_individual", &ExplainRequest { query, numeric_id }).await?;
        Ok(response.explanation)
    }
}

/// 搜索服务：上游失败时降级为空结果，不影响页面
pub struct SearchService {
    upstream: Arc<dyn UpstreamSearch>,
}

impl SearchService {
    pub fn new(upstream: Arc<dyn UpstreamSearch>) -> Self {
        Self { upstream }
    }

    pub async fn search(&self, query: &str, sort: SortBy) -> Vec<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let mut results = match self.upstream.search(query).await {
            Ok(results) => results,
            Err(e) => {
                warn!("[SearchService] 搜索降级为空结果: {}", e);
                return Vec::new();
            }
        };
        for result in results.iter_mut() {
            result.image_url = display_image_url(&result.id, result.profile_image.as_deref());
        }
        sort_results(&mut results, sort);
        results
    }

    pub async fn explain(&self, query: &str, numeric_id: u32) -> String {
        match self.upstream.explain(query, numeric_id).await {
            Ok(explanation) => explanation,
            Err(e) => {
                warn!("[SearchService] 解释降级为空: {}", e);
                String::new()
            }
        }
    }
}

/// 搜索结果头像：含 `random` 的外链原样保留，其他非空值用本地图片，缺失用默认图
pub fn display_image_url(id: &str, profile_image: Option<&str>) -> String {
    match profile_image.map(str::trim).filter(|s| !s.is_empty()) {
        Some(image) if image.contains("random") => image.to_string(),
        Some(_) => format!("/images/{}.jpg", id),
        None => DEFAULT_IMAGE_URL.to_string(),
    }
}

pub fn sort_results(results: &mut [SearchResult], sort: SortBy) {
    match sort {
        SortBy::Experience => results.sort_by(|a, b| b.experience.total_cmp(&a.experience)),
        SortBy::Name => results.sort_by(|a, b| a.name.cmp(&b.name)),
    }
}

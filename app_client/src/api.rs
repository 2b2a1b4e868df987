//! `/api/favorites` HTTP 客户端

use crate::error::ClientError;
use crate::model::FavoriteUser;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

const FAVORITES_PATH: &str = "/api/favorites";

/// 收藏服务端接口
#[async_trait]
pub trait FavoriteApi: Send + Sync {
    /// 完整收藏列表，最近收藏在前
    async fn list(&self) -> Result<Vec<FavoriteUser>, ClientError>;
    /// 返回服务端最新的收藏 ID 顺序
    async fn add(&self, user: &FavoriteUser) -> Result<Vec<String>, ClientError>;
    async fn remove(&self, user_id: &str) -> Result<Vec<String>, ClientError>;
    async fn is_favorited(&self, user_id: &str) -> Result<bool, ClientError>;
}

#[derive(Deserialize)]
struct UpdateResp {
    favorites: Vec<String>,
}

#[derive(Deserialize)]
struct ListResp {
    #[serde(default)]
    favorites: Vec<FavoriteUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckResp {
    #[serde(default)]
    is_favorited: bool,
}

#[derive(Deserialize, Default)]
struct ErrorResp {
    #[serde(default)]
    error: String,
    #[serde(default)]
    reason: String,
}

pub struct HttpFavoriteApi {
    client: reqwest::Client,
    api_base_url: String,
    token: Option<String>,
}

impl HttpFavoriteApi {
    /// `token` 作为 Bearer 会话令牌发送；为 None 时以匿名身份请求
    pub fn new(api_base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_base_url: api_base_url.trim_end_matches('/').to_string(), token })
    }

    fn url(&self) -> String {
        format!("{}{}", self.api_base_url, FAVORITES_PATH)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn post_update(&self, body: serde_json::Value) -> Result<Vec<String>, ClientError> {
        debug!("[FavoriteAPI] POST {} {}", FAVORITES_PATH, body);
        let response = self.authorize(self.client.post(self.url()).json(&body)).send().await?;
        let resp: UpdateResp = read_json(response).await?;
        Ok(resp.favorites)
    }
}

#[async_trait]
impl FavoriteApi for HttpFavoriteApi {
    async fn list(&self) -> Result<Vec<FavoriteUser>, ClientError> {
        let response = self.authorize(self.client.get(self.url())).send().await?;
        let resp: ListResp = read_json(response).await?;
        Ok(resp.favorites)
    }

    async fn add(&self, user: &FavoriteUser) -> Result<Vec<String>, ClientError> {
        self.post_update(json!({
            "userId": user.user_id,
            "name": user.name,
            "position": user.position,
            "department": user.department,
            "imageUrl": user.image_url,
            "action": "add",
        }))
        .await
    }

    async fn remove(&self, user_id: &str) -> Result<Vec<String>, ClientError> {
        self.post_update(json!({ "userId": user_id, "action": "remove" })).await
    }

    async fn is_favorited(&self, user_id: &str) -> Result<bool, ClientError> {
        let request = self.client.get(self.url()).query(&[("userId", user_id)]);
        let response = self.authorize(request).send().await?;
        let resp: CheckResp = read_json(response).await?;
        Ok(resp.is_favorited)
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    if status.is_success() {
        return Ok(serde_json::from_slice(&body)?);
    }

    let err: ErrorResp = serde_json::from_slice(&body).unwrap_or_default();
    warn!("[FavoriteAPI] 请求失败，HTTP状态: {}, 响应: {}", status, err.error);
    Err(classify(status, err))
}

fn classify(status: StatusCode, err: ErrorResp) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::BAD_REQUEST if err.reason == "already_favorited" || err.error == "Already in favorites" => ClientError::AlreadyFavorited,
        _ => ClientError::Rejected { status: status.as_u16(), message: err.error },
    }
}

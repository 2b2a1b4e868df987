use common::Identity;
use common::config::{AuthConfig, AuthMode};
use common::errors::AppError;
use common::redis::KvStore;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 会话有效期（秒）
pub const SESSION_EXPIRE_SECS: u64 = 60 * 60 * 24 * 7;

/// 从请求中提取到的原始凭证，由 HTTP 层填充
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// `Authorization: Bearer <token>` 或会话 Cookie
    pub session_token: Option<String>,
    /// 认证代理写入的身份头
    pub trusted_identity: Option<String>,
}

/// Redis 中保存的会话
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionInfo {
    pub email: String,
}

/// 认证协作方：给出调用方身份，或者没有身份
pub struct IdentityService {
    config: AuthConfig,
    store: Arc<dyn KvStore>,
}

impl IdentityService {
    pub fn new(config: AuthConfig, store: Arc<dyn KvStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    fn session_key(&self, token: &str) -> String {
        format!("{}{}", self.config.session_prefix, token)
    }

    /// 解析调用方身份；凭证缺失、会话不存在或已过期时返回 `None`
    pub async fn resolve(&self, credentials: &Credentials) -> Result<Option<Identity>, AppError> {
        match self.config.mode {
            AuthMode::Header => Ok(credentials.trusted_identity.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)),
            AuthMode::Session => {
                let Some(token) = credentials.session_token.as_deref().filter(|t| !t.is_empty()) else {
                    return Ok(None);
                };
                let Some(raw) = self.store.get(&self.session_key(token)).await? else {
                    debug!("[IdentityService] 会话不存在或已过期");
                    return Ok(None);
                };
                match serde_json::from_str::<SessionInfo>(&raw) {
                    Ok(session) if !session.email.is_empty() => Ok(Some(session.email)),
                    _ => {
                        debug!("[IdentityService] 会话内容无法解析");
                        Ok(None)
                    }
                }
            }
        }
    }

    /// 写入会话（由登录流程或测试调用）
    pub async fn store_session(&self, token: &str, session: &SessionInfo) -> Result<(), AppError> {
        let value = serde_json::to_string(session)?;
        self.store.set_ex(&self.session_key(token), &value, SESSION_EXPIRE_SECS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::redis::MemoryStore;

    fn service(mode: AuthMode) -> IdentityService {
        let config = AuthConfig { mode, ..Default::default() };
        IdentityService::new(config, Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn session_token_resolves_email() {
        let service = service(AuthMode::Session);
        service.store_session("t1", &SessionInfo { email: "kim@posco.com".into() }).await.unwrap();

        let found = service.resolve(&Credentials { session_token: Some("t1".into()), ..Default::default() }).await.unwrap();
        assert_eq!(found.as_deref(), Some("kim@posco.com"));

        let unknown = service.resolve(&Credentials { session_token: Some("t2".into()), ..Default::default() }).await.unwrap();
        assert_eq!(unknown, None);
        assert_eq!(service.resolve(&Credentials::default()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn session_mode_ignores_trusted_header() {
        let service = service(AuthMode::Session);
        let creds = Credentials { trusted_identity: Some("kim@posco.com".into()), ..Default::default() };
        assert_eq!(service.resolve(&creds).await.unwrap(), None);
    }

    #[tokio::test]
    async fn header_mode_trims_and_rejects_blank() {
        let service = service(AuthMode::Header);
        let creds = Credentials { trusted_identity: Some(" lee@posco.com ".into()), ..Default::default() };
        assert_eq!(service.resolve(&creds).await.unwrap().as_deref(), Some("lee@posco.com"));

        let blank = Credentials { trusted_identity: Some("  ".into()), ..Default::default() };
        assert_eq!(service.resolve(&blank).await.unwrap(), None);
    }
}

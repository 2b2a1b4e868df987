use crate::result::AppState;
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use biz_service::biz_service::identity_service::Credentials;
use common::Identity;
use common::config::AuthConfig;
use common::errors::AppError;
use futures_util::future::LocalBoxFuture;

/// 当前调用方；匿名时为 `None`
///
/// 读接口对匿名调用降级（空列表），写接口通过 [`Caller::require`] 拒绝。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub Option<Identity>);

impl Caller {
    pub fn identity(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn require(&self) -> Result<&str, AppError> {
        self.identity().ok_or(AppError::Unauthorized)
    }
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            return Box::pin(async { Err(AppError::Internal("AppState is not configured".to_string())) });
        };
        let credentials = build_credentials(req, state.identity_service.config());
        Box::pin(async move {
            let identity = state.identity_service.resolve(&credentials).await?;
            Ok(Caller(identity))
        })
    }
}

/// 从 Header / Cookie 提取凭证，统一小写头名
pub fn build_credentials(req: &HttpRequest, config: &AuthConfig) -> Credentials {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let session_token = bearer.or_else(|| req.cookie(&config.session_cookie).map(|c| c.value().to_string()));

    let trusted_identity = req
        .headers()
        .get(config.header_name.to_ascii_lowercase().as_str())
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    Credentials { session_token, trusted_identity }
}

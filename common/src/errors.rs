use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use deadpool_redis::PoolError;
use deadpool_redis::redis::RedisError;
use log::error;
use serde::Serialize;
use thiserror::Error;

/// HTTP 错误响应结构
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    /// 机器可读的错误原因，便于前端区分处理
    reason: &'static str,
}

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    // ==== 常规业务错误 ====
    #[error("Not authenticated")]
    Unauthorized,

    #[error("Already in favorites")]
    AlreadyFavorited,

    #[error("Resource not found")]
    NotFound,

    #[error("Bad request: {0}")]
    Validation(String),

    // ==== 外部依赖错误 ====
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    // ==== 系统错误 ====
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn reason(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "unauthorized",
            AppError::AlreadyFavorited => "already_favorited",
            AppError::NotFound => "not_found",
            AppError::Validation(_) => "validation",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::UpstreamUnavailable(_) => "upstream_unavailable",
            AppError::Json(_) | AppError::Internal(_) => "internal",
        }
    }
}

impl From<RedisError> for AppError {
    fn from(e: RedisError) -> Self {
        AppError::StoreUnavailable(e.to_string())
    }
}
impl From<PoolError> for AppError {
    fn from(e: PoolError) -> Self {
        AppError::StoreUnavailable(e.to_string())
    }
}
impl From<tokio::time::error::Elapsed> for AppError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        AppError::StoreUnavailable("operation timed out".to_string())
    }
}
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::AlreadyFavorited | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::Json(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let msg = match self {
            AppError::StoreUnavailable(e) => {
                error!("store error: {}", e);
                "Store unavailable".to_string()
            }
            AppError::UpstreamUnavailable(e) => {
                error!("upstream error: {}", e);
                "Upstream unavailable".to_string()
            }
            AppError::Json(e) => {
                error!("{:?}", e);
                "Service error".to_string()
            }
            AppError::Internal(e) => {
                error!("{:?}", e);
                "Service error".to_string()
            }
            e => e.to_string(),
        };

        HttpResponse::build(status).json(ErrorResponse { error: msg, reason: self.reason() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_contract_messages() {
        assert_eq!(AppError::Unauthorized.to_string(), "Not authenticated");
        assert_eq!(AppError::AlreadyFavorited.to_string(), "Already in favorites");
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::AlreadyFavorited.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_are_service_unavailable() {
        let err = AppError::StoreUnavailable("connection refused".into());
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.reason(), "store_unavailable");
    }
}

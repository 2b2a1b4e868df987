pub mod common_handler;
pub mod favorite_handler;
pub mod profile_handler;
pub mod search_handler;
pub mod swagger;

use actix_web::web;
use common::errors::AppError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // 请求体 / 查询参数解析失败统一返回 400 {error, reason}
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into()));
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into()));

    common_handler::configure(cfg);
    favorite_handler::configure(cfg);
    search_handler::configure(cfg);
    profile_handler::configure(cfg);
    swagger::configure(cfg);
}

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use app_api::handlers;
use app_api::result::AppState;
use biz_service::biz_service::profile_service::ProfileService;
use biz_service::biz_service::search_service::HttpUpstreamSearch;
use common::config::{AppConfig, DEFAULT_CONFIG_FILE};
use common::redis::RedisStore;
use common::redis::redis_pool::build_redis_pool;
use log::{LevelFilter, warn};
use std::io;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 读取配置文件
    let config_file = std::env::var("APP_CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let app_cfg = AppConfig::new(&config_file).map_err(io::Error::other)?;
    //初始化日志
    init_log(&app_cfg);

    let redis_cfg = app_cfg.get_redis();
    let pool = build_redis_pool(&redis_cfg).map_err(io::Error::other)?;
    let store = Arc::new(RedisStore::new(pool, Duration::from_millis(redis_cfg.timeout_ms)));
    let upstream = Arc::new(HttpUpstreamSearch::new(&app_cfg.get_upstream()).map_err(io::Error::other)?);
    let profiles = ProfileService::load(app_cfg.get_profile().data_path).map_err(io::Error::other)?;

    let state = web::Data::new(AppState::new(app_cfg.get_auth(), store, upstream, profiles));
    let address_and_port = format!("{}:{}", app_cfg.get_server().host, app_cfg.get_server().port);
    warn!("Starting server on {}", address_and_port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            // 配置 控制器
            .configure(handlers::configure)
    })
    .keep_alive(actix_web::http::KeepAlive::Timeout(Duration::from_secs(600))) // 允许 10 分钟超时
    .bind(address_and_port)?
    .run()
    .await
}

pub fn init_log(config: &AppConfig) {
    let mut builder = env_logger::Builder::new();
    let log_level = LevelFilter::from_str(&config.get_sys().log_leve).unwrap_or(LevelFilter::Info);
    // RUST_LOG 可覆盖配置
    builder.filter_level(log_level).parse_default_env().init();
}

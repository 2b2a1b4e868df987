use crate::config::RedisConfig;
use anyhow::{Context, Result};
use deadpool_redis::{Config, Pool, PoolConfig, Runtime, Timeouts};
use std::time::Duration;

/// 按配置构建 Redis 连接池（程序启动时调用一次）
pub fn build_redis_pool(config: &RedisConfig) -> Result<Pool> {
    let mut cfg = Config::from_url(config.url.clone());

    let timeout = Duration::from_millis(config.timeout_ms);
    let mut timeouts = Timeouts::default();
    timeouts.wait = Some(timeout);
    timeouts.create = Some(timeout);
    timeouts.recycle = Some(timeout);

    let mut pool_config = PoolConfig::new(config.pool_size.max(1));
    pool_config.timeouts = timeouts;
    cfg.pool = Some(pool_config);

    cfg.create_pool(Some(Runtime::Tokio1)).with_context(|| format!("Failed to create Redis connection pool for {}", config.url))
}

use crate::errors::AppError;
use crate::redis::kv_store::{KvStore, WriteOp};
use async_trait::async_trait;
use deadpool_redis::Pool;
use deadpool_redis::redis::{AsyncCommands, Pipeline, cmd, pipe};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

/// WATCH 冲突后的最大重试次数
const WATCH_RETRIES: usize = 5;

/// 基于 deadpool-redis 的存储实现，每次调用都有超时上限
#[derive(Clone)]
pub struct RedisStore {
    pool: Pool,
    timeout: Duration,
}

impl RedisStore {
    pub fn new(pool: Pool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        tokio::time::timeout(self.timeout, fut).await?
    }

    fn build_pipeline(ops: &[WriteOp]) -> Pipeline {
        let mut pipeline = pipe();
        pipeline.atomic();
        for op in ops {
            match op {
                WriteOp::SAdd { key, member } => {
                    pipeline.sadd(key, member).ignore();
                }
                WriteOp::SRem { key, member } => {
                    pipeline.srem(key, member).ignore();
                }
                WriteOp::ZAdd { key, member, score } => {
                    pipeline.zadd(key, member, *score).ignore();
                }
                WriteOp::ZRem { key, member } => {
                    pipeline.zrem(key, member).ignore();
                }
                WriteOp::HSet { key, fields } => {
                    // HSET 至少需要一个字段
                    if !fields.is_empty() {
                        pipeline.hset_multiple(key, fields.as_slice()).ignore();
                    }
                }
                WriteOp::Del { key } => {
                    pipeline.del(key).ignore();
                }
            }
        }
        pipeline
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn sismember(&self, key: &str, member: &str) -> Result<bool, AppError> {
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            let exists: bool = conn.sismember(key, member).await?;
            Ok(exists)
        })
        .await
    }

    async fn zrevrange(&self, key: &str) -> Result<Vec<String>, AppError> {
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            let members: Vec<String> = conn.zrevrange(key, 0, -1).await?;
            Ok(members)
        })
        .await
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, AppError> {
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            let fields: HashMap<String, String> = conn.hgetall(key).await?;
            Ok(fields)
        })
        .await
    }

    async fn hgetall_many(&self, keys: &[String]) -> Result<Vec<HashMap<String, String>>, AppError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            let mut pipeline = pipe();
            for key in keys {
                pipeline.hgetall(key);
            }
            let rows: Vec<HashMap<String, String>> = pipeline.query_async(&mut conn).await?;
            Ok(rows)
        })
        .await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            let value: Option<String> = conn.get(key).await?;
            Ok(value)
        })
        .await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), AppError> {
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            let _: () = conn.set_ex(key, value, ttl_secs).await?;
            Ok(())
        })
        .await
    }

    async fn exec(&self, ops: Vec<WriteOp>) -> Result<(), AppError> {
        if ops.is_empty() {
            return Ok(());
        }
        let pipeline = Self::build_pipeline(&ops);
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            let _: () = pipeline.query_async(&mut conn).await?;
            Ok(())
        })
        .await
    }

    async fn exec_unless_member(&self, key: &str, member: &str, ops: Vec<WriteOp>) -> Result<bool, AppError> {
        let pipeline = Self::build_pipeline(&ops);
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            for _ in 0..WATCH_RETRIES {
                let _: () = cmd("WATCH").arg(key).query_async(&mut conn).await?;
                let exists: bool = conn.sismember(key, member).await?;
                if exists {
                    let _: () = cmd("UNWATCH").query_async(&mut conn).await?;
                    return Ok(false);
                }
                // key 在 WATCH 之后被改动时 EXEC 返回 nil
                let committed: Option<()> = pipeline.query_async(&mut conn).await?;
                if committed.is_some() {
                    return Ok(true);
                }
            }
            Err(AppError::StoreUnavailable(format!("{} kept changing during write", key)))
        })
        .await
    }
}

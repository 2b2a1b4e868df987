use crate::errors::AppError;
use async_trait::async_trait;
use std::collections::HashMap;

/// 写操作，`KvStore::exec` 以一个整体提交
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// SADD
    SAdd { key: String, member: String },
    /// SREM，成员不存在时无副作用
    SRem { key: String, member: String },
    /// ZADD，score 为毫秒时间戳
    ZAdd { key: String, member: String, score: i64 },
    /// ZREM
    ZRem { key: String, member: String },
    /// HSET 多字段
    HSet { key: String, fields: Vec<(String, String)> },
    /// DEL
    Del { key: String },
}

/// 键值存储适配层：集合 / 有序集合 / 哈希 / 字符串
///
/// 单个调用在单 key 上原子；跨 key 的一致性由 `exec` 提供。
#[async_trait]
pub trait KvStore: Send + Sync {
    /// 判断集合成员（SISMEMBER）
    async fn sismember(&self, key: &str, member: &str) -> Result<bool, AppError>;

    /// 按 score 从高到低返回有序集合的全部成员（ZREVRANGE 0 -1）
    async fn zrevrange(&self, key: &str) -> Result<Vec<String>, AppError>;

    /// 获取哈希全部字段（HGETALL），key 不存在时返回空表
    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, AppError>;

    /// 批量 HGETALL，结果顺序与 `keys` 一致
    async fn hgetall_many(&self, keys: &[String]) -> Result<Vec<HashMap<String, String>>, AppError> {
        let mut result = Vec::with_capacity(keys.len());
        for key in keys {
            result.push(self.hgetall(key).await?);
        }
        Ok(result)
    }

    /// GET
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// SETEX（秒）
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), AppError>;

    /// 原子提交一组写操作（MULTI / EXEC）
    async fn exec(&self, ops: Vec<WriteOp>) -> Result<(), AppError>;

    /// 仅当 `member` 不在集合 `key` 中时原子提交 `ops`，返回是否已提交。
    /// 检查与写入之间集合不会被其他调用方改变。
    async fn exec_unless_member(&self, key: &str, member: &str, ops: Vec<WriteOp>) -> Result<bool, AppError>;
}

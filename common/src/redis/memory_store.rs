use crate::errors::AppError;
use crate::redis::kv_store::{KvStore, WriteOp};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct MemoryData {
    sets: HashMap<String, HashSet<String>>,
    zsets: HashMap<String, HashMap<String, i64>>,
    hashes: HashMap<String, HashMap<String, String>>,
    strings: HashMap<String, (String, Option<Instant>)>,
}

impl MemoryData {
    fn apply(&mut self, op: WriteOp) {
        match op {
            WriteOp::SAdd { key, member } => {
                self.sets.entry(key).or_default().insert(member);
            }
            WriteOp::SRem { key, member } => {
                if let Some(set) = self.sets.get_mut(&key) {
                    set.remove(&member);
                    if set.is_empty() {
                        self.sets.remove(&key);
                    }
                }
            }
            WriteOp::ZAdd { key, member, score } => {
                self.zsets.entry(key).or_default().insert(member, score);
            }
            WriteOp::ZRem { key, member } => {
                if let Some(zset) = self.zsets.get_mut(&key) {
                    zset.remove(&member);
                    if zset.is_empty() {
                        self.zsets.remove(&key);
                    }
                }
            }
            WriteOp::HSet { key, fields } => {
                if !fields.is_empty() {
                    self.hashes.entry(key).or_default().extend(fields);
                }
            }
            WriteOp::Del { key } => {
                self.sets.remove(&key);
                self.zsets.remove(&key);
                self.hashes.remove(&key);
                self.strings.remove(&key);
            }
        }
    }
}

/// 进程内存储，语义与 Redis 保持一致，用于测试及无 Redis 的本地开发
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<MemoryData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前存在的所有 key，便于测试断言“无写入”
    pub async fn keys(&self) -> Vec<String> {
        let data = self.data.lock().await;
        let mut keys: Vec<String> = data
            .sets
            .keys()
            .chain(data.zsets.keys())
            .chain(data.hashes.keys())
            .chain(data.strings.keys())
            .cloned()
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn sismember(&self, key: &str, member: &str) -> Result<bool, AppError> {
        let data = self.data.lock().await;
        Ok(data.sets.get(key).is_some_and(|set| set.contains(member)))
    }

    async fn zrevrange(&self, key: &str) -> Result<Vec<String>, AppError> {
        let data = self.data.lock().await;
        let Some(zset) = data.zsets.get(key) else {
            return Ok(Vec::new());
        };
        let mut entries: Vec<(&String, &i64)> = zset.iter().collect();
        // 与 Redis 一致：score 相同时按成员字典序，倒序遍历
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| b.0.cmp(a.0)));
        Ok(entries.into_iter().map(|(member, _)| member.clone()).collect())
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, AppError> {
        let data = self.data.lock().await;
        Ok(data.hashes.get(key).cloned().unwrap_or_default())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut data = self.data.lock().await;
        let expired = match data.strings.get(key) {
            Some((_, Some(deadline))) => *deadline <= Instant::now(),
            Some((_, None)) => false,
            None => return Ok(None),
        };
        if expired {
            data.strings.remove(key);
            return Ok(None);
        }
        Ok(data.strings.get(key).map(|(value, _)| value.clone()))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), AppError> {
        let mut data = self.data.lock().await;
        let deadline = Instant::now() + Duration::from_secs(ttl_secs);
        data.strings.insert(key.to_string(), (value.to_string(), Some(deadline)));
        Ok(())
    }

    async fn exec(&self, ops: Vec<WriteOp>) -> Result<(), AppError> {
        let mut data = self.data.lock().await;
        for op in ops {
            data.apply(op);
        }
        Ok(())
    }

    async fn exec_unless_member(&self, key: &str, member: &str, ops: Vec<WriteOp>) -> Result<bool, AppError> {
        let mut data = self.data.lock().await;
        if data.sets.get(key).is_some_and(|set| set.contains(member)) {
            return Ok(false);
        }
        for op in ops {
            data.apply(op);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zadd(key: &str, member: &str, score: i64) -> WriteOp {
        WriteOp::ZAdd { key: key.into(), member: member.into(), score }
    }

    #[tokio::test]
    async fn zrevrange_orders_by_score_then_member() {
        let store = MemoryStore::new();
        store.exec(vec![zadd("z", "a", 10), zadd("z", "b", 30), zadd("z", "c", 20), zadd("z", "d", 20)]).await.unwrap();
        assert_eq!(store.zrevrange("z").await.unwrap(), vec!["b", "d", "c", "a"]);
    }

    #[tokio::test]
    async fn removing_missing_members_is_noop() {
        let store = MemoryStore::new();
        store
            .exec(vec![
                WriteOp::SRem { key: "s".into(), member: "x".into() },
                WriteOp::ZRem { key: "z".into(), member: "x".into() },
                WriteOp::Del { key: "h".into() },
            ])
            .await
            .unwrap();
        assert!(store.keys().await.is_empty());
    }

    #[tokio::test]
    async fn hash_fields_merge_and_delete() {
        let store = MemoryStore::new();
        store.exec(vec![WriteOp::HSet { key: "h".into(), fields: vec![("name".into(), "Kim".into())] }]).await.unwrap();
        assert_eq!(store.hgetall("h").await.unwrap().get("name").map(String::as_str), Some("Kim"));

        store.exec(vec![WriteOp::Del { key: "h".into() }]).await.unwrap();
        assert!(store.hgetall("h").await.unwrap().is_empty());
        assert_eq!(store.hgetall_many(&["h".to_string(), "x".to_string()]).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn expired_strings_disappear() {
        let store = MemoryStore::new();
        store.set_ex("k", "v", 0).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set_ex("k", "v", 60).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn conditional_exec_skips_existing_member() {
        let store = MemoryStore::new();
        let sadd = |score| vec![WriteOp::SAdd { key: "s".into(), member: "x".into() }, zadd("z", "x", score)];

        assert!(store.exec_unless_member("s", "x", sadd(1)).await.unwrap());
        assert!(!store.exec_unless_member("s", "x", sadd(2)).await.unwrap());
        // 第二次提交未生效，score 保持不变
        store.exec(vec![zadd("z", "y", 1)]).await.unwrap();
        assert_eq!(store.zrevrange("z").await.unwrap(), vec!["y", "x"]);
    }
}

pub mod kv_store;
pub mod memory_store;
pub mod redis_pool;
pub mod redis_store;

pub use kv_store::{KvStore, WriteOp};
pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

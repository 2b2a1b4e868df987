//! 收藏缓存的本地持久化

use crate::error::ClientError;
use crate::model::FavoriteUser;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// 持久化文件名
pub const STORAGE_NAME: &str = "favorites-storage";
const STORAGE_VERSION: u32 = 0;

#[async_trait]
pub trait FavoriteStorage: Send + Sync {
    /// 尚未持久化过时返回空列表
    async fn load(&self) -> Result<Vec<FavoriteUser>, ClientError>;
    async fn save(&self, favorites: &[FavoriteUser]) -> Result<(), ClientError>;
}

#[derive(Serialize, Deserialize, Default)]
struct PersistedState {
    #[serde(default)]
    favorites: Vec<FavoriteUser>,
}

/// `{"state":{"favorites":[...]},"version":0}`
#[derive(Serialize, Deserialize, Default)]
struct PersistedEnvelope {
    #[serde(default)]
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

/// 保存在 `<dir>/favorites-storage.json`
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(format!("{}.json", STORAGE_NAME)) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FavoriteStorage for FileStorage {
    async fn load(&self) -> Result<Vec<FavoriteUser>, ClientError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let envelope: PersistedEnvelope = serde_json::from_slice(&raw)?;
        Ok(envelope.state.favorites)
    }

    async fn save(&self, favorites: &[FavoriteUser]) -> Result<(), ClientError> {
        let envelope = PersistedEnvelope { state: PersistedState { favorites: favorites.to_vec() }, version: STORAGE_VERSION };
        let raw = serde_json::to_vec(&envelope)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // 先写临时文件再改名，避免半截文件
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    favorites: Mutex<Vec<FavoriteUser>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(favorites: Vec<FavoriteUser>) -> Self {
        Self { favorites: Mutex::new(favorites) }
    }
}

#[async_trait]
impl FavoriteStorage for MemoryStorage {
    async fn load(&self) -> Result<Vec<FavoriteUser>, ClientError> {
        Ok(self.favorites.lock().await.clone())
    }

    async fn save(&self, favorites: &[FavoriteUser]) -> Result<(), ClientError> {
        *self.favorites.lock().await = favorites.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_storage_uses_persisted_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.load().await.unwrap().is_empty());

        let favorites = vec![FavoriteUser { name: Some("Ahn".into()), ..FavoriteUser::bare("KEYMAN002") }, FavoriteUser::bare("KEYMAN001")];
        storage.save(&favorites).await.unwrap();

        let raw: serde_json::Value = serde_json::from_slice(&std::fs::read(storage.path()).unwrap()).unwrap();
        assert_eq!(raw["version"], 0);
        assert_eq!(raw["state"]["favorites"][0]["userId"], "KEYMAN002");
        assert_eq!(raw["state"]["favorites"][0]["name"], "Ahn");

        let reopened = FileStorage::new(dir.path());
        assert_eq!(reopened.load().await.unwrap(), favorites);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        std::fs::write(storage.path(), b"{not json").unwrap();
        assert!(matches!(storage.load().await, Err(ClientError::Json(_))));
    }
}

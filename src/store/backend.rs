use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use sha2::{Digest, Sha256};
use crate::error::PlannerError;

/// Namespace prefix applied to every stored key
pub const KEY_PREFIX: &str = "pp_";

fn storage_key(key: &str) -> String {
    format!("{}{}", KEY_PREFIX, key)
}

/// Whole-document key-value persistence. Values are JSON documents.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, PlannerError>;

    async fn set(&self, key: &str, value: &Value) -> Result<(), PlannerError>;

    async fn remove(&self, key: &str) -> Result<(), PlannerError>;
}

/// Process-local store, used by tests and ephemeral sessions
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, PlannerError> {
        Ok(self.entries.read().get(&storage_key(key)).cloned())
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), PlannerError> {
        self.entries.write().insert(storage_key(key), value.clone());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PlannerError> {
        self.entries.write().remove(&storage_key(key));
        Ok(())
    }
}

/// One pretty-printed JSON file per key, named by the SHA-256 of the prefixed key
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(storage_key(key).as_bytes());
        self.dir.join(format!("{:x}.json", hasher.finalize()))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, PlannerError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    // Unreadable documents behave like missing ones
                    tracing::warn!(
                        key = key,
                        path = ?path,
                        error = %e,
                        "Failed to parse stored document, treating as absent"
                    );
                    Ok(None)
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PlannerError::new(
                format!("Failed to read stored document: {}", e),
                "io"
            ).with_context(format!("path: {:?}", path))),
        }
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), PlannerError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PlannerError::new(
                format!("Failed to create directory: {}", e),
                "io"
            ).with_context(format!("path: {:?}", self.dir)))?;

        let json = serde_json::to_string_pretty(value)
            .map_err(|e| PlannerError::new(
                format!("Failed to serialize document: {}", e),
                "json_serialize"
            ))?;

        let path = self.path_for(key);
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| PlannerError::new(
                format!("Failed to write stored document: {}", e),
                "io"
            ).with_context(format!("path: {:?}", path)))?;

        tracing::debug!(key = key, path = ?path, "Stored document");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PlannerError> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PlannerError::new(
                format!("Failed to remove stored document: {}", e),
                "io"
            ).with_context(format!("path: {:?}", path))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn memory_store_prefixes_keys() {
        let store = MemoryStore::new();
        store.set("user_1", &json!({"id": "1"})).await.unwrap();
        assert_eq!(store.keys(), vec!["pp_user_1"]);
        assert_eq!(store.get("user_1").await.unwrap(), Some(json!({"id": "1"})));

        store.remove("user_1").await.unwrap();
        assert!(store.get("user_1").await.unwrap().is_none());
    }

    #[test]
    fn file_names_are_hashed() {
        let store = FileStore::new("/tmp/palate");
        let path = store.path_for("user_demo_user");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(name.len(), 64 + ".json".len());
        assert_ne!(path, store.path_for("current_user"));
    }
}

//! Local-filesystem storage driver.

use std::path::{Path, PathBuf};

use crate::{ObjectStorage, StorageError, LOCAL_PREFIX};

/// Stores objects as plain files under a root directory. Keys may contain
/// `/` separators; parent directories are created on demand.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a stored key to a path under the root, rejecting keys from
    /// other backends and path-traversal components.
    fn path_for(&self, stored_key: &str) -> Result<PathBuf, StorageError> {
        let key = stored_key
            .strip_prefix(LOCAL_PREFIX)
            .ok_or_else(|| StorageError::ForeignKey(stored_key.to_string(), "local"))?;
        Self::checked_join(&self.root, key)
    }

    fn checked_join(root: &Path, key: &str) -> Result<PathBuf, StorageError> {
        if key.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(root.join(key))
    }
}

#[async_trait::async_trait]
impl ObjectStorage for LocalStorage {
    async fn put(&self, bytes: &[u8], key: &str) -> Result<String, StorageError> {
        let path = Self::checked_join(&self.root, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(format!("{LOCAL_PREFIX}{key}"))
    }

    async fn get(&self, stored_key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(stored_key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(stored_key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, stored_key: &str) -> Result<(), StorageError> {
        let path = self.path_for(stored_key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(stored_key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

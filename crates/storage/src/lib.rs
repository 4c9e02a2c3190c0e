//! Object storage drivers for media files.
//!
//! Stored keys are prefixed with the backend that holds the bytes
//! (`local:albums/ab.jpg`, `s3:albums/ab.jpg`) so a record always knows
//! where its file lives, even if the active driver changes later.
//!
//! One driver is active per process, selected by `STORAGE_DRIVER`
//! (`local`, the default, or `s3`).

pub mod local;
pub mod s3;

use std::sync::Arc;

pub use local::LocalStorage;
pub use s3::S3Storage;

/// Prefix marking a key held by the local-filesystem driver.
pub const LOCAL_PREFIX: &str = "local:";

/// Prefix marking a key held by the S3 driver.
pub const S3_PREFIX: &str = "s3:";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The stored key's backend prefix does not match the active driver.
    #[error("Stored key '{0}' does not belong to the {1} driver")]
    ForeignKey(String, &'static str),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),
}

/// A storage backend for raw media bytes.
///
/// `put` takes a bare key and returns the driver-prefixed stored key;
/// `get` and `delete` take the prefixed stored key back.
#[async_trait::async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(&self, bytes: &[u8], key: &str) -> Result<String, StorageError>;

    async fn get(&self, stored_key: &str) -> Result<Vec<u8>, StorageError>;

    async fn delete(&self, stored_key: &str) -> Result<(), StorageError>;
}

/// Map a stored key to the URL path clients fetch it from.
///
/// Unprefixed keys are passed through untouched (legacy rows).
pub fn resolve_url(stored_key: &str) -> String {
    if let Some(key) = stored_key.strip_prefix(S3_PREFIX) {
        format!("/media/s3/{key}")
    } else if let Some(key) = stored_key.strip_prefix(LOCAL_PREFIX) {
        format!("/media/local/{key}")
    } else {
        stored_key.to_string()
    }
}

/// Build the storage driver from environment variables.
///
/// | Env Var             | Default      | Used by |
/// |---------------------|--------------|---------|
/// | `STORAGE_DRIVER`    | `local`      | both    |
/// | `LOCAL_STORAGE_DIR` | `./.storage` | local   |
/// | `S3_BUCKET`         | --           | s3      |
/// | `S3_ENDPOINT`       | --           | s3      |
///
/// # Panics
///
/// Panics on an unknown driver name or (for s3) a missing `S3_BUCKET`.
/// Misconfiguration should fail at startup, not on first upload.
pub async fn from_env() -> Arc<dyn ObjectStorage> {
    let driver = std::env::var("STORAGE_DRIVER").unwrap_or_else(|_| "local".into());
    match driver.as_str() {
        "local" => {
            let dir = std::env::var("LOCAL_STORAGE_DIR").unwrap_or_else(|_| "./.storage".into());
            tracing::info!(dir = %dir, "Using local storage driver");
            Arc::new(LocalStorage::new(dir))
        }
        "s3" => {
            let bucket = std::env::var("S3_BUCKET")
                .expect("S3_BUCKET must be set when STORAGE_DRIVER=s3");
            let storage = S3Storage::from_env(bucket).await;
            tracing::info!(bucket = %storage.bucket(), "Using S3 storage driver");
            Arc::new(storage)
        }
        other => panic!("Unknown STORAGE_DRIVER '{other}'. Must be 'local' or 's3'"),
    }
}

//! S3-compatible storage driver.
//!
//! Works against AWS S3 or any S3-compatible endpoint (MinIO, R2) via
//! `S3_ENDPOINT`. Credentials and region come from the standard AWS
//! environment / profile chain.

use aws_sdk_s3::primitives::ByteStream;

use crate::{ObjectStorage, StorageError, S3_PREFIX};

pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Storage {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Build a client from the ambient AWS configuration, honouring an
    /// optional custom `S3_ENDPOINT` (path-style addressing for MinIO
    /// compatibility).
    pub async fn from_env(bucket: String) -> Self {
        let base = aws_config::load_from_env().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&base);
        if let Ok(endpoint) = std::env::var("S3_ENDPOINT") {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = aws_sdk_s3::Client::from_conf(builder.build());
        Self::new(client, bucket)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn bare_key<'a>(&self, stored_key: &'a str) -> Result<&'a str, StorageError> {
        stored_key
            .strip_prefix(S3_PREFIX)
            .ok_or_else(|| StorageError::ForeignKey(stored_key.to_string(), "s3"))
    }
}

#[async_trait::async_trait]
impl ObjectStorage for S3Storage {
    async fn put(&self, bytes: &[u8], key: &str) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;
        Ok(format!("{S3_PREFIX}{key}"))
    }

    async fn get(&self, stored_key: &str) -> Result<Vec<u8>, StorageError> {
        let key = self.bare_key(stored_key)?;
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    StorageError::NotFound(stored_key.to_string())
                } else {
                    StorageError::S3(service_err.to_string())
                }
            })?;
        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;
        Ok(bytes.into_bytes().to_vec())
    }

    async fn delete(&self, stored_key: &str) -> Result<(), StorageError> {
        let key = self.bare_key(stored_key)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;
        Ok(())
    }
}

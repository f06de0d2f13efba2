//! Object storage adapter.
//!
//! Wraps an S3-compatible bucket behind opendal. Uploads land under a
//! fixed prefix; downloads go through time-limited presigned URLs so the
//! API never proxies file bytes.

use std::time::Duration;

use opendal::{services::S3, Operator};

use crate::config::{Config, STORAGE_PRESIGN_TTL_SECONDS};
use crate::errors::AppResult;

/// Presigned download handle
#[derive(Debug, Clone)]
pub struct SignedUrl {
    pub url: String,
    /// Seconds until the URL stops working
    pub expires: u64,
}

/// S3-compatible object storage wrapper.
#[derive(Clone)]
pub struct FileStorage {
    op: Operator,
}

impl FileStorage {
    /// Build the operator from configuration.
    pub fn connect(config: &Config) -> AppResult<Self> {
        let (access_key, secret_key) = config.storage_credentials();

        let op = Operator::new(
            S3::default()
                .endpoint(&config.storage_endpoint)
                .bucket(&config.storage_bucket)
                .region(&config.storage_region)
                .access_key_id(access_key)
                .secret_access_key(secret_key),
        )?
        .finish();

        Ok(Self { op })
    }

    /// Write an object.
    pub async fn store(&self, key: &str, bytes: Vec<u8>) -> AppResult<()> {
        self.op.write(key, bytes).await?;
        Ok(())
    }

    /// Presign a read for the default TTL.
    pub async fn presigned_url(&self, key: &str) -> AppResult<SignedUrl> {
        let request = self
            .op
            .presign_read(key, Duration::from_secs(STORAGE_PRESIGN_TTL_SECONDS))
            .await?;

        Ok(SignedUrl {
            url: request.uri().to_string(),
            expires: STORAGE_PRESIGN_TTL_SECONDS,
        })
    }

    /// Check whether an object exists.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.op.is_exist(key).await?)
    }

    /// Delete an object.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        self.op.delete(key).await?;
        Ok(())
    }
}

#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageResult};
use std::sync::Arc;
use videocloud_core::Config;

/// Create the storage backend described by the configuration.
///
/// Credentials are resolved here so callers receive a ready-to-use client.
#[cfg(feature = "storage-s3")]
pub fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = S3Storage::new(
        config.s3_bucket.clone(),
        config.aws_region.clone(),
        config.s3_endpoint.clone(),
        config.aws_credentials.as_ref(),
        config.aws_max_attempts,
    )?;

    tracing::info!(
        bucket = %config.s3_bucket,
        region = %config.aws_region,
        endpoint = ?config.s3_endpoint,
        explicit_credentials = config.aws_credentials.is_some(),
        "S3 storage initialized"
    );

    Ok(Arc::new(storage))
}

#[cfg(not(feature = "storage-s3"))]
pub fn create_storage(_config: &Config) -> StorageResult<Arc<dyn Storage>> {
    Err(crate::StorageError::ConfigError(
        "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
    ))
}

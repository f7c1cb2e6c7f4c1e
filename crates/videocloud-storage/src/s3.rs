use crate::traits::{Storage, StorageError, StorageResult};
use crate::PresignOperation;
use async_trait::async_trait;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, Result as ObjectResult, RetryConfig};
use std::time::Duration;
use videocloud_core::config::AwsCredentials;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `credentials` - Explicit key pair; `None` uses the environment / instance credentials
    /// * `max_attempts` - Total attempts per request including the first one
    pub fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        credentials: Option<&AwsCredentials>,
        max_attempts: u32,
    ) -> StorageResult<Self> {
        let retry = RetryConfig {
            max_retries: max_attempts.saturating_sub(1) as usize,
            ..RetryConfig::default()
        };

        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone())
            .with_retry(retry);

        if let Some(creds) = credentials {
            builder = builder
                .with_access_key_id(creds.access_key_id.clone())
                .with_secret_access_key(creds.secret_access_key.clone());
        }

        if let Some(endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage { store, bucket })
    }

    /// Keys are taken literally; object_store's lossy encoding of `Path::from` would
    /// change names containing `%` or brackets, so the key must parse as-is.
    /// `Path::parse` still strips a trailing `/`, so the parsed path must match the key exactly.
    fn location(storage_key: &str) -> StorageResult<Path> {
        let path =
            Path::parse(storage_key).map_err(|e| StorageError::InvalidKey(e.to_string()))?;
        if path.as_ref() != storage_key {
            return Err(StorageError::InvalidKey(format!(
                "Key '{}' would be stored as '{}'",
                storage_key,
                path.as_ref()
            )));
        }
        Ok(path)
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn presigned_url(
        &self,
        operation: PresignOperation,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let location = Self::location(storage_key)?;
        let method = match operation {
            PresignOperation::Put => Method::PUT,
            PresignOperation::Get => Method::GET,
        };

        let url_result: ObjectResult<_> = self.store.signed_url(method, &location, expires_in).await;

        let url = url_result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                operation = operation.action(),
                "Couldn't get a presigned URL"
            );
            StorageError::SigningFailed {
                operation,
                key: storage_key.to_string(),
                message: e.to_string(),
            }
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            operation = operation.action(),
            expires_in_secs = expires_in.as_secs(),
            "Got presigned URL"
        );

        Ok(url.to_string())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let location = Self::location(storage_key)?;
        let start = std::time::Instant::now();

        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    operation = "head_object",
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 existence check failed"
                );
                Err(StorageError::BackendError(e.to_string()))
            }
        }
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}

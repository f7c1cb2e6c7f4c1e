//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::PresignOperation;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to presign {operation} for {key}: {message}")]
    SigningFailed {
        operation: PresignOperation,
        key: String,
        message: String,
    },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Implementations are bound to a single bucket at construction and must be
/// safe to share across concurrent requests.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Generate a presigned URL allowing `operation` on exactly `storage_key`
    /// until `expires_in` has elapsed.
    async fn presigned_url(
        &self,
        operation: PresignOperation,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Check if an object exists (HEAD). A missing object is `Ok(false)`, not an error.
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Bucket this backend is bound to.
    fn bucket(&self) -> &str;
}

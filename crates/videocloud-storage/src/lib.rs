//! VideoCloud Storage Library
//!
//! This crate provides the storage abstraction used by the gateway and its S3
//! implementation. The gateway never moves object bytes itself: it only checks
//! whether objects exist and hands out presigned URLs so clients talk to the
//! bucket directly.
//!
//! Keys are built by [`videocloud_core::ObjectKey`] and passed through
//! unchanged, so the key that is checked is always the key that is signed.

pub mod factory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use videocloud_core::PresignOperation;

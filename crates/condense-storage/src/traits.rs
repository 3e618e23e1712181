//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement. The upload → extract → summarize → persist pipeline only ever
//! talks to this contract; the backend owns the bytes once handed over.

use async_trait::async_trait;
use condense_core::StorageBackend;
use std::sync::Arc;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Upload progress callback. Invoked with a percentage in 0..=100,
/// monotonically non-decreasing per upload, at multiples of 25.
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// Storage abstraction trait
///
/// Backends must be path-traversal safe: a storage key never escapes the
/// backend's root. Keys are generated by [`crate::keys::unique_upload_key`]
/// so concurrent uploads never collide.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a file and return (storage_key, storage_url).
    ///
    /// The storage_key is an internal identifier used to reference the file;
    /// the storage_url is the publicly accessible URL. `on_progress`, when
    /// present, receives percentages from 0 to 100 inclusive.
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
        on_progress: Option<ProgressCallback>,
    ) -> StorageResult<(String, String)>;

    /// Download a file by its storage key
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file by its storage key
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

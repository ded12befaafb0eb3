//! Storage backends for the media list document and uploaded files.
//!
//! The repository only sees [`MediaStore`]; which backend sits behind it is
//! decided once at startup from configuration.

#[cfg(feature = "blob")]
mod blob;
mod local;
mod memory;

#[cfg(feature = "blob")]
pub use blob::BlobStore;
pub use local::FsStore;
pub use memory::MemoryStore;

use crate::Config;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode media list: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Stored media list is malformed: {0}")]
    Malformed(String),

    #[cfg(feature = "blob")]
    #[error("Blob store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Blob store returned status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("{0}")]
    NotConfigured(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait]
pub trait MediaStore: Send + Sync + 'static {
    /// Raw bytes of the media list document, or `None` if it was never
    /// written.
    async fn read_list(&self) -> StorageResult<Option<Vec<u8>>>;

    /// Replaces the whole media list document.
    async fn write_list(&self, bytes: Vec<u8>) -> StorageResult<()>;

    /// Stores an uploaded file and returns the URL it is publicly served at.
    async fn put(&self, filename: &str, content_type: &str, bytes: Vec<u8>)
        -> StorageResult<String>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// Picks the blob store when a usable token is configured, the filesystem
/// store otherwise.
pub fn from_config(config: &Config) -> StorageResult<Arc<dyn MediaStore>> {
    if let Some(token) = config.storage.blob_token() {
        #[cfg(feature = "blob")]
        {
            let store = BlobStore::new(
                &config.storage.blob.api_url,
                &token,
                &config.storage.blob.list_pathname,
            )?;
            tracing::info!("Using blob storage at {}", config.storage.blob.api_url);
            return Ok(Arc::new(store));
        }
        #[cfg(not(feature = "blob"))]
        {
            let _ = token;
            tracing::warn!("Blob token configured but the `blob` feature is disabled; using filesystem storage");
        }
    }

    let upload_dir = if config.storage.upload_dir.trim().is_empty() {
        None
    } else {
        Some(config.storage.upload_dir.clone().into())
    };
    let store = FsStore::new(
        config.storage.list_file_path(),
        upload_dir,
        &config.storage.upload_url_prefix,
    );
    tracing::info!(
        "Using filesystem storage at {}",
        config.storage.list_file_path().display()
    );
    Ok(Arc::new(store))
}

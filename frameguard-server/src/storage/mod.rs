//! Object storage collaborator.
//!
//! The server persists two kinds of objects per asset: the marked video
//! under `videos/` and the manifest text under `manifests/`. The collaborator
//! is a trait so that deployments can swap in a cloud backend; the in-tree
//! implementation is [`FsObjectStore`], rooted at a configured directory and
//! issuing HMAC-signed expiring URLs.

pub mod fs;

pub use fs::FsObjectStore;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by an object store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested object does not exist. For manifests this is not a
    /// failure: it signals the first-ingestion branch.
    #[error("object not found: {key}")]
    NotFound { key: String },

    /// The key is empty or would escape the store's namespace.
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    /// Any other storage failure; propagated as fatal.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Abstract object store: durable blobs addressed by `/`-separated keys.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file under `key`, replacing any existing object.
    async fn put(&self, local_path: &Path, key: &str) -> Result<(), StorageError>;

    /// Download the object at `key` into `local_path`.
    async fn get(&self, key: &str, local_path: &Path) -> Result<(), StorageError>;

    /// Issue a short-lived retrieval URL for `key`.
    ///
    /// Existence is not checked; a URL for an absent object simply 404s when
    /// dereferenced.
    async fn presigned_url(&self, key: &str, ttl_seconds: u64) -> Result<String, StorageError>;
}

/// Reject keys that are empty or could traverse outside the store root.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let traversal = key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if key.is_empty() || key.starts_with('/') || traversal {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

//! Application state module
//!
//! Defines shared state accessible across all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use rand::RngCore;

use crate::config::Config;
use crate::storage::FsObjectStore;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Object store holding marked videos and manifests
    pub store: Arc<FsObjectStore>,
    /// Staging directory for uploads in flight
    pub upload_dir: PathBuf,
    /// Presigned URL lifetime in seconds
    pub url_ttl_secs: u64,
    /// Maximum accepted upload size in bytes
    pub max_file_size: usize,
}

impl AppState {
    /// Build the state from configuration, creating the storage and staging
    /// directories.
    pub fn from_config(config: &Config) -> std::io::Result<Self> {
        let secret = match &config.url_signing_secret {
            Some(secret) => secret.as_bytes().to_vec(),
            None => {
                let mut secret = vec![0u8; 32];
                rand::rngs::OsRng.fill_bytes(&mut secret);
                tracing::warn!(
                    "URL_SIGNING_SECRET not set; presigned URLs will not survive a restart"
                );
                secret
            }
        };

        let store =
            FsObjectStore::new(&config.storage_dir, config.public_base_url.as_str(), &secret)?;
        std::fs::create_dir_all(&config.upload_dir)?;

        Ok(Self {
            store: Arc::new(store),
            upload_dir: config.upload_dir.clone(),
            url_ttl_secs: config.url_ttl_secs,
            max_file_size: config.max_file_size_mb * 1024 * 1024,
        })
    }
}

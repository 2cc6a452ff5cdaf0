//! Server configuration module
//!
//! Handles loading configuration from environment variables with sensible
//! defaults. Storage locations and the URL signing secret are plain values
//! injected into the store at construction; nothing reads ambient process
//! state past startup.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port (default: 3000)
    pub port: u16,
    /// Server host (default: 127.0.0.1)
    pub host: [u8; 4],
    /// Allowed CORS origins, comma-separated (default: allow all in dev)
    pub allowed_origins: Option<Vec<String>>,
    /// Root directory of the filesystem object store (default: ./data)
    pub storage_dir: PathBuf,
    /// Staging directory for uploads in flight (default: ./uploads)
    pub upload_dir: PathBuf,
    /// Base URL presigned links are minted under (default: http://127.0.0.1:3000)
    pub public_base_url: String,
    /// Secret for presigned URL signatures; a random per-process secret is
    /// generated when unset, so URLs then expire with the process
    pub url_signing_secret: Option<String>,
    /// Presigned URL lifetime in seconds (default: 3600)
    pub url_ttl_secs: u64,
    /// Request body limit in MB (default: 200)
    pub body_limit_mb: usize,
    /// Maximum video size per upload in MB (default: 100)
    pub max_file_size_mb: usize,
    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
    /// Enable rate limiting (default: false for tests, true when loaded from env)
    pub rate_limit_enabled: bool,
    /// Rate limit: requests per second (default: 5)
    pub rate_limit_per_sec: u64,
    /// Rate limit: burst size (default: 10)
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            host: [127, 0, 0, 1],
            allowed_origins: None, // None = allow all (dev mode)
            storage_dir: PathBuf::from("data"),
            upload_dir: PathBuf::from("uploads"),
            public_base_url: "http://127.0.0.1:3000".to_string(),
            url_signing_secret: None,
            url_ttl_secs: 3600,
            body_limit_mb: 200,
            max_file_size_mb: 100,
            timeout_secs: 120,
            rate_limit_enabled: false, // Disabled by default (for tests)
            rate_limit_per_sec: 5,
            rate_limit_burst: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let host = std::env::var("HOST")
            .ok()
            .map(|h| {
                if h == "0.0.0.0" {
                    [0, 0, 0, 0]
                } else {
                    [127, 0, 0, 1]
                }
            })
            .unwrap_or(defaults.host);

        let allowed_origins = std::env::var("ALLOWED_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let storage_dir = std::env::var("STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_dir);

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir);

        let public_base_url =
            std::env::var("PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url);

        let url_signing_secret = std::env::var("URL_SIGNING_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let url_ttl_secs = std::env::var("DOWNLOAD_URL_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.url_ttl_secs);

        let body_limit_mb = std::env::var("BODY_LIMIT_MB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.body_limit_mb);

        let max_file_size_mb = std::env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_file_size_mb);

        let timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        // Rate limiting enabled by default in production, can be disabled
        // with RATE_LIMIT_ENABLED=false
        let rate_limit_enabled = std::env::var("RATE_LIMIT_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let rate_limit_per_sec = std::env::var("RATE_LIMIT_PER_SEC")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.rate_limit_per_sec);

        let rate_limit_burst = std::env::var("RATE_LIMIT_BURST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.rate_limit_burst);

        Self {
            port,
            host,
            allowed_origins,
            storage_dir,
            upload_dir,
            public_base_url,
            url_signing_secret,
            url_ttl_secs,
            body_limit_mb,
            max_file_size_mb,
            timeout_secs,
            rate_limit_enabled,
            rate_limit_per_sec,
            rate_limit_burst,
        }
    }

    /// Get socket address from config
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.url_ttl_secs, 3600);
        assert!(config.url_signing_secret.is_none());
        assert!(!config.rate_limit_enabled);
    }

    #[test]
    fn test_socket_addr() {
        let config = Config::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
    }
}

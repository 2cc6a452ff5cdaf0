//! Filesystem-backed object store with HMAC-signed retrieval URLs.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::{validate_key, ObjectStore, StorageError};

type HmacSha256 = Hmac<Sha256>;

/// Object store rooted at a local directory.
///
/// Presigned URLs point back at the server's `/files/{key}` route and carry
/// an expiry timestamp plus an HMAC-SHA256 signature over `key` and expiry,
/// so only URLs minted by this process (or another holding the same secret)
/// dereference successfully.
pub struct FsObjectStore {
    root: PathBuf,
    public_base_url: String,
    signing_key: Vec<u8>,
}

impl FsObjectStore {
    /// Create the store, making sure the root directory exists.
    pub fn new(
        root: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
        signing_secret: &[u8],
    ) -> std::io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            signing_key: signing_secret.to_vec(),
        })
    }

    /// Resolve a key to its on-disk path, refusing traversal-unsafe keys.
    pub fn object_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    /// Signature over `key` and `expires` for a presigned URL.
    pub fn sign(&self, key: &str, expires: u64) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.signing_key)
            .expect("HMAC can take key of any size");
        mac.update(key.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verify a presigned URL's signature in constant time.
    pub fn verify_signature(&self, key: &str, expires: u64, signature: &str) -> bool {
        let Ok(provided) = hex::decode(signature) else {
            return false;
        };
        let mut mac = HmacSha256::new_from_slice(&self.signing_key)
            .expect("HMAC can take key of any size");
        mac.update(key.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        mac.verify_slice(&provided).is_ok()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put(&self, local_path: &Path, key: &str) -> Result<(), StorageError> {
        let dest = self.object_path(key)?;
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::copy(local_path, &dest).await?;
        tracing::debug!(key = key, dest = %dest.display(), "stored object");
        Ok(())
    }

    async fn get(&self, key: &str, local_path: &Path) -> Result<(), StorageError> {
        let src = self.object_path(key)?;
        match tokio::fs::copy(&src, local_path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound {
                key: key.to_string(),
            }),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn presigned_url(&self, key: &str, ttl_seconds: u64) -> Result<String, StorageError> {
        validate_key(key)?;
        let expires = unix_now().saturating_add(ttl_seconds);
        let signature = self.sign(key, expires);
        Ok(format!(
            "{}/files/{}?expires={}&signature={}",
            self.public_base_url, key, expires, signature
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(root: &Path) -> FsObjectStore {
        FsObjectStore::new(root, "http://localhost:3000", b"test-secret").unwrap()
    }

    #[tokio::test]
    async fn put_then_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir.path().join("data"));

        let src = dir.path().join("in.txt");
        std::fs::write(&src, b"manifest body").unwrap();
        store.put(&src, "manifests/clip.manifest").await.unwrap();

        let out = dir.path().join("out.txt");
        store.get("manifests/clip.manifest", &out).await.unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), b"manifest body");
    }

    #[tokio::test]
    async fn get_absent_object_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir.path().join("data"));

        let out = dir.path().join("out.txt");
        let err = store.get("manifests/absent.manifest", &out).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn presigned_url_carries_a_valid_signature() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir.path().join("data"));

        let url = store.presigned_url("videos/clip.mp4", 3600).await.unwrap();
        assert!(url.starts_with("http://localhost:3000/files/videos/clip.mp4?expires="));

        let query = url.split_once('?').unwrap().1;
        let mut expires = 0u64;
        let mut signature = String::new();
        for pair in query.split('&') {
            match pair.split_once('=') {
                Some(("expires", v)) => expires = v.parse().unwrap(),
                Some(("signature", v)) => signature = v.to_string(),
                _ => {}
            }
        }

        assert!(store.verify_signature("videos/clip.mp4", expires, &signature));
        assert!(!store.verify_signature("videos/other.mp4", expires, &signature));
        assert!(!store.verify_signature("videos/clip.mp4", expires + 1, &signature));
    }

    #[tokio::test]
    async fn put_rejects_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir.path().join("data"));

        let src = dir.path().join("in.txt");
        std::fs::write(&src, b"x").unwrap();
        let err = store.put(&src, "../escape").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}

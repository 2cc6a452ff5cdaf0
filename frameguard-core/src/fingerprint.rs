//! Per-frame content fingerprints.
//!
//! A fingerprint is the SHA3-256 digest of a frame's exact byte contents.
//! Digest equality is the sole criterion for "frame unchanged": a single
//! differing byte produces a different digest with overwhelming probability.
//! The algorithm and output length are fixed for the lifetime of the manifest
//! format version.

use std::fmt;

use sha3::{Digest, Sha3_256};

/// Length of a frame digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// SHA3-256 digest of a frame's raw byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameDigest([u8; DIGEST_LEN]);

impl FrameDigest {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a digest from its lowercase hex form.
    ///
    /// Returns `None` unless the input is exactly `2 * DIGEST_LEN` hex chars.
    pub fn from_hex(s: &str) -> Option<Self> {
        let decoded = hex::decode(s).ok()?;
        let bytes: [u8; DIGEST_LEN] = decoded.try_into().ok()?;
        Some(Self(bytes))
    }

    /// The digest as raw bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// The digest as lowercase hex, the form used in the manifest file.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for FrameDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute the content fingerprint of a raw frame buffer.
///
/// Deterministic and byte-exact: the digest depends only on the buffer
/// contents, not on any pixel semantics.
pub fn fingerprint(data: &[u8]) -> FrameDigest {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    let result = hasher.finalize();

    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&result);
    FrameDigest(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic() {
        let frame = vec![7u8; 48];
        assert_eq!(fingerprint(&frame), fingerprint(&frame));
    }

    #[test]
    fn single_byte_changes_digest() {
        let frame = vec![0u8; 48];
        let mut mutated = frame.clone();
        mutated[17] ^= 0x01;
        assert_ne!(fingerprint(&frame), fingerprint(&mutated));
    }

    #[test]
    fn hex_roundtrip() {
        let digest = fingerprint(b"frame bytes");
        let hex = digest.to_hex();
        assert_eq!(hex.len(), DIGEST_LEN * 2);
        assert_eq!(FrameDigest::from_hex(&hex), Some(digest));
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(FrameDigest::from_hex("").is_none());
        assert!(FrameDigest::from_hex("abcd").is_none());
        assert!(FrameDigest::from_hex(&"zz".repeat(DIGEST_LEN)).is_none());
    }
}

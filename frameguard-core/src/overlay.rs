//! Cipher-overlay transform: the visible per-frame marking.
//!
//! Each frame's raw bytes are run through AES-128-CBC with a fresh random IV
//! and PKCS#7 padding, the ciphertext is forced back to the frame's exact
//! length, and its channel-0 plane is composited into a copy of the original
//! frame. The IV is discarded and padding is truncated, so there is no
//! decrypt path: the overlay is a structural marker, not a confidentiality
//! scheme.

use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use aes::Aes128;
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::video::CHANNELS;

/// Length of an overlay key in bytes (AES-128).
pub const KEY_LEN: usize = 16;

const IV_LEN: usize = 16;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;

/// Symmetric key driving the overlay transform for one ingested asset.
///
/// Generated once per ingestion from the OS RNG, returned to the caller, and
/// never persisted by the core. The key material is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey([u8; KEY_LEN]);

impl EncryptionKey {
    /// Generate a fresh random key.
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        Self(key)
    }

    /// Wrap existing key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// The key as lowercase hex, the form handed back to callers.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material never reaches logs.
        f.write_str("EncryptionKey(..)")
    }
}

/// Produce the marked variant of a frame buffer.
///
/// The result has exactly the input's length: only channel 0 of each pixel is
/// replaced with the corresponding ciphertext byte, channels 1 and 2 are
/// carried over unchanged.
pub fn overlay(frame: &[u8], key: &EncryptionKey) -> Result<Vec<u8>> {
    if frame.is_empty() {
        return Err(Error::frame("empty frame buffer"));
    }

    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    // The IV is dropped right after encryption; nothing downstream can undo
    // this transform.
    let mut ciphertext =
        Aes128CbcEnc::new(key.as_bytes().into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(frame);

    // PKCS#7 always grows the buffer past the frame length; force equality,
    // destructively.
    ciphertext.resize(frame.len(), 0);

    let mut marked = frame.to_vec();
    for (pixel, cipher_pixel) in marked
        .chunks_exact_mut(CHANNELS)
        .zip(ciphertext.chunks_exact(CHANNELS))
    {
        pixel[0] = cipher_pixel[0];
    }

    Ok(marked)
}

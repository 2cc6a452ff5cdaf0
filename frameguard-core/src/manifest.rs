//! Fingerprint manifest and its line-oriented text codec.
//!
//! The manifest is the durable record of what the original video looked like,
//! frame by frame. On disk it is one line per frame:
//!
//! ```text
//! Frame 0: 3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532
//! Frame 1: 2767f15c8af2f2c7225d5273fdd683edc714110a987d1054697c348aed4e6cc7
//! ```
//!
//! Indices ascend from 0 with no gaps and no structure beyond the final
//! newline. Decode splits each line on the first `": "` and trusts line
//! order; the leading `Frame {index}` label is not validated against
//! position, matching the stored artifacts already in circulation.

use crate::error::{Error, Result};
use crate::fingerprint::{FrameDigest, DIGEST_LEN};

/// One manifest record: a frame's position and its content fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEntry {
    pub index: usize,
    pub digest: FrameDigest,
}

/// Ordered sequence of per-frame fingerprints for one ingested video.
///
/// Created once by the ingestion pipeline and never mutated afterwards.
/// At creation time its length equals the source frame count; reconciliation
/// may later see a candidate of different length, which is handled there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintManifest {
    entries: Vec<ManifestEntry>,
}

impl FingerprintManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manifest from digests in frame order.
    pub fn from_digests(digests: impl IntoIterator<Item = FrameDigest>) -> Self {
        let mut manifest = Self::new();
        for digest in digests {
            manifest.push(digest);
        }
        manifest
    }

    /// Append the next frame's digest. Indices are assigned sequentially.
    pub fn push(&mut self, digest: FrameDigest) {
        let index = self.entries.len();
        self.entries.push(ManifestEntry { index, digest });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The digest recorded for the given frame index, if any.
    pub fn digest_at(&self, index: usize) -> Option<&FrameDigest> {
        self.entries.get(index).map(|e| &e.digest)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter()
    }

    /// Serialize to the line-oriented text form.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.entries.len() * (DIGEST_LEN * 2 + 12));
        for entry in &self.entries {
            out.push_str(&format!("Frame {}: {}\n", entry.index, entry.digest));
        }
        out
    }

    /// Parse the line-oriented text form.
    ///
    /// Fails with [`Error::ManifestFormat`] when a line lacks the `": "`
    /// delimiter or its digest is not `2 * DIGEST_LEN` hex chars. The
    /// embedded index label is ignored; record order follows line order.
    pub fn decode(text: &str) -> Result<Self> {
        let mut manifest = Self::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim_end();
            let (_label, digest_hex) = line
                .split_once(": ")
                .ok_or_else(|| Error::manifest_format(line_no + 1, "missing ': ' delimiter"))?;
            let digest = FrameDigest::from_hex(digest_hex).ok_or_else(|| {
                Error::manifest_format(
                    line_no + 1,
                    format!("expected {} hex chars, got {:?}", DIGEST_LEN * 2, digest_hex),
                )
            })?;
            manifest.push(digest);
        }
        Ok(manifest)
    }
}

//! Ingestion pipeline: decode once, fingerprint and mark every frame,
//! persist the manifest, encode the marked stream.

use std::path::Path;

use crate::error::Result;
use crate::fingerprint::{fingerprint, FrameDigest};
use crate::manifest::FingerprintManifest;
use crate::overlay::{overlay, EncryptionKey};
use crate::video::{Frame, FrameSink, FrameStream, StreamInfo};

/// Everything the ingestion pipeline hands back to its caller.
///
/// The key is the only reversible secret the pipeline exposes; transporting
/// it is the caller's concern, the core never persists it.
pub struct IngestReport {
    pub manifest: FingerprintManifest,
    pub key: EncryptionKey,
    pub info: StreamInfo,
    pub frames_written: u64,
    pub frames_skipped: u64,
}

/// Fingerprint and mark one frame.
///
/// The overlay runs first so that a transform failure skips the frame's
/// digest as well: a frame either contributes to both outputs or to neither.
pub fn mark_frame(frame: &Frame, key: &EncryptionKey) -> Result<(FrameDigest, Frame)> {
    let marked = overlay(&frame.data, key)?;
    let digest = fingerprint(&frame.data);
    Ok((
        digest,
        Frame {
            index: frame.index,
            data: marked,
        },
    ))
}

/// Run the full ingestion pipeline over `input`.
///
/// Writes the marked video to `marked_output` and the manifest text to
/// `manifest_output`. Per-frame failures are logged and skipped; container
/// and manifest-persistence failures abort the call.
pub fn ingest(input: &Path, marked_output: &Path, manifest_output: &Path) -> Result<IngestReport> {
    let stream = FrameStream::open(input)?;
    let info = stream.info();
    let mut sink = FrameSink::create(marked_output, &info)?;

    let key = EncryptionKey::generate();
    let mut manifest = FingerprintManifest::new();
    let mut frames_skipped = 0u64;

    for frame in stream {
        if frame.data.is_empty() {
            tracing::warn!(frame = frame.index, "empty frame buffer, skipping");
            frames_skipped += 1;
            continue;
        }
        match mark_frame(&frame, &key) {
            Ok((digest, marked)) => {
                manifest.push(digest);
                sink.write_frame(&marked)?;
            }
            Err(e) => {
                tracing::warn!(frame = frame.index, error = %e, "frame transform failed, skipping");
                frames_skipped += 1;
            }
        }
    }

    let frames_written = sink.finish()?;
    std::fs::write(manifest_output, manifest.encode())?;

    tracing::info!(
        input = %input.display(),
        frames = frames_written,
        skipped = frames_skipped,
        "ingestion complete"
    );

    Ok(IngestReport {
        manifest,
        key,
        info,
        frames_written,
        frames_skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::CHANNELS;

    fn synthetic_frame(index: usize, fill: u8) -> Frame {
        Frame {
            index,
            data: vec![fill; 8 * 8 * CHANNELS],
        }
    }

    #[test]
    fn mark_frame_digest_covers_the_original_bytes() {
        let key = EncryptionKey::generate();
        let frame = synthetic_frame(0, 50);
        let (digest, marked) = mark_frame(&frame, &key).unwrap();

        assert_eq!(digest, fingerprint(&frame.data));
        assert_ne!(digest, fingerprint(&marked.data));
        assert_eq!(marked.data.len(), frame.data.len());
        assert_eq!(marked.index, frame.index);
    }

    #[test]
    fn mark_frame_fails_on_empty_buffer() {
        let key = EncryptionKey::generate();
        let frame = Frame {
            index: 3,
            data: Vec::new(),
        };
        assert!(mark_frame(&frame, &key).is_err());
    }
}

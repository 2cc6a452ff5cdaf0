//! Reconciliation engine: diff a candidate video against a stored manifest.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fingerprint::fingerprint;
use crate::manifest::FingerprintManifest;
use crate::video::{Frame, FrameStream};

/// Outcome of reconciling a candidate stream against a manifest.
///
/// `tampered_frames` holds indices present in both sequences whose digests
/// differ; `missing_frames` holds manifest indices past the end of a shorter
/// candidate. Both ascend. Produced once per reconciliation and never
/// mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TamperReport {
    pub tampered_frames: Vec<usize>,
    pub missing_frames: Vec<usize>,
}

impl TamperReport {
    /// True when the candidate matched the manifest frame for frame.
    pub fn is_unchanged(&self) -> bool {
        self.tampered_frames.is_empty() && self.missing_frames.is_empty()
    }
}

/// Reconcile a candidate video file against a stored manifest.
pub fn reconcile(manifest: &FingerprintManifest, candidate: &Path) -> Result<TamperReport> {
    let stream = FrameStream::open(candidate)?;
    let report = reconcile_frames(manifest, stream);
    tracing::info!(
        candidate = %candidate.display(),
        tampered = report.tampered_frames.len(),
        missing = report.missing_frames.len(),
        "reconciliation complete"
    );
    Ok(report)
}

/// Walk the candidate frames in lockstep with the manifest.
///
/// Strictly positional: no re-alignment is attempted after an insertion or
/// deletion, so a shifted tail reads as wholesale tampering. Candidate
/// frames beyond the manifest length are never evaluated; the effective
/// comparison window is `min(manifest len, candidate len)`.
pub fn reconcile_frames<I>(manifest: &FingerprintManifest, frames: I) -> TamperReport
where
    I: IntoIterator<Item = Frame>,
{
    let mut tampered_frames = Vec::new();
    let mut compared = 0usize;

    for frame in frames {
        if compared >= manifest.len() {
            break;
        }
        let digest = fingerprint(&frame.data);
        if manifest.digest_at(compared) != Some(&digest) {
            tampered_frames.push(compared);
        }
        compared += 1;
    }

    let missing_frames = (compared..manifest.len()).collect();

    TamperReport {
        tampered_frames,
        missing_frames,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::CHANNELS;

    fn frames(count: usize) -> Vec<Frame> {
        // Distinct solid-color frames.
        (0..count)
            .map(|i| Frame {
                index: i,
                data: vec![i as u8; 4 * 4 * CHANNELS],
            })
            .collect()
    }

    fn manifest_of(frames: &[Frame]) -> FingerprintManifest {
        FingerprintManifest::from_digests(frames.iter().map(|f| fingerprint(&f.data)))
    }

    #[test]
    fn identical_stream_is_unchanged() {
        let original = frames(10);
        let manifest = manifest_of(&original);
        let report = reconcile_frames(&manifest, original);
        assert!(report.is_unchanged());
        assert_eq!(report, TamperReport::default());
    }

    #[test]
    fn single_mutated_frame_is_reported_alone() {
        let original = frames(10);
        let manifest = manifest_of(&original);

        let mut candidate = original;
        candidate[4].data[0] ^= 0x80;

        let report = reconcile_frames(&manifest, candidate);
        assert_eq!(report.tampered_frames, vec![4]);
        assert!(report.missing_frames.is_empty());
    }

    #[test]
    fn truncated_candidate_reports_missing_tail() {
        let original = frames(10);
        let manifest = manifest_of(&original);

        let candidate: Vec<Frame> = original.into_iter().take(7).collect();
        let report = reconcile_frames(&manifest, candidate);
        assert!(report.tampered_frames.is_empty());
        assert_eq!(report.missing_frames, vec![7, 8, 9]);
    }

    #[test]
    fn longer_candidate_tail_is_ignored() {
        let original = frames(5);
        let manifest = manifest_of(&original);

        let candidate = frames(9);
        let report = reconcile_frames(&manifest, candidate);
        assert!(report.is_unchanged());
    }

    #[test]
    fn inserted_frame_shifts_the_remainder() {
        let original = frames(4);
        let manifest = manifest_of(&original);

        let mut candidate = original;
        candidate.insert(
            1,
            Frame {
                index: 1,
                data: vec![200u8; 4 * 4 * CHANNELS],
            },
        );

        let report = reconcile_frames(&manifest, candidate);
        // Documented positional behavior: everything from the insertion point
        // on mismatches.
        assert_eq!(report.tampered_frames, vec![1, 2, 3]);
        assert!(report.missing_frames.is_empty());
    }

    #[test]
    fn empty_candidate_reports_all_frames_missing() {
        let original = frames(3);
        let manifest = manifest_of(&original);
        let report = reconcile_frames(&manifest, Vec::new());
        assert!(report.tampered_frames.is_empty());
        assert_eq!(report.missing_frames, vec![0, 1, 2]);
    }
}

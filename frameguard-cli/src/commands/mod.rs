//! CLI command implementations.

pub mod ingest;
pub mod verify;

use std::path::{Path, PathBuf};

/// Build the default manifest path from the video path:
/// `clip.mp4` -> `clip.mp4.manifest`.
pub(crate) fn build_manifest_path(video: &Path) -> PathBuf {
    video.with_extension(format!(
        "{}.manifest",
        video.extension().and_then(|e| e.to_str()).unwrap_or("bin")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_path_appends_suffix() {
        assert_eq!(
            build_manifest_path(Path::new("clips/a.mp4")),
            Path::new("clips/a.mp4.manifest")
        );
        assert_eq!(
            build_manifest_path(Path::new("noext")),
            Path::new("noext.bin.manifest")
        );
    }
}

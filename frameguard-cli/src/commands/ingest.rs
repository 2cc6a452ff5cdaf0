//! Ingest command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use frameguard_core::ingest;

use super::build_manifest_path;

/// Build the default marked-copy path: `clips/a.mp4` -> `clips/marked_a.mp4`.
fn build_marked_path(video: &Path) -> PathBuf {
    let name = video
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("output");
    match video.parent() {
        Some(parent) => parent.join(format!("marked_{name}")),
        None => PathBuf::from(format!("marked_{name}")),
    }
}

/// Execute the ingest command.
pub fn execute(
    video: PathBuf,
    output: Option<PathBuf>,
    manifest: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let output = output.unwrap_or_else(|| build_marked_path(&video));
    let manifest_path = manifest.unwrap_or_else(|| build_manifest_path(&video));

    let report = ingest(&video, &output, &manifest_path)
        .with_context(|| format!("Failed to ingest {}", video.display()))?;

    info!(
        frames = report.frames_written,
        skipped = report.frames_skipped,
        "ingestion finished"
    );

    if quiet {
        println!("{}", report.key.to_hex());
        return Ok(());
    }

    println!();
    println!("{}", "Ingestion complete".green().bold());
    println!();
    println!(
        "   {} {}x{} @ {} fps",
        "Stream:".dimmed(),
        report.info.width,
        report.info.height,
        report.info.frame_rate
    );
    println!("   {} {}", "Frames:".dimmed(), report.frames_written);
    if report.frames_skipped > 0 {
        println!(
            "   {} {}",
            "Skipped:".dimmed(),
            report.frames_skipped.to_string().yellow()
        );
    }
    println!("   {} {}", "Manifest:".dimmed(), manifest_path.display());
    println!("   {} {}", "Marked copy:".dimmed(), output.display());
    println!("   {} {}", "Overlay key:".dimmed(), report.key.to_hex());
    println!();
    println!(
        "   {}",
        "The key is not stored anywhere; save it now if you need it.".dimmed()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marked_path_gets_prefix_in_place() {
        assert_eq!(
            build_marked_path(Path::new("clips/a.mp4")),
            Path::new("clips/marked_a.mp4")
        );
        assert_eq!(
            build_marked_path(Path::new("a.mp4")),
            Path::new("marked_a.mp4")
        );
    }
}

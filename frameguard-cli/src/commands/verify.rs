//! Verify command implementation.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::{error, info};

use frameguard_core::{reconcile, FingerprintManifest};

use super::build_manifest_path;

/// Render an index list compactly: `[0, 1, 2, … +7 more]`.
fn format_indices(indices: &[usize]) -> String {
    const SHOWN: usize = 8;
    let head: Vec<String> = indices.iter().take(SHOWN).map(|i| i.to_string()).collect();
    if indices.len() > SHOWN {
        format!("[{}, … +{} more]", head.join(", "), indices.len() - SHOWN)
    } else {
        format!("[{}]", head.join(", "))
    }
}

/// Execute the verify command.
pub fn execute(video: PathBuf, manifest: Option<PathBuf>, quiet: bool) -> Result<()> {
    let manifest_path = manifest.unwrap_or_else(|| build_manifest_path(&video));

    let text = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read manifest file: {}", manifest_path.display()))?;
    let manifest = FingerprintManifest::decode(&text)
        .with_context(|| format!("Failed to parse manifest: {}", manifest_path.display()))?;

    info!(
        path = %manifest_path.display(),
        records = manifest.len(),
        "loaded manifest"
    );

    let report = reconcile(&manifest, &video)
        .with_context(|| format!("Failed to reconcile {}", video.display()))?;

    if report.is_unchanged() {
        info!(frames = manifest.len(), "candidate matches manifest");

        if !quiet {
            println!();
            println!("{}", "╔════════════════════════════════════════╗".green());
            println!(
                "{}",
                "║              UNCHANGED                 ║".green().bold()
            );
            println!("{}", "╚════════════════════════════════════════╝".green());
            println!();
            println!(
                "   {} all {} frames match the manifest",
                "Content:".dimmed(),
                manifest.len()
            );
        }
        Ok(())
    } else {
        error!(
            tampered = report.tampered_frames.len(),
            missing = report.missing_frames.len(),
            "candidate differs from manifest"
        );

        if !quiet {
            println!();
            println!("{}", "╔════════════════════════════════════════╗".red());
            println!(
                "{}",
                "║              TAMPERED                  ║".red().bold()
            );
            println!("{}", "╚════════════════════════════════════════╝".red());
            println!();
            if !report.tampered_frames.is_empty() {
                println!(
                    "   {} {}",
                    "Tampered frames:".dimmed(),
                    format_indices(&report.tampered_frames).red()
                );
            }
            if !report.missing_frames.is_empty() {
                println!(
                    "   {} {}",
                    "Missing frames:".dimmed(),
                    format_indices(&report.missing_frames).red()
                );
            }
        }
        bail!(
            "Verification failed: {} tampered frame(s), {} missing frame(s)",
            report.tampered_frames.len(),
            report.missing_frames.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lists_are_truncated() {
        assert_eq!(format_indices(&[4]), "[4]");
        assert_eq!(format_indices(&[0, 1, 2]), "[0, 1, 2]");
        let long: Vec<usize> = (0..20).collect();
        assert_eq!(
            format_indices(&long),
            "[0, 1, 2, 3, 4, 5, 6, 7, … +12 more]"
        );
    }
}

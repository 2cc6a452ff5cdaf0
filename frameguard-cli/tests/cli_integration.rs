//! CLI integration tests for frameguard-cli.
//!
//! These tests run the actual binary and check outputs, exit codes, and file
//! artifacts. The pipeline flow needs ffmpeg/ffprobe and is skipped when the
//! tools are absent.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the frameguard binary.
fn frameguard() -> Command {
    Command::cargo_bin("frameguard").unwrap()
}

fn tools_available() -> bool {
    which::which("ffmpeg").is_ok() && which::which("ffprobe").is_ok()
}

fn generate_clip(path: &Path, frames: u32) {
    let status = StdCommand::new("ffmpeg")
        .args(["-v", "error", "-y"])
        .args(["-f", "lavfi", "-i", "testsrc=size=64x64:rate=10"])
        .args(["-frames:v", &frames.to_string()])
        .args(["-c:v", "ffv1"])
        .arg(path)
        .status()
        .expect("failed to run ffmpeg");
    assert!(status.success());
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_displays_usage() {
    frameguard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Per-frame video tamper evidence"))
        .stdout(predicate::str::contains("ingest"))
        .stdout(predicate::str::contains("verify"));
}

#[test]
fn test_version_displays_version() {
    frameguard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("frameguard"));
}

#[test]
fn test_ingest_help_shows_options() {
    frameguard()
        .args(["ingest", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--manifest"));
}

// ============================================================================
// Error Path Tests
// ============================================================================

#[test]
fn test_verify_missing_manifest_is_input_error() {
    let dir = TempDir::new().unwrap();
    let video = dir.path().join("clip.mp4");
    std::fs::write(&video, b"placeholder").unwrap();

    frameguard()
        .args(["verify"])
        .arg(&video)
        .assert()
        .failure()
        .code(66)
        .stderr(predicate::str::contains("Failed to read manifest file"));
}

#[test]
fn test_verify_malformed_manifest_is_input_error() {
    let dir = TempDir::new().unwrap();
    let video = dir.path().join("clip.mp4");
    let manifest = dir.path().join("clip.mp4.manifest");
    std::fs::write(&video, b"placeholder").unwrap();
    std::fs::write(&manifest, "not a manifest line\n").unwrap();

    frameguard()
        .args(["verify"])
        .arg(&video)
        .assert()
        .failure()
        .code(66)
        .stderr(predicate::str::contains("malformed manifest"));
}

// ============================================================================
// Pipeline Flow (requires ffmpeg/ffprobe)
// ============================================================================

#[test]
fn test_ingest_then_verify_roundtrip() {
    if !tools_available() {
        eprintln!("skipping: ffmpeg/ffprobe not on PATH");
        return;
    }

    let dir = TempDir::new().unwrap();
    let video = dir.path().join("clip.mkv");
    generate_clip(&video, 10);

    // Quiet ingest prints exactly the overlay key.
    let assert = frameguard()
        .args(["--quiet", "ingest"])
        .arg(&video)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let key = stdout.trim();
    assert_eq!(key.len(), 32);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));

    // Artifacts landed next to the input.
    assert!(dir.path().join("marked_clip.mkv").exists());
    let manifest = dir.path().join("clip.mkv.manifest");
    let manifest_text = std::fs::read_to_string(&manifest).unwrap();
    assert_eq!(manifest_text.lines().count(), 10);
    assert!(manifest_text.starts_with("Frame 0: "));

    // The untouched video verifies clean.
    frameguard()
        .args(["verify"])
        .arg(&video)
        .assert()
        .success()
        .stdout(predicate::str::contains("UNCHANGED"));

    // The marked copy must NOT verify against the original manifest.
    frameguard()
        .args(["verify"])
        .arg(dir.path().join("marked_clip.mkv"))
        .arg(&manifest)
        .assert()
        .failure()
        .code(65)
        .stdout(predicate::str::contains("TAMPERED"));
}

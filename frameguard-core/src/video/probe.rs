//! FFprobe-based stream probing.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use super::StreamInfo;
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
}

/// Probe a video container for the metadata the pipelines mirror into their
/// output: width, height, and frame rate of the first video stream.
pub fn probe_stream(path: &Path) -> Result<StreamInfo> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_streams",
            "-select_streams",
            "v:0",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffprobe")
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::decode(format!(
            "ffprobe failed for {}: {}",
            path.display(),
            stderr.trim()
        )));
    }

    let parsed: FfprobeOutput = serde_json::from_slice(&output.stdout)
        .map_err(|e| Error::decode(format!("invalid ffprobe output: {}", e)))?;

    let stream = parsed
        .streams
        .into_iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| Error::decode(format!("no video stream in {}", path.display())))?;

    let width = stream.width.filter(|w| *w > 0);
    let height = stream.height.filter(|h| *h > 0);
    let (width, height) = match (width, height) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Err(Error::decode(format!(
                "video stream in {} reports no valid dimensions",
                path.display()
            )))
        }
    };

    let frame_rate = stream
        .r_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .or_else(|| stream.avg_frame_rate.as_deref().and_then(parse_frame_rate))
        .ok_or_else(|| {
            Error::decode(format!(
                "video stream in {} reports no valid frame rate",
                path.display()
            ))
        })?;

    Ok(StreamInfo {
        width,
        height,
        frame_rate,
    })
}

/// Parse ffprobe's `num/den` rational frame rate, rounded to the nearest
/// whole frames-per-second.
fn parse_frame_rate(raw: &str) -> Option<u32> {
    let rate = match raw.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().ok()?;
            let den: f64 = den.parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => raw.parse().ok()?,
    };
    let rounded = rate.round();
    if rounded >= 1.0 && rounded <= u32::MAX as f64 {
        Some(rounded as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rational_frame_rates() {
        assert_eq!(parse_frame_rate("30/1"), Some(30));
        assert_eq!(parse_frame_rate("30000/1001"), Some(30));
        assert_eq!(parse_frame_rate("24000/1001"), Some(24));
        assert_eq!(parse_frame_rate("25"), Some(25));
    }

    #[test]
    fn rejects_degenerate_frame_rates() {
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("0/1"), None);
        assert_eq!(parse_frame_rate("garbage"), None);
    }

    #[test]
    fn probe_missing_file_is_a_decode_error() {
        let result = probe_stream(Path::new("/nonexistent/clip.mp4"));
        assert!(matches!(
            result,
            Err(Error::Decode(_)) | Err(Error::ToolNotFound { .. })
        ));
    }
}

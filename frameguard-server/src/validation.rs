//! Upload validation module
//!
//! Provides validation utilities for multipart video uploads.

use std::path::Path;

use crate::error::ApiError;

/// Allowed MIME type categories for video uploads
const ALLOWED_MIME_PREFIXES: &[&str] = &["video/", "application/octet-stream"];

/// Validates the Content-Type of an uploaded file
///
/// Accepts:
/// - video/* (video/mp4, video/webm, etc.)
/// - application/octet-stream (binary data)
///
/// Returns an error if the Content-Type is not supported.
pub fn validate_content_type(content_type: Option<&str>) -> Result<(), ApiError> {
    match content_type {
        Some(ct) => {
            let ct_lower = ct.to_lowercase();
            if ALLOWED_MIME_PREFIXES
                .iter()
                .any(|prefix| ct_lower.starts_with(prefix))
            {
                Ok(())
            } else {
                Err(ApiError::bad_request(format!(
                    "Unsupported Content-Type: '{}'. Allowed types: video/*, application/octet-stream",
                    ct
                )))
            }
        }
        // Allow missing Content-Type (treat as binary)
        None => Ok(()),
    }
}

/// Validates the size of an uploaded file
///
/// Returns an error if the file exceeds the maximum size.
pub fn validate_file_size(size: usize, max_size: usize) -> Result<(), ApiError> {
    if size > max_size {
        let max_mb = max_size / (1024 * 1024);
        let actual_mb = size / (1024 * 1024);
        Err(ApiError::bad_request(format!(
            "File too large: {} MB exceeds maximum of {} MB",
            actual_mb, max_mb
        )))
    } else {
        Ok(())
    }
}

/// Reduce a client-supplied filename to a safe basename.
///
/// The basename becomes part of object keys and staging paths, so path
/// separators and dot-segments are rejected rather than stripped.
pub fn sanitize_filename(raw: &str) -> Result<String, ApiError> {
    let name = Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    if name.is_empty() || name != raw || name == "." || name == ".." {
        return Err(ApiError::bad_request(format!(
            "Invalid filename: '{}'",
            raw
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_content_type_video() {
        assert!(validate_content_type(Some("video/mp4")).is_ok());
        assert!(validate_content_type(Some("video/webm")).is_ok());
        assert!(validate_content_type(Some("VIDEO/MP4")).is_ok()); // case insensitive
    }

    #[test]
    fn test_validate_content_type_binary() {
        assert!(validate_content_type(Some("application/octet-stream")).is_ok());
    }

    #[test]
    fn test_validate_content_type_none() {
        assert!(validate_content_type(None).is_ok());
    }

    #[test]
    fn test_validate_content_type_rejected() {
        assert!(validate_content_type(Some("text/html")).is_err());
        assert!(validate_content_type(Some("image/png")).is_err());
        assert!(validate_content_type(Some("application/json")).is_err());
    }

    #[test]
    fn test_validate_file_size() {
        let max = 10 * 1024 * 1024;
        assert!(validate_file_size(1024, max).is_ok());
        assert!(validate_file_size(max, max).is_ok());
        assert!(validate_file_size(max + 1, max).is_err());
    }

    #[test]
    fn test_sanitize_filename_accepts_plain_names() {
        assert_eq!(sanitize_filename("clip.mp4").unwrap(), "clip.mp4");
        assert_eq!(sanitize_filename("a b.mkv").unwrap(), "a b.mkv");
    }

    #[test]
    fn test_sanitize_filename_rejects_paths() {
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("../clip.mp4").is_err());
        assert!(sanitize_filename("/etc/passwd").is_err());
        assert!(sanitize_filename("dir/clip.mp4").is_err());
    }
}

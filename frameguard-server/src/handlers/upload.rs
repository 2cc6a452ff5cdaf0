//! Upload handler
//!
//! Handles POST /upload requests: the first sighting of an asset runs the
//! ingestion pipeline and persists its artifacts; a repeat sighting runs
//! reconciliation against the stored manifest. Tamper detection is a
//! successful response, not an error.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use frameguard_core::{ingest, reconcile, FingerprintManifest};

use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::{ObjectStore, StorageError};
use crate::validation::{sanitize_filename, validate_content_type, validate_file_size};

/// Verdict carried in an upload response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// Candidate matched the stored manifest frame for frame
    Unchanged,
    /// Candidate differs; see tampered_frames / missing_frames
    Modified,
    /// First sighting: asset ingested and persisted
    Uploaded,
}

/// Response for a processed upload
#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    /// Human-readable summary of the outcome
    #[schema(example = "Video uploaded and processed successfully")]
    pub message: String,
    /// Outcome of the upload
    pub status: UploadStatus,
    /// Overlay key for a freshly ingested asset (hex)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "9f86d081884c7d659a2feaa0c55ad015")]
    pub key: Option<String>,
    /// Indices whose fingerprints differ from the manifest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tampered_frames: Option<Vec<usize>>,
    /// Manifest indices past the end of a shorter candidate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_frames: Option<Vec<usize>>,
}

/// Process an uploaded video
///
/// Accepts multipart/form-data with:
/// - **video** (required): The video file to ingest or reconcile
///
/// If no manifest is stored for the filename, the video is ingested: a
/// per-frame fingerprint manifest and a cipher-overlaid marked copy are
/// persisted and the overlay key is returned. If a manifest exists, the
/// upload is reconciled against it and the response reports whether it is
/// unchanged or which frames were tampered with or are missing.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "Assets",
    request_body(
        content_type = "multipart/form-data",
        description = "Video file to ingest or reconcile"
    ),
    responses(
        (status = 200, description = "Upload processed (including tamper detection)", body = UploadResponse),
        (status = 400, description = "Missing or invalid video field"),
        (status = 500, description = "Pipeline or storage failure")
    )
)]
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    // Parse multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "video" => {
                let content_type = field.content_type().map(|s| s.to_string());
                validate_content_type(content_type.as_deref())?;

                let raw_name = field.file_name().unwrap_or("").to_string();
                file_name = Some(sanitize_filename(&raw_name)?);

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read video: {}", e)))?
                    .to_vec();
                validate_file_size(data.len(), state.max_file_size)?;

                file_data = Some(data);
            }
            _ => {}
        }
    }

    let (data, filename) = match (file_data, file_name) {
        (Some(data), Some(filename)) => (data, filename),
        _ => {
            return Err(ApiError::bad_request(
                "No video file uploaded. Use 'video' field in multipart form.",
            ))
        }
    };

    // Stage the upload on the local filesystem for the pipelines.
    let staging = tempfile::tempdir_in(&state.upload_dir)
        .map_err(|e| ApiError::internal(format!("Failed to create staging dir: {}", e)))?;
    let video_path = staging.path().join(&filename);
    tokio::fs::write(&video_path, &data)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to stage upload: {}", e)))?;

    let manifest_key = format!("manifests/{}.manifest", filename);
    let manifest_path = staging.path().join(format!("{}.manifest", filename));

    // A stored manifest decides the branch: reconcile when present, ingest
    // when absent. NotFound is the signal, not an error.
    match state.store.get(&manifest_key, &manifest_path).await {
        Ok(()) => {
            let text = tokio::fs::read_to_string(&manifest_path)
                .await
                .map_err(|e| ApiError::internal(format!("Failed to read manifest: {}", e)))?;
            let manifest = FingerprintManifest::decode(&text)?;

            let candidate = video_path.clone();
            let report = tokio::task::spawn_blocking(move || reconcile(&manifest, &candidate))
                .await
                .map_err(|e| ApiError::internal(format!("Reconciliation task failed: {}", e)))??;

            if report.is_unchanged() {
                tracing::info!(filename = %filename, "candidate matches stored manifest");
                Ok(Json(UploadResponse {
                    message: "File hasn't changed".to_string(),
                    status: UploadStatus::Unchanged,
                    key: None,
                    tampered_frames: None,
                    missing_frames: None,
                }))
            } else {
                tracing::info!(
                    filename = %filename,
                    tampered = report.tampered_frames.len(),
                    missing = report.missing_frames.len(),
                    "tampering detected"
                );
                Ok(Json(UploadResponse {
                    message: "File has been tampered".to_string(),
                    status: UploadStatus::Modified,
                    key: None,
                    tampered_frames: Some(report.tampered_frames),
                    missing_frames: Some(report.missing_frames),
                }))
            }
        }
        Err(StorageError::NotFound { .. }) => {
            let marked_name = format!("marked_{}", filename);
            let marked_path = staging.path().join(&marked_name);

            let input = video_path.clone();
            let marked_out = marked_path.clone();
            let manifest_out = manifest_path.clone();
            let report =
                tokio::task::spawn_blocking(move || ingest(&input, &marked_out, &manifest_out))
                    .await
                    .map_err(|e| ApiError::internal(format!("Ingestion task failed: {}", e)))??;

            state
                .store
                .put(&marked_path, &format!("videos/{}", marked_name))
                .await?;
            state.store.put(&manifest_path, &manifest_key).await?;

            tracing::info!(
                filename = %filename,
                frames = report.frames_written,
                skipped = report.frames_skipped,
                "asset ingested"
            );

            Ok(Json(UploadResponse {
                message: "Video uploaded and processed successfully".to_string(),
                status: UploadStatus::Uploaded,
                key: Some(report.key.to_hex()),
                tampered_frames: None,
                missing_frames: None,
            }))
        }
        Err(e) => Err(e.into()),
    }
}

//! Download handler
//!
//! Handles GET /download requests by issuing a short-lived presigned URL for
//! a stored marked video.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::ObjectStore;
use crate::validation::sanitize_filename;

/// Query parameters for /download
#[derive(Debug, Deserialize, IntoParams)]
pub struct DownloadQuery {
    /// Name of the marked video, as returned by ingestion
    /// (e.g. `marked_clip.mp4`)
    pub filename: Option<String>,
}

/// Response carrying the retrieval URL
#[derive(Serialize, ToSchema)]
pub struct DownloadResponse {
    /// Short-lived presigned URL for the stored object
    pub url: String,
}

/// Issue a presigned retrieval URL for a stored marked video
///
/// Existence is not checked here; a URL for an absent object 404s when
/// dereferenced.
#[utoipa::path(
    get,
    path = "/download",
    tag = "Assets",
    params(DownloadQuery),
    responses(
        (status = 200, description = "Presigned URL issued", body = DownloadResponse),
        (status = 400, description = "Filename parameter missing or invalid")
    )
)]
pub async fn download_handler(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let filename = query
        .filename
        .as_deref()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| ApiError::bad_request("Filename parameter is missing"))?;
    let filename = sanitize_filename(filename)?;

    let key = format!("videos/{}", filename);
    let url = state.store.presigned_url(&key, state.url_ttl_secs).await?;

    tracing::debug!(key = %key, "issued presigned URL");
    Ok(Json(DownloadResponse { url }))
}

//! Presigned object serving
//!
//! GET /files/{key} dereferences the URLs minted by the filesystem object
//! store. Requests must carry a non-expired HMAC signature over the key and
//! expiry; anything else is refused before touching the disk.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters of a presigned URL
#[derive(Debug, Deserialize)]
pub struct SignedQuery {
    pub expires: Option<u64>,
    pub signature: Option<String>,
}

/// Serve a stored object when the presigned query validates.
pub async fn serve_file_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<SignedQuery>,
) -> Result<Response, ApiError> {
    let expires = query
        .expires
        .ok_or_else(|| ApiError::bad_request("Missing 'expires' parameter"))?;
    let signature = query
        .signature
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Missing 'signature' parameter"))?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(u64::MAX);
    if now > expires {
        return Err(ApiError::forbidden("URL has expired"));
    }
    if !state.store.verify_signature(&key, expires, signature) {
        return Err(ApiError::forbidden("Invalid signature"));
    }

    let path = state.store.object_path(&key)?;
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::not_found(format!("No such object: {}", key))
        } else {
            ApiError::internal(format!("Failed to read object: {}", e))
        }
    })?;

    tracing::debug!(key = %key, bytes = bytes.len(), "served presigned object");
    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], bytes).into_response())
}

//! Health check handler
//!
//! Provides a health endpoint for monitoring and orchestration.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status: "healthy" or "degraded"
    pub status: &'static str,
    /// Server version from Cargo.toml
    pub version: &'static str,
    /// Whether the ffmpeg/ffprobe tools are on PATH
    pub tools_available: bool,
    /// Service name
    pub service: &'static str,
}

/// GET /health - Health check endpoint
///
/// Returns JSON with service status, version, and decoder tool availability.
/// Used for monitoring and load balancer health checks.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    // Without the tools no pipeline can run, but the API itself is up.
    let tools_available = which::which("ffmpeg").is_ok() && which::which("ffprobe").is_ok();

    let status = if tools_available {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        tools_available,
        service: "frameguard-server",
    })
}

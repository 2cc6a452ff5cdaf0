//! OpenAPI documentation configuration
//!
//! Generates the OpenAPI 3.0 specification for the Frameguard API.

use utoipa::OpenApi;

use crate::handlers::{DownloadResponse, HealthResponse, UploadResponse, UploadStatus};

/// Frameguard API - OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Frameguard API",
        version = "0.1.0",
        description = r#"
## Per-Frame Video Tamper Evidence API

Frameguard fingerprints every frame of an ingested video and keeps the
manifest next to a cipher-overlaid marked copy of the asset.

### How It Works

1. **Upload** a video via `POST /upload`. On first sight, every frame is
   SHA3-256 fingerprinted into a manifest and a visibly marked copy is stored.
2. Upload the same filename again and Frameguard **reconciles** it against the
   stored manifest, reporting tampered and missing frame indices.
3. Fetch the marked copy via `GET /download`, which issues a short-lived
   presigned URL.

Any single-byte change to a frame's raw bytes reads as tampering; re-encoding
a video counts as modification by design.
"#,
        license(
            name = "MIT OR Apache-2.0",
            url = "https://github.com/frameguard/frameguard/blob/main/LICENSE"
        ),
        contact(
            name = "Frameguard Team",
            url = "https://github.com/frameguard/frameguard"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    tags(
        (name = "Assets", description = "Ingest, reconcile, and retrieve video assets"),
        (name = "Health", description = "Service health endpoints")
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::upload::upload_handler,
        crate::handlers::download::download_handler,
    ),
    components(
        schemas(
            HealthResponse,
            UploadResponse,
            UploadStatus,
            DownloadResponse,
        )
    )
)]
pub struct ApiDoc;

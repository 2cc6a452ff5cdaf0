//! Frameguard Server - REST API for per-frame video tamper evidence
//!
//! Exposes frameguard-core functionality via HTTP endpoints:
//! - POST /upload   - Ingest a new asset or reconcile a known one
//! - GET  /download - Issue a presigned URL for a marked video
//! - GET  /files/*  - Dereference presigned URLs
//! - GET  /health   - Health check

use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use frameguard_server::{create_router_with_config, ApiDoc, AppState, Config};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("frameguard_server=info,frameguard_core=info")),
        )
        .init();

    let config = Config::from_env();
    let state = AppState::from_config(&config).expect("failed to initialize storage directories");

    let app = create_router_with_config(state, &config)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let addr = config.socket_addr();
    tracing::info!(%addr, storage = %config.storage_dir.display(), "frameguard-server starting");
    tracing::info!("POST /upload   - ingest or reconcile a video (multipart: video)");
    tracing::info!("GET  /download - presigned URL for a marked video (?filename=)");
    tracing::info!("GET  /health   - health check");
    tracing::info!("GET  /docs     - interactive API documentation");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}

//! HTTP request handlers
//!
//! This module contains all the request handlers for the API endpoints.

pub mod download;
pub mod files;
pub mod health;
pub mod upload;

pub use crate::state::AppState;
pub use download::{download_handler, DownloadQuery, DownloadResponse};
pub use files::{serve_file_handler, SignedQuery};
pub use health::{health, HealthResponse};
pub use upload::{upload_handler, UploadResponse, UploadStatus};

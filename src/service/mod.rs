//! Abstract boundary to the remote asset store.
//!
//! The engine talks to exactly one collaborator, the asset query service,
//! through these traits; the HTTP binding lives in [`http`]. Tests swap in
//! in-memory implementations.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::MediaRecord;

pub use http::HttpAssetService;

/// Failure taxonomy of the asset store boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("service error: {0}")]
    Unknown(String),
}

/// Media kind selector for type-restricted queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// API path segment for this kind.
    pub fn path_segment(&self) -> &'static str {
        match self {
            MediaKind::Image => "photos",
            MediaKind::Video => "videos",
        }
    }

    pub fn query_value(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Search/listing operations over the remote media store.
///
/// Results arrive sorted by creation time descending, but that is a
/// display hint only; filtering and shuffling downstream are free to
/// reorder.
#[async_trait]
pub trait AssetQueryService: Send + Sync {
    /// Every record the store will share, across all folders.
    async fn query_all(&self) -> Result<Vec<MediaRecord>, ServiceError>;

    async fn query_by_folder(&self, folder: &str) -> Result<Vec<MediaRecord>, ServiceError>;

    async fn query_by_folder_and_type(
        &self,
        folder: &str,
        kind: MediaKind,
    ) -> Result<Vec<MediaRecord>, ServiceError>;

    /// Distinct tags present in a folder, optionally restricted by kind.
    async fn query_tags_by_folder(
        &self,
        folder: &str,
        kind: Option<MediaKind>,
    ) -> Result<Vec<String>, ServiceError>;

    async fn query_by_folder_type_and_tag(
        &self,
        folder: &str,
        kind: MediaKind,
        tag: &str,
    ) -> Result<Vec<MediaRecord>, ServiceError>;
}

/// Binary transfer of a single asset, used by the preview's download
/// action.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ServiceError>;
}

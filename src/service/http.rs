//! HTTP binding of the asset query service.
//!
//! Routes follow the asset API server: `GET {base}/api/images/{folder}`
//! lists a folder (the folder name `ALL` spans every folder), `/photos`
//! and `/videos` restrict by kind, `/tags` lists tags, and `?tag=` narrows
//! a kind-restricted listing. Every response carries a
//! `{ success, ..., error }` envelope even on HTTP 200.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::models::{MediaRecord, RecordsEnvelope, TagsEnvelope};

use super::{AssetQueryService, Downloader, MediaKind, ServiceError};

/// Pseudo-folder understood by the API as "all folders".
const ALL_FOLDERS: &str = "ALL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpAssetService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssetService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("galeri/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Service reusing an existing client (shared connection pool).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn folder_url(&self, folder: &str) -> String {
        format!("{}/api/images/{}", self.base_url, folder)
    }

    async fn get_records(&self, url: &str) -> Result<Vec<MediaRecord>, ServiceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status, url));
        }

        let envelope: RecordsEnvelope = response
            .json()
            .await
            .map_err(|e| ServiceError::Unknown(format!("malformed response from {url}: {e}")))?;
        if !envelope.success {
            return Err(ServiceError::Unknown(
                envelope.error.unwrap_or_else(|| "unspecified API failure".to_string()),
            ));
        }

        debug!("Fetched {} record(s) from {}", envelope.resources.len(), url);
        Ok(envelope.resources)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    // Connect/timeout problems are retryable transport failures; anything
    // else at this layer is unexpected.
    if err.is_connect() || err.is_timeout() || err.is_request() {
        ServiceError::Transport(err.to_string())
    } else {
        ServiceError::Unknown(err.to_string())
    }
}

fn map_status(status: reqwest::StatusCode, url: &str) -> ServiceError {
    use reqwest::StatusCode;
    match status {
        StatusCode::NOT_FOUND => ServiceError::NotFound(url.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ServiceError::Unauthorized(url.to_string())
        }
        s if s.is_server_error() => {
            ServiceError::Transport(format!("{url} answered {s}"))
        }
        s => ServiceError::Unknown(format!("{url} answered {s}")),
    }
}

#[async_trait]
impl AssetQueryService for HttpAssetService {
    async fn query_all(&self) -> Result<Vec<MediaRecord>, ServiceError> {
        self.get_records(&self.folder_url(ALL_FOLDERS)).await
    }

    #[instrument(skip(self))]
    async fn query_by_folder(&self, folder: &str) -> Result<Vec<MediaRecord>, ServiceError> {
        self.get_records(&self.folder_url(folder)).await
    }

    #[instrument(skip(self))]
    async fn query_by_folder_and_type(
        &self,
        folder: &str,
        kind: MediaKind,
    ) -> Result<Vec<MediaRecord>, ServiceError> {
        let url = format!("{}/{}", self.folder_url(folder), kind.path_segment());
        self.get_records(&url).await
    }

    #[instrument(skip(self))]
    async fn query_tags_by_folder(
        &self,
        folder: &str,
        kind: Option<MediaKind>,
    ) -> Result<Vec<String>, ServiceError> {
        let mut url = format!("{}/tags", self.folder_url(folder));
        if let Some(kind) = kind {
            url.push_str("?type=");
            url.push_str(kind.query_value());
        }

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status, &url));
        }

        let envelope: TagsEnvelope = response
            .json()
            .await
            .map_err(|e| ServiceError::Unknown(format!("malformed response from {url}: {e}")))?;
        if !envelope.success {
            return Err(ServiceError::Unknown(
                envelope.error.unwrap_or_else(|| "unspecified API failure".to_string()),
            ));
        }
        Ok(envelope.tags)
    }

    #[instrument(skip(self))]
    async fn query_by_folder_type_and_tag(
        &self,
        folder: &str,
        kind: MediaKind,
        tag: &str,
    ) -> Result<Vec<MediaRecord>, ServiceError> {
        let url = format!(
            "{}/{}?tag={}",
            self.folder_url(folder),
            kind.path_segment(),
            tag
        );
        self.get_records(&url).await
    }
}

#[async_trait]
impl Downloader for HttpAssetService {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ServiceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status, url));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let service = HttpAssetService::new("http://localhost:3001/").unwrap();
        assert_eq!(
            service.folder_url("Ketua"),
            "http://localhost:3001/api/images/Ketua"
        );
    }

    #[test]
    fn test_status_mapping() {
        use reqwest::StatusCode;
        assert!(matches!(
            map_status(StatusCode::NOT_FOUND, "u"),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            map_status(StatusCode::FORBIDDEN, "u"),
            ServiceError::Unauthorized(_)
        ));
        assert!(matches!(
            map_status(StatusCode::BAD_GATEWAY, "u"),
            ServiceError::Transport(_)
        ));
        assert!(matches!(
            map_status(StatusCode::IM_A_TEAPOT, "u"),
            ServiceError::Unknown(_)
        ));
    }
}

//! Wire format of the remote asset store.
//!
//! These shapes mirror what the asset-search API actually returns and are
//! deserialized as-is; everything downstream works on the normalized
//! [`MediaItem`](super::MediaItem) instead.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Image,
    Video,
}

/// One raw record from the asset store. Immutable from the gallery's
/// perspective; dimensions and tags are frequently absent.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaRecord {
    /// Defaults to empty when absent so one id-less record cannot fail
    /// the whole envelope; the normalizer drops empty ids downstream.
    #[serde(default)]
    pub public_id: String,
    pub resource_type: ResourceType,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub secure_url: String,
}

/// Response envelope for record queries: `{ success, resources, error }`.
#[derive(Debug, Deserialize)]
pub struct RecordsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub resources: Vec<MediaRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response envelope for tag listings: `{ success, tags, error }`.
#[derive(Debug, Deserialize)]
pub struct TagsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

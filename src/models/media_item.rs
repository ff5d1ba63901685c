use std::collections::BTreeSet;

/// Normalized internal representation of one image or video.
///
/// Built once per fetch by the normalizer and discarded wholesale on
/// re-fetch; nothing patches items in place.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    /// Asset-store public id, unique within a gallery session.
    pub id: String,
    pub is_video: bool,
    /// CDN URL for the grid tile.
    pub thumbnail_url: String,
    /// CDN URL for the full-size preview.
    pub display_url: String,
    /// Width over height; always strictly positive.
    pub aspect_ratio: f32,
    pub tags: BTreeSet<String>,
    /// Opaque creation timestamp as reported by the store.
    pub created_at: String,
    /// First path segment of the public id, or `"Uncategorized"`.
    pub folder: String,
}

impl MediaItem {
    /// Relative height of this item's tile at unit column width. Taller
    /// items contribute more height.
    pub fn height_units(&self) -> f32 {
        1.0 / self.aspect_ratio
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Last path segment of the public id; used as the download filename.
    pub fn file_name(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or("download")
    }
}

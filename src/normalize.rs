//! Normalization of raw asset records into [`MediaItem`]s.
//!
//! Pure, order-preserving, no I/O. Broken records (missing public id) are
//! dropped and counted rather than failing the whole response, so one junk
//! record never blanks the gallery.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::GalleryConfig;
use crate::models::{MediaItem, MediaRecord, ResourceType};

/// Pluggable thumbnail URL builder, keyed by video-ness, public id and the
/// target bounding box.
pub type ThumbnailTemplate = Arc<dyn Fn(bool, &str, u32, u32) -> String + Send + Sync>;

/// Folder assigned to items whose public id carries no path segment.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Result of one normalization pass.
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    pub items: Vec<MediaItem>,
    /// Records dropped for having no public id. A side observation, not an
    /// error.
    pub dropped: usize,
}

pub struct Normalizer {
    config: GalleryConfig,
    template: ThumbnailTemplate,
}

impl Normalizer {
    /// Normalizer using the CDN delivery convention from `config`:
    /// images get a `w_{w},h_{h},c_limit` transform, videos a first-frame
    /// poster (`so_0`) with the same bounding box.
    pub fn new(config: GalleryConfig) -> Self {
        let base = config.cdn_base.trim_end_matches('/').to_string();
        let cloud = config.cloud_name.clone();
        let template: ThumbnailTemplate = Arc::new(move |is_video, public_id, w, h| {
            if is_video {
                format!("{base}/{cloud}/video/upload/so_0,w_{w},h_{h},c_limit/{public_id}.jpg")
            } else {
                format!("{base}/{cloud}/image/upload/w_{w},h_{h},c_limit/{public_id}")
            }
        });
        Self { config, template }
    }

    /// Normalizer with a custom thumbnail template, for stores with other
    /// URL conventions.
    pub fn with_template(config: GalleryConfig, template: ThumbnailTemplate) -> Self {
        Self { config, template }
    }

    /// Converts raw records into items, preserving input order.
    pub fn normalize(&self, records: &[MediaRecord]) -> NormalizeOutcome {
        let mut items = Vec::with_capacity(records.len());
        let mut dropped = 0usize;

        for record in records {
            match self.normalize_one(record) {
                Some(item) => items.push(item),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!("Dropped {} malformed record(s) during normalization", dropped);
        }
        debug!("Normalized {} record(s)", items.len());

        NormalizeOutcome { items, dropped }
    }

    fn normalize_one(&self, record: &MediaRecord) -> Option<MediaItem> {
        if record.public_id.is_empty() {
            return None;
        }

        let is_video = record.resource_type == ResourceType::Video;
        let fallback = if is_video {
            self.config.video_fallback
        } else {
            self.config.image_fallback
        };

        // Zero-size dimensions from the store are as useless as missing
        // ones; both take the fallback path.
        let width = record.width.filter(|w| *w > 0).unwrap_or(fallback.width);
        let height = record.height.filter(|h| *h > 0).unwrap_or(fallback.height);
        let aspect_ratio = width as f32 / height as f32;

        let thumbnail_url = (self.template)(
            is_video,
            &record.public_id,
            self.config.thumb_width,
            self.config.thumb_height,
        );

        Some(MediaItem {
            id: record.public_id.clone(),
            is_video,
            thumbnail_url,
            display_url: record.secure_url.clone(),
            aspect_ratio,
            tags: record.tags.iter().cloned().collect::<BTreeSet<_>>(),
            created_at: record.created_at.clone(),
            folder: derive_folder(&record.public_id),
        })
    }
}

/// First path segment of a public id, or [`UNCATEGORIZED`] when empty.
fn derive_folder(public_id: &str) -> String {
    match public_id.split('/').next() {
        Some(first) if !first.is_empty() => first.to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}

//! Gallery configuration.
//!
//! Everything that was ambient in a browser build (CDN base URL, default
//! fallback dimensions, responsive breakpoints) lives in one explicit
//! object handed to the normalizer and layout code at construction time.

use serde::Deserialize;

/// Fallback dimensions applied when the asset store omits width/height.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FallbackDimensions {
    pub width: u32,
    pub height: u32,
}

impl FallbackDimensions {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// One responsive breakpoint: viewports at least `min_width` units wide
/// get `columns` masonry columns.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Breakpoint {
    pub min_width: u32,
    pub columns: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// CDN delivery base, e.g. `https://res.cloudinary.com`.
    pub cdn_base: String,
    /// Cloud/account segment under the CDN base.
    pub cloud_name: String,
    /// Target bounding box for generated thumbnail URLs.
    pub thumb_width: u32,
    pub thumb_height: u32,
    /// Applied when an image record carries no dimensions.
    pub image_fallback: FallbackDimensions,
    /// Applied when a video record carries no dimensions.
    pub video_fallback: FallbackDimensions,
    /// Sorted ascending by `min_width`; the widest matching entry wins.
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            cdn_base: "https://res.cloudinary.com".to_string(),
            cloud_name: "demo".to_string(),
            thumb_width: 600,
            thumb_height: 900,
            image_fallback: FallbackDimensions {
                width: 800,
                height: 600,
            },
            video_fallback: FallbackDimensions {
                width: 640,
                height: 360,
            },
            breakpoints: vec![
                Breakpoint {
                    min_width: 0,
                    columns: 2,
                },
                Breakpoint {
                    min_width: 640,
                    columns: 3,
                },
                Breakpoint {
                    min_width: 1024,
                    columns: 4,
                },
            ],
        }
    }
}

impl GalleryConfig {
    /// Number of masonry columns for a viewport width, per the breakpoint
    /// table. Always at least 1 so the layout contract holds even with an
    /// empty table.
    pub fn columns_for_width(&self, viewport_width: u32) -> usize {
        self.breakpoints
            .iter()
            .filter(|bp| viewport_width >= bp.min_width)
            .map(|bp| bp.columns)
            .last()
            .unwrap_or(1)
            .max(1)
    }
}

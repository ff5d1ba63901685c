//! galeri — a headless media-gallery engine.
//!
//! Fetches image/video records from a remote asset store, normalizes them,
//! applies tag filtering and optional shuffling, balances the result into
//! masonry columns, and drives a full-screen preview state machine. No UI
//! framework underneath: a presentational shell subscribes to state
//! snapshots and issues commands.

pub mod config;
pub mod controller;
pub mod layout;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod preview;
pub mod service;

pub use config::GalleryConfig;
pub use controller::GalleryController;
pub use layout::{ColumnModel, MasonryLayout};
pub use models::{GalleryState, LoadingPhase, MediaItem, MediaRecord};
pub use normalize::Normalizer;
pub use preview::{Preview, PreviewState, SwipeTracker};
pub use service::{AssetQueryService, HttpAssetService, MediaKind, ServiceError};

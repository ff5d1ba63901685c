//! Full-screen preview state machine.
//!
//! Navigation over the currently displayed item list, driven by explicit
//! commands, keyboard keys, or vertical swipe gestures (video mode). The
//! active index is either absent or in bounds; boundary moves are no-ops.

use tracing::{debug, warn};

use crate::models::MediaItem;
use crate::service::Downloader;

/// Minimum vertical displacement for a swipe to count as navigation.
/// Anything smaller is touch jitter.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Keys the preview reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// Read-only snapshot of the preview for the presentational shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewState {
    pub active_index: Option<usize>,
    pub is_open: bool,
}

/// Preview modal over a list of `len` displayed items.
///
/// The list is rebuilt on every fetch; callers report the new length via
/// [`Preview::sync_len`], which closes the preview if the active index no
/// longer exists.
#[derive(Debug, Default)]
pub struct Preview {
    index: Option<usize>,
    len: usize,
}

impl Preview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PreviewState {
        PreviewState {
            active_index: self.index,
            is_open: self.index.is_some(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.index.is_some()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.index
    }

    /// Adjusts to a rebuilt item list. An index past the new end closes
    /// the preview rather than clamping to a different item.
    pub fn sync_len(&mut self, len: usize) {
        self.len = len;
        if matches!(self.index, Some(i) if i >= len) {
            debug!("Item list shrank under the preview; closing");
            self.index = None;
        }
    }

    /// Opens at `index`. Out-of-range (including any index on an empty
    /// list) is rejected.
    pub fn open(&mut self, index: usize) -> bool {
        if index < self.len {
            self.index = Some(index);
            true
        } else {
            false
        }
    }

    pub fn close(&mut self) {
        self.index = None;
    }

    /// Advances to the next item; no-op at the end or when closed.
    pub fn next(&mut self) {
        if let Some(i) = self.index {
            if i + 1 < self.len {
                self.index = Some(i + 1);
            }
        }
    }

    /// Steps back to the previous item; no-op at the start or when closed.
    pub fn prev(&mut self) {
        if let Some(i) = self.index {
            if i > 0 {
                self.index = Some(i - 1);
            }
        }
    }

    pub fn has_next(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.len)
    }

    pub fn has_prev(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    /// Keyboard dispatch: Escape closes, arrows navigate.
    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Escape => self.close(),
            Key::ArrowRight => self.next(),
            Key::ArrowLeft => self.prev(),
        }
    }
}

/// Accumulates one vertical touch gesture and resolves it against
/// [`SWIPE_THRESHOLD`] on release: swipe up advances, swipe down goes
/// back.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_y: Option<f32>,
    current_y: Option<f32>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_start(&mut self, y: f32) {
        self.start_y = Some(y);
        self.current_y = None;
    }

    pub fn touch_move(&mut self, y: f32) {
        self.current_y = Some(y);
    }

    /// Ends the gesture, applying it to `preview` when the displacement
    /// clears the threshold.
    pub fn touch_end(&mut self, preview: &mut Preview) {
        let displacement = match (self.start_y.take(), self.current_y.take()) {
            (Some(start), Some(end)) => start - end,
            _ => return,
        };
        if displacement > SWIPE_THRESHOLD {
            preview.next();
        } else if displacement < -SWIPE_THRESHOLD {
            preview.prev();
        }
    }
}

/// A downloaded asset ready to hand to the shell for saving.
#[derive(Debug, Clone)]
pub struct DownloadedMedia {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Downloads `item`'s full-size asset.
///
/// Independent of navigation state and deliberately infallible from the
/// caller's perspective: transport failures are logged and reported as
/// `None` so the preview stays open and usable.
pub async fn download(downloader: &dyn Downloader, item: &MediaItem) -> Option<DownloadedMedia> {
    match downloader.fetch_bytes(&item.display_url).await {
        Ok(bytes) => Some(DownloadedMedia {
            file_name: item.file_name().to_string(),
            bytes,
        }),
        Err(err) => {
            warn!("Download of {} failed: {}", item.id, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use async_trait::async_trait;

    use crate::service::ServiceError;

    use super::*;

    fn open_preview(len: usize, at: usize) -> Preview {
        let mut preview = Preview::new();
        preview.sync_len(len);
        assert!(preview.open(at));
        preview
    }

    #[test]
    fn test_open_rejects_out_of_range() {
        let mut preview = Preview::new();
        preview.sync_len(0);
        assert!(!preview.open(0), "open on an empty list must fail");

        preview.sync_len(3);
        assert!(!preview.open(3));
        assert!(preview.open(2));
    }

    #[test]
    fn test_navigation_bounds() {
        let mut preview = open_preview(3, 0);
        preview.prev();
        assert_eq!(preview.active_index(), Some(0), "prev at start is a no-op");

        preview.next();
        preview.next();
        assert_eq!(preview.active_index(), Some(2));
        preview.next();
        assert_eq!(preview.active_index(), Some(2), "next at end is a no-op");
    }

    #[test]
    fn test_single_item_list_pins_both_directions() {
        let mut preview = open_preview(1, 0);
        preview.next();
        preview.prev();
        assert_eq!(preview.active_index(), Some(0));
        assert!(!preview.has_next());
        assert!(!preview.has_prev());
    }

    #[test]
    fn test_close_resets_index() {
        let mut preview = open_preview(2, 1);
        preview.close();
        assert_eq!(preview.active_index(), None);
        assert!(!preview.is_open());

        // Navigation while closed stays closed.
        preview.next();
        preview.prev();
        assert!(!preview.is_open());
    }

    #[test]
    fn test_sync_len_closes_on_shrink() {
        let mut preview = open_preview(5, 4);
        preview.sync_len(3);
        assert!(!preview.is_open());

        let mut survivor = open_preview(5, 1);
        survivor.sync_len(3);
        assert_eq!(survivor.active_index(), Some(1));
    }

    #[test]
    fn test_key_dispatch() {
        let mut preview = open_preview(3, 1);
        preview.handle_key(Key::ArrowRight);
        assert_eq!(preview.active_index(), Some(2));
        preview.handle_key(Key::ArrowLeft);
        assert_eq!(preview.active_index(), Some(1));
        preview.handle_key(Key::Escape);
        assert!(!preview.is_open());
    }

    #[test]
    fn test_swipe_up_advances() {
        let mut preview = open_preview(3, 0);
        let mut swipe = SwipeTracker::new();
        swipe.touch_start(400.0);
        swipe.touch_move(300.0);
        swipe.touch_end(&mut preview);
        assert_eq!(preview.active_index(), Some(1));
    }

    #[test]
    fn test_swipe_down_goes_back() {
        let mut preview = open_preview(3, 2);
        let mut swipe = SwipeTracker::new();
        swipe.touch_start(200.0);
        swipe.touch_move(320.0);
        swipe.touch_end(&mut preview);
        assert_eq!(preview.active_index(), Some(1));
    }

    #[test]
    fn test_swipe_below_threshold_ignored() {
        let mut preview = open_preview(3, 1);
        let mut swipe = SwipeTracker::new();
        swipe.touch_start(300.0);
        swipe.touch_move(300.0 - SWIPE_THRESHOLD);
        swipe.touch_end(&mut preview);
        assert_eq!(preview.active_index(), Some(1), "exactly-threshold is jitter");
    }

    #[test]
    fn test_swipe_without_move_ignored() {
        let mut preview = open_preview(3, 1);
        let mut swipe = SwipeTracker::new();
        swipe.touch_start(300.0);
        swipe.touch_end(&mut preview);
        assert_eq!(preview.active_index(), Some(1));
    }

    struct FailingDownloader;

    #[async_trait]
    impl Downloader for FailingDownloader {
        async fn fetch_bytes(&self, _url: &str) -> Result<Vec<u8>, ServiceError> {
            Err(ServiceError::Transport("network down".to_string()))
        }
    }

    struct CannedDownloader(Vec<u8>);

    #[async_trait]
    impl Downloader for CannedDownloader {
        async fn fetch_bytes(&self, _url: &str) -> Result<Vec<u8>, ServiceError> {
            Ok(self.0.clone())
        }
    }

    fn make_item(id: &str) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            is_video: false,
            thumbnail_url: String::new(),
            display_url: format!("https://cdn.example/{id}"),
            aspect_ratio: 1.0,
            tags: BTreeSet::new(),
            created_at: String::new(),
            folder: "g".to_string(),
        }
    }

    #[tokio::test]
    async fn test_download_failure_is_quiet() {
        let item = make_item("g/pic");
        assert!(download(&FailingDownloader, &item).await.is_none());
    }

    #[tokio::test]
    async fn test_download_uses_last_path_segment_as_name() {
        let item = make_item("Ketua/felfest/img_01");
        let media = download(&CannedDownloader(vec![1, 2, 3]), &item)
            .await
            .expect("download succeeds");
        assert_eq!(media.file_name, "img_01");
        assert_eq!(media.bytes, vec![1, 2, 3]);
    }
}

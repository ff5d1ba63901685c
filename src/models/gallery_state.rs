use crate::models::MediaItem;

/// Lifecycle phase of the gallery fetch state machine.
///
/// `Empty` is a terminal display state of its own, distinct from `Error`:
/// the fetch succeeded but yielded zero items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Idle,
    Loading,
    Ready,
    Empty,
    Error,
}

/// Snapshot of the gallery as seen by the presentational shell.
///
/// Owned exclusively by the fetch controller; observers receive clones and
/// never mutate it.
#[derive(Debug, Clone)]
pub struct GalleryState {
    /// Valid content only in `Ready` (empty otherwise).
    pub items: Vec<MediaItem>,
    /// Active tag filter; `"all"` means no filtering.
    pub selected_tag: String,
    /// Folder currently queried, if restricted to one.
    pub folder: Option<String>,
    pub phase: LoadingPhase,
    /// Populated only in `Error`; includes the attempted folder/filter so
    /// the user can retry without losing their selection.
    pub error: Option<String>,
}

impl GalleryState {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected_tag: "all".to_string(),
            folder: None,
            phase: LoadingPhase::Idle,
            error: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.phase,
            LoadingPhase::Ready | LoadingPhase::Empty | LoadingPhase::Error
        )
    }
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new()
    }
}

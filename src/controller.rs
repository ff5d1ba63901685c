//! Gallery fetch controller.
//!
//! Owns the [`GalleryState`] and drives the Idle/Loading/Ready/Empty/Error
//! machine. Filter and folder changes re-enter `Loading` and supersede any
//! in-flight request: a monotonic generation counter is bumped at the start
//! of every refresh and checked again before results are applied, so the
//! last request *initiated* wins no matter which completes first.
//!
//! State changes are pushed to registered observers as read-only snapshots;
//! there is no framework lifecycle underneath.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::models::{GalleryState, LoadingPhase, MediaRecord};
use crate::normalize::Normalizer;
use crate::pipeline::{self, TAG_ALL};
use crate::service::{AssetQueryService, MediaKind, ServiceError};

pub type StateObserver = Arc<dyn Fn(&GalleryState) + Send + Sync>;

struct Inner {
    state: GalleryState,
    kind: Option<MediaKind>,
}

pub struct GalleryController<S> {
    service: Arc<S>,
    normalizer: Normalizer,
    /// Re-roll presentation order on every fetch.
    shuffle: bool,
    inner: Mutex<Inner>,
    generation: AtomicU64,
    observers: Mutex<Vec<StateObserver>>,
}

impl<S: AssetQueryService> GalleryController<S> {
    pub fn new(service: Arc<S>, normalizer: Normalizer) -> Self {
        Self {
            service,
            normalizer,
            shuffle: false,
            inner: Mutex::new(Inner {
                state: GalleryState::new(),
                kind: None,
            }),
            generation: AtomicU64::new(0),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Enables per-fetch shuffling of the displayed order.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Current state snapshot.
    pub fn state(&self) -> GalleryState {
        self.inner.lock().state.clone()
    }

    /// Registers an observer invoked with a snapshot on every phase change.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&GalleryState) + Send + Sync + 'static,
    {
        self.observers.lock().push(Arc::new(observer));
    }

    /// Changes the active tag filter and re-fetches.
    pub async fn set_filter(&self, tag: impl Into<String>) {
        self.inner.lock().state.selected_tag = tag.into();
        self.refresh().await;
    }

    /// Changes the source folder (`None` = all folders) and re-fetches.
    pub async fn set_folder(&self, folder: Option<String>) {
        self.inner.lock().state.folder = folder;
        self.refresh().await;
    }

    /// Restricts results to one media kind (`None` = both) and re-fetches.
    pub async fn set_kind(&self, kind: Option<MediaKind>) {
        self.inner.lock().kind = kind;
        self.refresh().await;
    }

    /// Distinct tags available in the current folder, for filter chrome.
    pub async fn available_tags(&self) -> Result<Vec<String>, ServiceError> {
        let (folder, kind) = {
            let inner = self.inner.lock();
            (inner.state.folder.clone(), inner.kind)
        };
        match folder {
            Some(folder) => self.service.query_tags_by_folder(&folder, kind).await,
            None => Err(ServiceError::NotFound(
                "tag listing needs a folder".to_string(),
            )),
        }
    }

    /// Fetches and rebuilds the item list for the current folder/kind/tag.
    ///
    /// Enters `Loading` before suspending and is guaranteed to leave it
    /// again on every code path. Exactly one outbound query per call.
    pub async fn refresh(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (folder, kind, tag) = {
            let mut inner = self.inner.lock();
            inner.state.phase = LoadingPhase::Loading;
            inner.state.error = None;
            inner.state.items.clear();
            (
                inner.state.folder.clone(),
                inner.kind,
                inner.state.selected_tag.clone(),
            )
        };
        self.notify();

        let result = self.query(folder.as_deref(), kind, &tag).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale fetch result (generation {})", generation);
            return;
        }

        let applied = {
            let mut inner = self.inner.lock();
            // Re-check under the lock: a newer refresh may have started
            // between the load above and acquiring the lock.
            if self.generation.load(Ordering::SeqCst) != generation {
                false
            } else {
                match result {
                    Ok(records) => {
                        let outcome = self.normalizer.normalize(&records);
                        let mut items = pipeline::filter_by_tag(&outcome.items, &tag);
                        if self.shuffle {
                            items = pipeline::shuffled(&items, &mut rand::rng());
                        }
                        inner.state.phase = if items.is_empty() {
                            LoadingPhase::Empty
                        } else {
                            LoadingPhase::Ready
                        };
                        info!(
                            "Gallery ready: {} item(s), {} dropped, folder {:?}, tag {:?}",
                            items.len(),
                            outcome.dropped,
                            folder,
                            tag
                        );
                        inner.state.items = items;
                        inner.state.error = None;
                    }
                    Err(err) => {
                        let scope = folder.as_deref().unwrap_or("all folders");
                        warn!("Gallery fetch failed for {}: {}", scope, err);
                        inner.state.phase = LoadingPhase::Error;
                        inner.state.error = Some(format!(
                            "Failed to load {scope} (filter {tag:?}): {err}"
                        ));
                    }
                }
                true
            }
        };

        if applied {
            self.notify();
        }
    }

    /// Picks the narrowest service operation the current selection allows.
    /// Server-side tag narrowing is only available together with a folder
    /// and kind; everywhere else the tag filter runs client-side.
    async fn query(
        &self,
        folder: Option<&str>,
        kind: Option<MediaKind>,
        tag: &str,
    ) -> Result<Vec<MediaRecord>, ServiceError> {
        match (folder, kind) {
            (Some(folder), Some(kind)) if tag != TAG_ALL => {
                self.service
                    .query_by_folder_type_and_tag(folder, kind, tag)
                    .await
            }
            (Some(folder), Some(kind)) => {
                self.service.query_by_folder_and_type(folder, kind).await
            }
            (Some(folder), None) => self.service.query_by_folder(folder).await,
            (None, _) => self.service.query_all().await,
        }
    }

    fn notify(&self) {
        // Snapshot and observer handles are taken before dispatch so a
        // callback may call `state()` or `subscribe()` without
        // deadlocking on either lock.
        let snapshot = self.state();
        let observers: Vec<StateObserver> = self.observers.lock().clone();
        for observer in &observers {
            observer(&snapshot);
        }
    }
}

// "Add image from media library" popup
// Headless host shell around PaginatedMediaLoader: lifecycle, the list
// surface the loader renders into, selection, and the editor event bus.

use std::sync::Arc;

use async_channel::{Receiver, Sender};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::events::{EditorCommand, EditorEvent, EditorMessage};
use super::scroll::ScrollMetrics;
use crate::loader::{FetchFailure, LoaderSink, MediaSource, PaginatedMediaLoader};
use crate::models::MediaItem;

pub const TITLE: &str = "Add image";
pub const LABEL_TRY_AGAIN: &str = "Try again";
pub const LABEL_LOADING: &str = "Loading...";
pub const LABEL_OK: &str = "OK";
pub const LABEL_CANCEL: &str = "Cancel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Hidden,
    Shown,
    Removed,
}

/// What a renderer would draw for the popup body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceState {
    pub entries: Vec<MediaItem>,
    /// Index of the highlighted entry
    pub active: Option<usize>,
    pub loading_visible: bool,
    pub retry_visible: bool,
}

/// List surface the loader appends into.
#[derive(Debug, Default)]
pub struct MediaSurface {
    state: Mutex<SurfaceState>,
}

impl MediaSurface {
    pub fn snapshot(&self) -> SurfaceState {
        self.state.lock().clone()
    }

    pub fn clear(&self) {
        *self.state.lock() = SurfaceState::default();
    }

    /// Highlights the entry at `index`, or clears the highlight when it is
    /// already active. Returns the active index afterwards.
    pub fn toggle(&self, index: usize) -> Option<usize> {
        let mut state = self.state.lock();
        if index >= state.entries.len() {
            return state.active;
        }
        state.active = if state.active == Some(index) {
            None
        } else {
            Some(index)
        };
        state.active
    }

    pub fn active_item(&self) -> Option<MediaItem> {
        let state = self.state.lock();
        state.active.and_then(|i| state.entries.get(i).cloned())
    }
}

impl LoaderSink for MediaSurface {
    fn on_loading_started(&self) {
        let mut state = self.state.lock();
        state.loading_visible = true;
        state.retry_visible = false;
    }

    fn on_item(&self, item: &MediaItem) {
        self.state.lock().entries.push(item.clone());
    }

    fn on_error(&self, _error: &FetchFailure) {
        self.state.lock().retry_visible = true;
    }

    fn on_loading_finished(&self) {
        self.state.lock().loading_visible = false;
    }
}

/// Modal popup for browsing the media library and picking one image.
pub struct MediaPopup<S> {
    loader: PaginatedMediaLoader<S, Arc<MediaSurface>>,
    surface: Arc<MediaSurface>,
    lifecycle: Mutex<Lifecycle>,
    outbox: Sender<EditorMessage>,
}

impl<S: MediaSource> MediaPopup<S> {
    pub fn new(source: S, outbox: Sender<EditorMessage>) -> Self {
        let surface = Arc::new(MediaSurface::default());
        Self {
            loader: PaginatedMediaLoader::new(source, Arc::clone(&surface)),
            surface,
            lifecycle: Mutex::new(Lifecycle::Hidden),
            outbox,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.lock()
    }

    pub fn is_visible(&self) -> bool {
        self.lifecycle() == Lifecycle::Shown
    }

    pub fn surface(&self) -> SurfaceState {
        self.surface.snapshot()
    }

    pub fn loader(&self) -> &PaginatedMediaLoader<S, Arc<MediaSurface>> {
        &self.loader
    }

    /// Shows the popup and requests the first page.
    pub async fn show(&self) {
        {
            let mut lifecycle = self.lifecycle.lock();
            if *lifecycle != Lifecycle::Hidden {
                return;
            }
            *lifecycle = Lifecycle::Shown;
        }
        info!(title = TITLE, "Media popup shown");
        debug!(
            ok = LABEL_OK,
            cancel = LABEL_CANCEL,
            loading = LABEL_LOADING,
            retry = LABEL_TRY_AGAIN,
            "Popup chrome"
        );
        self.loader.load().await;
    }

    /// Hides the popup, clears the list and starts a fresh session.
    pub fn hide(&self) {
        {
            let mut lifecycle = self.lifecycle.lock();
            if *lifecycle != Lifecycle::Shown {
                return;
            }
            *lifecycle = Lifecycle::Hidden;
        }
        self.surface.clear();
        self.loader.reset();
        debug!("Media popup hidden");
    }

    /// Hides the popup for good; later calls and events are ignored.
    pub fn remove(&self) {
        self.hide();
        *self.lifecycle.lock() = Lifecycle::Removed;
        debug!("Media popup removed");
    }

    /// Scroll event of the list container.
    pub async fn on_scroll(&self, metrics: ScrollMetrics) {
        if !self.is_visible() || self.loader.all_loaded() {
            return;
        }
        if metrics.wants_more() {
            self.loader.load().await;
        }
    }

    /// The retry control was activated.
    pub async fn retry(&self) {
        if self.is_visible() {
            self.loader.load().await;
        }
    }

    /// Click on the list entry at `index`.
    pub fn select(&self, index: usize) -> Option<usize> {
        if !self.is_visible() {
            return None;
        }
        self.surface.toggle(index)
    }

    /// OK button: inserts the active entry, if any, and hides the popup.
    pub fn confirm(&self) {
        if !self.is_visible() {
            return;
        }
        if let Some(item) = self.surface.active_item() {
            let command = EditorCommand::add_image(item.full_url, &item.alt_text);
            info!(?command, "Inserting image");
            self.emit(EditorMessage::Command(command));
        }
        self.hide();
    }

    /// Cancel button.
    pub fn cancel(&self) {
        self.hide();
    }

    pub async fn handle_event(&self, event: EditorEvent) {
        if self.lifecycle() == Lifecycle::Removed {
            return;
        }
        debug!(?event, "Editor event");
        match event {
            EditorEvent::Focus | EditorEvent::CloseAllPopup => self.hide(),
            EditorEvent::OpenPopupAddFromMedia => {
                // Our own close-all listener runs too, so a visible popup
                // reopens on a fresh session
                self.emit(EditorMessage::CloseAllPopup);
                self.hide();
                self.show().await;
            }
        }
    }

    /// Dispatches editor events until the channel closes or the popup is
    /// removed.
    pub async fn listen(&self, events: Receiver<EditorEvent>) {
        while let Ok(event) = events.recv().await {
            self.handle_event(event).await;
            if self.lifecycle() == Lifecycle::Removed {
                break;
            }
        }
    }

    fn emit(&self, message: EditorMessage) {
        if let Err(err) = self.outbox.try_send(message) {
            warn!(error = %err, "Editor bus rejected message");
        }
    }
}

// Scripted fetch source and recording sink shared by loader and popup tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

use super::{FetchFailure, LoaderSink, MediaSource};
use crate::models::{MediaItem, MediaPage};

pub fn page(items: &[(&str, &str, &str)], last_page: u32) -> MediaPage {
    let items = items
        .iter()
        .map(|(thumb, full, alt)| MediaItem::new(*thumb, *full, *alt))
        .collect();
    // current_page is not consulted by the loader
    MediaPage::new(items, 0, last_page)
}

struct Step {
    gate: Option<Arc<Notify>>,
    result: Result<MediaPage, FetchFailure>,
}

/// Replays canned responses in request order. Requests past the end of the
/// script fail with a transport error.
#[derive(Default)]
pub struct ScriptedSource {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<u32>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_ok(self, page: MediaPage) -> Self {
        self.push(None, Ok(page))
    }

    pub fn then_err(self, err: FetchFailure) -> Self {
        self.push(None, Err(err))
    }

    /// The response is held back until `gate` is notified.
    pub fn then_gated(self, gate: Arc<Notify>, result: Result<MediaPage, FetchFailure>) -> Self {
        self.push(Some(gate), result)
    }

    fn push(self, gate: Option<Arc<Notify>>, result: Result<MediaPage, FetchFailure>) -> Self {
        self.steps.lock().push_back(Step { gate, result });
        self
    }

    pub fn requests(&self) -> Vec<u32> {
        self.requests.lock().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl MediaSource for ScriptedSource {
    async fn fetch_page(&self, page: u32) -> Result<MediaPage, FetchFailure> {
        self.requests.lock().push(page);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let step = self.steps.lock().pop_front();
        let result = match step {
            Some(step) => {
                if let Some(gate) = step.gate {
                    gate.notified().await;
                }
                step.result
            }
            None => Err(FetchFailure::Transport("script exhausted".into())),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    LoadingStarted,
    Item(String),
    Error(FetchFailure),
    AllLoaded,
    LoadingFinished,
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
    items: Mutex<Vec<MediaItem>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().clone()
    }

    pub fn items(&self) -> Vec<MediaItem> {
        self.items.lock().clone()
    }
}

impl LoaderSink for RecordingSink {
    fn on_loading_started(&self) {
        self.events.lock().push(SinkEvent::LoadingStarted);
    }

    fn on_item(&self, item: &MediaItem) {
        self.events
            .lock()
            .push(SinkEvent::Item(item.thumbnail_url.clone()));
        self.items.lock().push(item.clone());
    }

    fn on_error(&self, error: &FetchFailure) {
        self.events.lock().push(SinkEvent::Error(error.clone()));
    }

    fn on_all_loaded(&self) {
        self.events.lock().push(SinkEvent::AllLoaded);
    }

    fn on_loading_finished(&self) {
        self.events.lock().push(SinkEvent::LoadingFinished);
    }
}

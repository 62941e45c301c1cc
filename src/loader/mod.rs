//! Incremental paginated loading for the media popup.
//!
//! - `PaginatedMediaLoader` - fetches one page at a time on demand
//! - `LoaderState` - the `Idle → Loading → {Idle, Exhausted}` machine
//! - `MediaSource` / `LoaderSink` - injected fetch and presentation capabilities
//!
//! `load` may be called redundantly from independent triggers (popup shown,
//! scroll near the bottom, retry clicked). The guard at its entry is the only
//! gate: overlapping calls return immediately, so there is never more than
//! one fetch in flight per session.

pub mod sink;
pub mod source;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use sink::LoaderSink;
pub use source::{FetchFailure, MediaSource};
pub use state::LoaderState;

use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};

struct Session {
    state: LoaderState,
    /// Bumped by `reset`; fetches started under an older id are discarded.
    id: u64,
}

/// Fetches pages of a remote media collection and hands the items to a sink.
pub struct PaginatedMediaLoader<S, K> {
    source: S,
    sink: K,
    session: Mutex<Session>,
}

impl<S, K> PaginatedMediaLoader<S, K>
where
    S: MediaSource,
    K: LoaderSink,
{
    pub fn new(source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            session: Mutex::new(Session {
                state: LoaderState::default(),
                id: 0,
            }),
        }
    }

    /// Fetches the next page unless a fetch is already running or the
    /// collection is exhausted.
    ///
    /// Failures are recovered here: the sink is told to show the retry
    /// control and the next call fetches the same page again.
    pub async fn load(&self) {
        let (page, session_id) = {
            let mut session = self.session.lock();
            match session.state.begin() {
                Some(page) => (page, session.id),
                None => {
                    trace!(state = ?session.state, "Load skipped");
                    return;
                }
            }
        };

        self.sink.on_loading_started();
        debug!(page, "Fetching media page");

        let result = self.source.fetch_page(page).await;

        let settled = {
            let mut session = self.session.lock();
            if session.id != session_id {
                debug!(page, "Discarding page from a previous session");
                return;
            }
            match result {
                Ok(media_page) => {
                    let exhausted = session.state.succeed(media_page.last_page);
                    Ok((media_page, exhausted))
                }
                Err(err) => {
                    session.state.fail();
                    Err(err)
                }
            }
        };

        match settled {
            Ok((media_page, exhausted)) => {
                debug!(
                    page,
                    items = media_page.items.len(),
                    last_page = media_page.last_page,
                    "Media page loaded"
                );
                for item in &media_page.items {
                    self.sink.on_item(item);
                }
                if exhausted {
                    info!(pages = page, "Media library fully loaded");
                    self.sink.on_all_loaded();
                }
            }
            Err(err) => {
                warn!(page, error = %err, "Failed to load media page");
                self.sink.on_error(&err);
            }
        }

        self.sink.on_loading_finished();
    }

    /// Starts a new session on page 1.
    pub fn reset(&self) {
        let mut session = self.session.lock();
        session.state = LoaderState::default();
        session.id = session.id.wrapping_add(1);
        trace!(session = session.id, "Loader reset");
    }

    pub fn state(&self) -> LoaderState {
        self.session.lock().state
    }

    pub fn current_page(&self) -> u32 {
        self.state().current_page()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    pub fn all_loaded(&self) -> bool {
        self.state().all_loaded()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Notify;

    use super::testing::{page, RecordingSink, ScriptedSource, SinkEvent};
    use super::*;
    use crate::models::MediaItem;

    fn loader(source: ScriptedSource) -> PaginatedMediaLoader<ScriptedSource, RecordingSink> {
        PaginatedMediaLoader::new(source, RecordingSink::default())
    }

    #[tokio::test]
    async fn test_first_load_delivers_items() {
        let source = ScriptedSource::new().then_ok(page(&[("a.jpg", "A.jpg", "alt-a")], 2));
        let loader = loader(source);

        loader.load().await;

        assert_eq!(loader.source().requests(), vec![1]);
        assert_eq!(
            loader.sink().items(),
            vec![MediaItem::new("a.jpg", "A.jpg", "alt-a")]
        );
        assert_eq!(loader.current_page(), 2);
        assert!(!loader.all_loaded());
        assert!(!loader.is_loading());
        assert_eq!(
            loader.sink().events(),
            vec![
                SinkEvent::LoadingStarted,
                SinkEvent::Item("a.jpg".into()),
                SinkEvent::LoadingFinished,
            ]
        );
    }

    #[tokio::test]
    async fn test_overlapping_triggers_issue_one_request() {
        let gate = Arc::new(Notify::new());
        let source = ScriptedSource::new()
            .then_gated(gate.clone(), Ok(page(&[("a.jpg", "A.jpg", "")], 5)));
        let loader = loader(source);

        let triggers = async {
            tokio::task::yield_now().await;
            assert!(loader.is_loading());
            for _ in 0..5 {
                loader.load().await;
            }
            assert_eq!(loader.source().requests(), vec![1]);
            gate.notify_one();
        };
        tokio::join!(loader.load(), triggers);

        assert_eq!(loader.source().requests(), vec![1]);
        assert_eq!(loader.source().max_in_flight(), 1);
        assert_eq!(loader.current_page(), 2);
        assert_eq!(loader.sink().items().len(), 1);
    }

    #[tokio::test]
    async fn test_stops_after_last_page() {
        let source = ScriptedSource::new()
            .then_ok(page(&[("1.jpg", "1", "")], 3))
            .then_ok(page(&[("2.jpg", "2", "")], 3))
            .then_ok(page(&[("3.jpg", "3", "")], 3));
        let loader = loader(source);

        for expected_page in 1..=3 {
            assert_eq!(loader.current_page(), expected_page);
            loader.load().await;
        }

        assert!(loader.all_loaded());
        assert_eq!(loader.current_page(), 4);
        assert_eq!(loader.state(), LoaderState::Exhausted { next_page: 4 });
        assert_eq!(
            loader
                .sink()
                .events()
                .iter()
                .filter(|e| **e == SinkEvent::AllLoaded)
                .count(),
            1
        );

        loader.load().await;
        assert_eq!(loader.source().requests(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_retries_same_page() {
        let source = ScriptedSource::new()
            .then_ok(page(&[("1.jpg", "1", "")], 3))
            .then_err(FetchFailure::Status(500))
            .then_ok(page(&[("2.jpg", "2", "")], 3));
        let loader = loader(source);

        loader.load().await;
        loader.load().await;

        assert_eq!(loader.current_page(), 2);
        assert!(!loader.all_loaded());
        assert!(!loader.is_loading());
        let events = loader.sink().events();
        assert_eq!(
            &events[events.len() - 3..],
            &[
                SinkEvent::LoadingStarted,
                SinkEvent::Error(FetchFailure::Status(500)),
                SinkEvent::LoadingFinished,
            ]
        );

        loader.load().await;
        assert_eq!(loader.source().requests(), vec![1, 2, 2]);
        assert_eq!(loader.current_page(), 3);
    }

    #[tokio::test]
    async fn test_reset_restarts_from_first_page() {
        let source = ScriptedSource::new()
            .then_ok(page(&[("1.jpg", "1", "")], 2))
            .then_ok(page(&[("2.jpg", "2", "")], 2))
            .then_ok(page(&[("1.jpg", "1", "")], 2));
        let loader = loader(source);

        loader.load().await;
        loader.load().await;
        assert!(loader.all_loaded());

        loader.reset();
        assert_eq!(loader.state(), LoaderState::Idle { page: 1 });

        loader.load().await;
        assert_eq!(loader.source().requests(), vec![1, 2, 1]);
        assert_eq!(loader.current_page(), 2);
    }

    #[tokio::test]
    async fn test_fetch_settling_after_reset_is_discarded() {
        let gate = Arc::new(Notify::new());
        let source = ScriptedSource::new()
            .then_gated(gate.clone(), Ok(page(&[("stale.jpg", "stale", "")], 1)))
            .then_ok(page(&[("fresh.jpg", "fresh", "")], 3));
        let loader = loader(source);

        let next_session = async {
            tokio::task::yield_now().await;
            loader.reset();
            loader.load().await;
            gate.notify_one();
        };
        tokio::join!(loader.load(), next_session);

        assert_eq!(loader.source().requests(), vec![1, 1]);
        assert_eq!(loader.state(), LoaderState::Idle { page: 2 });
        assert_eq!(
            loader.sink().items(),
            vec![MediaItem::new("fresh.jpg", "fresh", "")]
        );
    }
}

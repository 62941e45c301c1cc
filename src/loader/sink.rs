use std::sync::Arc;

use super::source::FetchFailure;
use crate::models::MediaItem;

/// Receives the loader's presentation side effects.
///
/// Only `on_item` is mandatory; a host without a loading indicator or retry
/// control can ignore the rest.
pub trait LoaderSink {
    /// A fetch started: show the loading indicator, hide the retry control.
    fn on_loading_started(&self) {}

    /// Called once per fetched item, in response order.
    fn on_item(&self, item: &MediaItem);

    /// The fetch failed: show the retry control.
    fn on_error(&self, _error: &FetchFailure) {}

    /// The last page has been delivered.
    fn on_all_loaded(&self) {}

    /// The fetch settled either way: hide the loading indicator.
    fn on_loading_finished(&self) {}
}

impl<K: LoaderSink + ?Sized> LoaderSink for Arc<K> {
    fn on_loading_started(&self) {
        (**self).on_loading_started()
    }

    fn on_item(&self, item: &MediaItem) {
        (**self).on_item(item)
    }

    fn on_error(&self, error: &FetchFailure) {
        (**self).on_error(error)
    }

    fn on_all_loaded(&self) {
        (**self).on_all_loaded()
    }

    fn on_loading_finished(&self) {
        (**self).on_loading_finished()
    }
}

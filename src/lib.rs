//! "Add image from media library" popup for a rich-text editor.
//!
//! The heart of the crate is [`loader::PaginatedMediaLoader`], which pulls
//! pages of an external media library on demand, never runs two fetches at
//! once, stops when the server reports the last page, and leaves failed pages
//! in place for a user-initiated retry. [`ui::MediaPopup`] is the headless
//! popup shell that drives it from show/scroll/retry triggers and emits
//! `AddImage` commands to the editor.

pub mod app;
pub mod client;
pub mod config;
pub mod loader;
pub mod models;
pub mod ui;

pub use client::HttpMediaSource;
pub use loader::{FetchFailure, LoaderSink, LoaderState, MediaSource, PaginatedMediaLoader};
pub use models::{MediaItem, MediaPage};
pub use ui::{EditorCommand, EditorEvent, EditorMessage, MediaPopup};

//! Headless browse session.
//!
//! Opens the popup the way the editor toolbar would, scrolls the list to the
//! bottom until the library is exhausted (or a page limit is hit), retries
//! failed pages a bounded number of times on the user's behalf, and finally
//! confirms or cancels a selection. Every listed item and every editor
//! command is written as one JSON line.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ViewportConfig;
use crate::loader::MediaSource;
use crate::models::MediaItem;
use crate::ui::{EditorCommand, EditorEvent, EditorMessage, MediaPopup, VirtualViewport};

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Stop after this many pages have been delivered. The page loaded on
    /// show always counts, so values below 1 behave like 1.
    pub max_pages: Option<u32>,
    /// Retry activations allowed after failed fetches.
    pub retries: u32,
    /// Entry to confirm at the end; `None` cancels the popup.
    pub select: Option<usize>,
    pub viewport: VirtualViewport,
}

impl SessionOptions {
    pub fn new(viewport: &ViewportConfig) -> Self {
        Self {
            max_pages: None,
            retries: 0,
            select: None,
            viewport: VirtualViewport::new(viewport.row_height, viewport.height),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub items: usize,
    pub pages: u32,
    pub all_loaded: bool,
    /// Set when retries ran out with the retry control still showing.
    pub gave_up: bool,
    pub commands: Vec<EditorCommand>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputLine<'a> {
    Item {
        index: usize,
        #[serde(flatten)]
        item: &'a MediaItem,
    },
    Command(&'a EditorCommand),
}

fn write_line<W: Write>(out: &mut W, line: &OutputLine<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, line).context("Failed to encode output")?;
    writeln!(out).context("Failed to write output")?;
    Ok(())
}

/// Runs one browse session against `source`.
pub async fn run<S, W>(source: S, options: SessionOptions, out: &mut W) -> Result<SessionReport>
where
    S: MediaSource,
    W: Write,
{
    let (bus_tx, bus_rx) = async_channel::unbounded();
    let popup = MediaPopup::new(source, bus_tx);
    let mut viewport = options.viewport;
    let mut retries_left = options.retries;
    let mut gave_up = false;

    popup.handle_event(EditorEvent::OpenPopupAddFromMedia).await;

    loop {
        let surface = popup.surface();
        let loader = popup.loader();
        let pages = loader.current_page() - 1;

        if surface.retry_visible {
            if retries_left == 0 {
                warn!(page = loader.current_page(), "Giving up after failed fetch");
                gave_up = true;
                break;
            }
            retries_left -= 1;
            info!(page = loader.current_page(), retries_left, "Retrying");
            popup.retry().await;
            continue;
        }

        if loader.all_loaded() {
            break;
        }
        if options.max_pages.is_some_and(|max| pages >= max) {
            debug!(pages, "Page limit reached");
            break;
        }

        let metrics = viewport.scroll_to_bottom(surface.entries.len());
        popup.on_scroll(metrics).await;

        if loader.current_page() - 1 == pages && !popup.surface().retry_visible {
            // Scroll position did not trigger a fetch
            break;
        }
    }

    let surface = popup.surface();
    // Hiding resets the loader, so read its state first
    let pages = popup.loader().current_page() - 1;
    let all_loaded = popup.loader().all_loaded();

    for (index, item) in surface.entries.iter().enumerate() {
        write_line(out, &OutputLine::Item { index, item })?;
    }

    match options.select {
        Some(index) if index < surface.entries.len() => {
            popup.select(index);
            popup.confirm();
        }
        Some(index) => {
            warn!(index, entries = surface.entries.len(), "Selection out of range");
            popup.cancel();
        }
        None => popup.cancel(),
    }

    popup.remove();

    let mut commands = Vec::new();
    while let Ok(message) = bus_rx.try_recv() {
        match message {
            EditorMessage::Command(command) => {
                write_line(out, &OutputLine::Command(&command))?;
                commands.push(command);
            }
            EditorMessage::CloseAllPopup => debug!("Popup requested close of other popups"),
        }
    }

    Ok(SessionReport {
        items: surface.entries.len(),
        pages,
        all_loaded,
        gave_up,
        commands,
    })
}

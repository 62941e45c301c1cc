use serde::Deserialize;

use super::media_item::{MediaEntry, MediaItem};

/// One server-paginated batch of media items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPage {
    pub items: Vec<MediaItem>,
    /// 1-based number of this page
    pub current_page: u32,
    pub last_page: u32,
}

impl MediaPage {
    pub fn new(items: Vec<MediaItem>, current_page: u32, last_page: u32) -> Self {
        Self {
            items,
            current_page,
            last_page,
        }
    }
}

/// Raw response body of the media library endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaPageBody {
    pub data: Vec<MediaEntry>,
    pub last_page: u32,
    #[serde(default)]
    pub current_page: Option<u32>,
}

impl MediaPageBody {
    /// Converts the wire body into a page. `requested` is used when the
    /// server omits `current_page`.
    pub fn into_page(self, requested: u32) -> MediaPage {
        MediaPage {
            items: self.data.into_iter().map(MediaItem::from).collect(),
            current_page: self.current_page.unwrap_or(requested),
            last_page: self.last_page,
        }
    }
}

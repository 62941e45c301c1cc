use serde::{Deserialize, Serialize};

/// One entry of the media library as handed to the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    pub thumbnail_url: String,
    pub full_url: String,
    pub alt_text: String,
}

impl MediaItem {
    pub fn new(
        thumbnail_url: impl Into<String>,
        full_url: impl Into<String>,
        alt_text: impl Into<String>,
    ) -> Self {
        Self {
            thumbnail_url: thumbnail_url.into(),
            full_url: full_url.into(),
            alt_text: alt_text.into(),
        }
    }
}

/// A `data` entry as it appears in the library's JSON response.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaEntry {
    pub thumb: String,
    pub path: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl From<MediaEntry> for MediaItem {
    fn from(entry: MediaEntry) -> Self {
        Self {
            thumbnail_url: entry.thumb,
            full_url: entry.path,
            alt_text: entry.description,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

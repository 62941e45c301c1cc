use thiserror::Error;

use crate::models::MediaPage;

/// Why a page could not be fetched.
///
/// The loader treats every variant the same way: the page is left in place
/// and the retry affordance is shown.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with HTTP {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Malformed(String),
}

/// Capability to fetch one page of the media collection.
#[allow(async_fn_in_trait)]
pub trait MediaSource {
    async fn fetch_page(&self, page: u32) -> Result<MediaPage, FetchFailure>;
}

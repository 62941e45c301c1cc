//! HTTP access to the external media library.
//!
//! `GET {path}?page={n}&token={token}` returning
//! `{ "data": [{ "thumb", "path", "description" }], "last_page": n }`.

use anyhow::{Context, Result};
use tracing::trace;

use crate::loader::{FetchFailure, MediaSource};
use crate::models::{MediaPage, MediaPageBody};

const USER_AGENT: &str = concat!("mediapopup/", env!("CARGO_PKG_VERSION"));

/// Builds the request URL for `page`. Path and token are forwarded verbatim.
pub fn page_request_url(path: &str, page: u32, token: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}page={page}&token={token}")
}

/// Decodes a response body into a page.
pub fn parse_page_body(body: &[u8], requested: u32) -> Result<MediaPage, FetchFailure> {
    let body: MediaPageBody =
        serde_json::from_slice(body).map_err(|e| FetchFailure::Malformed(e.to_string()))?;
    Ok(body.into_page(requested))
}

/// `MediaSource` backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpMediaSource {
    client: reqwest::Client,
    path: String,
    token: String,
}

impl HttpMediaSource {
    pub fn new(path: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, path, token))
    }

    pub fn with_client(
        client: reqwest::Client,
        path: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            path: path.into(),
            token: token.into(),
        }
    }

    pub fn request_url(&self, page: u32) -> String {
        page_request_url(&self.path, page, &self.token)
    }
}

impl MediaSource for HttpMediaSource {
    async fn fetch_page(&self, page: u32) -> Result<MediaPage, FetchFailure> {
        // The token is part of the URL, keep it out of the logs
        trace!(page, path = %self.path, "GET media page");

        let response = self
            .client
            .get(self.request_url(page))
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;
        parse_page_body(&body, page)
    }
}

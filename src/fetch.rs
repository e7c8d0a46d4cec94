//! Outbound page fetching.
//!
//! The extractor only needs "URL in, markup out", so fetching sits behind
//! the [`PageFetcher`] trait:
//! - [`PageFetcher`]: Core trait defining an async page download
//! - [`HttpFetcher`]: `reqwest` implementation with a browser-like
//!   User-Agent and an explicit request timeout
//!
//! Tests substitute an in-memory fetcher to drive pagination without a
//! network.

use crate::errors::FetchError;
use crate::utils::truncate_for_log;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, trace, warn};
use url::Url;

/// User-Agent sent when the configuration does not override it. Some sites
/// reject clients that do not look like a desktop browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Trait for downloading one listing page.
///
/// Implementors return the response body as text, or a [`FetchError`] for
/// transport failures and non-success statuses.
pub trait PageFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with the given User-Agent and total request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );

        let client = ClientBuilder::new()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, elapsed_ms = t0.elapsed().as_millis() as u64, "Non-success status");
            return Err(FetchError::Status { status });
        }

        let body = response
            .text()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        debug!(
            %status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        trace!(body = %truncate_for_log(&body, 300), "Page body");
        Ok(body)
    }
}

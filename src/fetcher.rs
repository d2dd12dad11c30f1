//! Page fetching
//!
//! One outbound GET per extraction call, with browser-like headers and a
//! hard timeout. There are no retries; a failed fetch fails the call and
//! retry policy belongs to the caller.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, USER_AGENT};
use tracing::{debug, warn};
use url::Url;

use crate::error::{ExtractError, Result};

/// A fetched page, owned by a single pipeline invocation.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// The validated URL the page came from.
    pub url: Url,
    /// The response body as text.
    pub html: String,
}

/// HTTP fetcher with a shared connection pool.
///
/// Built once at startup; cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl PageFetcher {
    /// Build a fetcher with the given User-Agent and request timeout.
    ///
    /// Accept-Encoding is deliberately not set here: reqwest adds it when
    /// its compression features are enabled, and setting it manually would
    /// disable transparent decompression.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| ExtractError::Internal(format!("invalid user agent: {e}")))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    /// Validate that the input is a well-formed absolute http(s) URL.
    pub fn validate_url(input: &str) -> Result<Url> {
        if input.trim().is_empty() {
            return Err(ExtractError::InvalidUrl("URL is required".to_string()));
        }

        let url = Url::parse(input)
            .map_err(|e| ExtractError::InvalidUrl(format!("{input}: {e}")))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ExtractError::InvalidUrl(format!(
                    "unsupported scheme '{scheme}': only http and https are allowed"
                )));
            }
        }

        if url.host().is_none() {
            return Err(ExtractError::InvalidUrl(
                "URL must have a host".to_string(),
            ));
        }

        Ok(url)
    }

    /// Fetch a validated URL and return its body as text.
    ///
    /// Non-2xx statuses become `FetchFailed`; exceeding the timeout becomes
    /// `Timeout`; other transport failures become `Internal`.
    pub async fn fetch(&self, url: &Url) -> Result<RawDocument> {
        debug!(url = %url, "fetching page");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "upstream returned non-2xx");
            return Err(ExtractError::FetchFailed {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(url, e))?;

        debug!(url = %url, bytes = html.len(), "page fetched");
        Ok(RawDocument {
            url: url.clone(),
            html,
        })
    }

    fn map_transport_error(&self, url: &Url, err: reqwest::Error) -> ExtractError {
        if err.is_timeout() {
            warn!(url = %url, timeout_secs = self.timeout.as_secs(), "fetch timed out");
            ExtractError::Timeout(self.timeout.as_secs())
        } else {
            warn!(url = %url, error = %err, "fetch failed");
            ExtractError::Internal(err.to_string())
        }
    }
}

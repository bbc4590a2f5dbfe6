//! Outbound page fetcher with safe logging and bounded timeouts.
//!
//! - One GET per call: the verification pipeline never retries a page fetch,
//!   so neither does this client
//! - Sends a conventional browser-identifying `User-Agent`
//! - Treats any non-2xx status as failure
//! - Emits structured `tracing` events for request start, response status,
//!   duration, and truncated body snippets on errors
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), lumina_http::FetchError> {
//! let fetcher = lumina_http::PageFetcher::new()?;
//! let url = url::Url::parse("https://example.com/article").unwrap();
//! let body = fetcher.fetch_text(&url).await?;
//! assert!(!body.is_empty());
//! # Ok(()) }
//! ```

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// `User-Agent` sent with every page fetch. Some hosts reject requests that
/// do not look like they came from a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("client build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status}, body_snippet: {body_snippet}")]
    Status {
        status: StatusCode,
        body_snippet: String,
    },
    #[error("body read failed: {0}")]
    Body(String),
}

/// Thin wrapper around [`reqwest::Client`] used by the input normalizer to
/// pull down the textual body of a user-supplied URL.
#[derive(Clone)]
pub struct PageFetcher {
    inner: Client,
    user_agent: String,
    pub request_timeout: Duration,
}

impl PageFetcher {
    /// Construct a fetcher with default timeouts and the browser user agent.
    pub fn new() -> Result<Self, FetchError> {
        let inner = Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            user_agent: BROWSER_USER_AGENT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Override the total request timeout returned by [`PageFetcher::new`].
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.request_timeout = dur;
        self
    }

    /// Override the `User-Agent` header (tests point this at wiremock).
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Fetch the textual body of `url` with a single GET.
    ///
    /// Non-2xx statuses map to [`FetchError::Status`]; connection and timeout
    /// failures map to [`FetchError::Network`]. The caller decides how to
    /// present either to the user.
    pub async fn fetch_text(&self, url: &Url) -> Result<String, FetchError> {
        let req_id = format!(
            "f{:x}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );

        tracing::debug!(
            req_id = %req_id,
            host_path = %format!("{}{}", url.domain().unwrap_or("-"), url.path()),
            timeout_ms = self.request_timeout.as_millis() as u64,
            "page.fetch.start"
        );

        let t0 = std::time::Instant::now();
        let resp = self
            .inner
            .get(url.clone())
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(req_id = %req_id, message = %e, "page.fetch.network_error");
                FetchError::Network(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::warn!(req_id = %req_id, %status, message = %e, "page.fetch.body_error");
            FetchError::Body(e.to_string())
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        if !status.is_success() {
            let body_snippet = snip_body(&body);
            tracing::warn!(
                req_id = %req_id,
                %status,
                duration_ms = dur_ms,
                body_snippet = %body_snippet,
                "page.fetch.error"
            );
            return Err(FetchError::Status {
                status,
                body_snippet,
            });
        }

        tracing::debug!(
            req_id = %req_id,
            %status,
            duration_ms = dur_ms,
            body_len = body.len(),
            "page.fetch.ok"
        );
        Ok(body)
    }
}

fn snip_body(body: &str) -> String {
    let mut snip = body.to_string();
    if snip.len() > 500 {
        let cut = snip
            .char_indices()
            .take_while(|(i, _)| *i <= 500)
            .map(|(i, _)| i)
            .last()
            .unwrap_or(0);
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

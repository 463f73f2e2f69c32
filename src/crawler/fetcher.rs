//! Page fetcher implementation
//!
//! This module defines the fetch capability consumed by the coordinator and
//! its default HTTP implementation, including:
//! - Building the shared HTTP client with the configured user agent
//! - Bounded per-fetch timeouts
//! - Redirect following
//! - Classifying failures into [`FailureReason`]s

use crate::config::Config;
use crate::state::FailureReason;
use crate::SumiError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects
    pub url: Url,
    /// HTTP status code of the final response
    pub status: u16,
    /// Content-Type header value, if any
    pub content_type: Option<String>,
    /// Page body content
    pub body: String,
}

impl Page {
    /// Returns true if the page should be scanned for links
    ///
    /// A missing Content-Type is treated as HTML.
    pub fn is_html(&self) -> bool {
        match &self.content_type {
            Some(ct) => {
                let ct = ct.to_ascii_lowercase();
                ct.contains("text/html") || ct.contains("application/xhtml")
            }
            None => true,
        }
    }
}

/// Capability that loads a URL and reports success or failure
///
/// Implementations must bound every call with a timeout so one unresponsive
/// target cannot stall a worker forever. A single instance is shared by all
/// crawl workers.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Page, FailureReason>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration (user agent, timeout, redirects)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_linkcheck::config::Config;
/// use sumi_linkcheck::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let timeout = config.crawler.fetch_timeout();
    let connect_timeout = timeout.min(Duration::from_secs(10));

    Client::builder()
        .user_agent(config.user_agent.user_agent_string())
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .redirect(Policy::limited(config.crawler.max_redirects as usize))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Default [`PageFetcher`] backed by a shared `reqwest` client
///
/// The client owns a connection pool and is safe to use from many workers at
/// once, so no per-worker session is needed. It is acquired once when the
/// fetcher is built and released when the fetcher is dropped.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Acquires the fetch capability
    ///
    /// # Returns
    ///
    /// * `Ok(HttpFetcher)` - Ready to fetch
    /// * `Err(SumiError::Setup)` - The HTTP client could not be initialized
    pub fn new(config: &Config) -> Result<Self, SumiError> {
        let client = build_http_client(config).map_err(|e| SumiError::Setup(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a URL and classifies the outcome
    ///
    /// # Classification
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Final status < 400, HTML | `Ok(Page)` with the body |
    /// | Final status < 400, not HTML | `Ok(Page)` with an empty body |
    /// | Final status >= 400 | `NonSuccessStatus(code)` |
    /// | Timeout (connect, headers or body) | `Timeout` |
    /// | Connection refused, DNS, TLS, too many redirects | `NetworkError` |
    async fn fetch(&self, url: &Url) -> Result<Page, FailureReason> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(&e))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(FailureReason::NonSuccessStatus(status.as_u16()));
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut page = Page {
            url: final_url,
            status: status.as_u16(),
            content_type,
            body: String::new(),
        };

        // The response head is enough to call a non-HTML target working
        if !page.is_html() {
            tracing::trace!(
                "Not downloading body of {} ({})",
                page.url,
                page.content_type.as_deref().unwrap_or_default()
            );
            return Ok(page);
        }

        page.body = response.text().await.map_err(|e| classify_error(&e))?;
        Ok(page)
    }
}

/// Maps a transport error onto the failure taxonomy
fn classify_error(error: &reqwest::Error) -> FailureReason {
    if error.is_timeout() {
        FailureReason::Timeout
    } else if error.is_connect() {
        FailureReason::NetworkError(format!("Connection failed: {}", error))
    } else if error.is_redirect() {
        FailureReason::NetworkError(format!("Redirect error: {}", error))
    } else {
        FailureReason::NetworkError(error.to_string())
    }
}

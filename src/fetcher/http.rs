//! HTTP-backed page fetcher
//!
//! This is the production [`PageFetcher`]: a `reqwest` client standing in
//! for a rendering browser. An HTTP response body is already the complete
//! document, so "settled" here means the request finished within the
//! configured readiness timeout.

use crate::config::{CrawlConfig, UserAgentConfig};
use crate::fetcher::{FetchedPage, PageFetcher};
use crate::{Config, CrawlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// The overall request timeout doubles as the readiness bound: a page that
/// has not fully arrived within `settle-timeout-ms` is treated as never
/// having settled, which fails the run.
///
/// # Arguments
///
/// * `user_agent` - The user agent identification configuration
/// * `crawl` - The crawl configuration carrying the readiness timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawl: &CrawlConfig,
) -> std::result::Result<Client, reqwest::Error> {
    let ua = format!("{}/{}", user_agent.name, user_agent.version);

    Client::builder()
        .user_agent(ua)
        .timeout(Duration::from_millis(crawl.settle_timeout_ms))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page fetcher backed by a `reqwest` HTTP client
///
/// Models the single shared browser session: each `fetch` replaces the
/// notion of "current page", so callers must not assume an earlier page is
/// still loaded after handing the fetcher to the next stage.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the crawl configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(&config.user_agent, &config.crawl)?;
        Ok(Self { client })
    }

    /// Creates a fetcher from an already-built client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&mut self, url: &str) -> Result<FetchedPage> {
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CrawlError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        // Non-success pages still render; keep the body and let selectors
        // come up empty, matching how a driven browser behaves on a 404.
        let body = response.text().await.map_err(|source| CrawlError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(FetchedPage {
            final_url,
            status,
            body,
        })
    }
}

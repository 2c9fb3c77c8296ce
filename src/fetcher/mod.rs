//! Page fetcher abstraction
//!
//! The crawl pipeline depends on one shared, sequentially navigated page
//! session. [`PageFetcher`] is that seam: `fetch` navigates the session to
//! a URL and returns the settled document, invalidating whatever page was
//! current before. Only one pipeline stage holds the fetcher at a time,
//! passed by `&mut` through resolve, paginate, and extract in turn.

mod http;

pub use http::{build_http_client, HttpFetcher};

use crate::Result;
use async_trait::async_trait;

/// A navigated, settled page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects; relative links resolve against this
    pub final_url: String,

    /// HTTP status code
    pub status: u16,

    /// Rendered document body
    ///
    /// Present even for non-success statuses: a browser renders an error
    /// page like any other, and selectors simply find nothing on it.
    pub body: String,
}

impl FetchedPage {
    /// Returns true for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Navigable page session shared by every crawl stage
///
/// Implementations must only return once the document is in a stable,
/// queryable state, bounded by a readiness timeout rather than a fixed
/// settle delay. Transport failures are fatal to the run; there is no
/// retry path.
#[async_trait]
pub trait PageFetcher {
    /// Navigates the session to `url` and returns the settled document
    async fn fetch(&mut self, url: &str) -> Result<FetchedPage>;
}

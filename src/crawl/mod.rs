//! Crawl pipeline: category resolution, pagination, and detail extraction
//!
//! Three stages over one shared page fetcher:
//! 1. Resolve category-listing URLs from the homepage by link-text filter
//! 2. Walk each category's listing pages, collecting item-detail URLs
//! 3. Extract each detail page into a flat record
//!
//! The coordinator composes the stages strictly sequentially; every stage
//! navigates the same session, so no stage may assume an earlier page is
//! still loaded.

mod categories;
mod coordinator;
mod detail;
mod pagination;

pub use categories::{resolve_categories, CategoryRef};
pub use coordinator::Crawler;
pub use detail::{extract_detail, parse_detail};
pub use pagination::{collect_item_urls, page_url, ItemRef};

use crate::fetcher::HttpFetcher;
use crate::record::ResultSet;
use crate::{Config, Result};

/// Runs a complete crawl with the HTTP-backed fetcher
///
/// This is the main entry point for a crawl run. It will:
/// 1. Build the HTTP client from the configuration
/// 2. Resolve category URLs from the homepage
/// 3. Paginate each category and extract every detail page
/// 4. Return the ordered result set
///
/// # Arguments
///
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(ResultSet)` - Records in crawl order
/// * `Err(CrawlError)` - A navigation failed or a detail page had no
///   content container
pub async fn run_crawl(config: Config) -> Result<ResultSet> {
    let fetcher = HttpFetcher::new(&config)?;
    let mut crawler = Crawler::new(config, fetcher);
    crawler.run().await
}

//! Crawl coordinator - composes the pipeline stages
//!
//! Resolves categories, paginates each one, extracts every item, tags each
//! record with its originating category URL, and appends to the result
//! set. Fully sequential: one fetcher, one stage active at a time, no
//! interleaving across categories. Result order is category order, then
//! page order, then in-page order, with no deduplication.

use crate::crawl::categories::resolve_categories;
use crate::crawl::detail::extract_detail;
use crate::crawl::pagination::collect_item_urls;
use crate::fetcher::PageFetcher;
use crate::record::{ResultSet, CAT_URL};
use crate::{Config, Result};

/// Main crawler structure: configuration plus the shared page session
pub struct Crawler<F: PageFetcher> {
    config: Config,
    fetcher: F,
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a crawler over the given fetcher
    pub fn new(config: Config, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    /// Runs the full crawl and returns the ordered result set
    ///
    /// Any navigation failure or detail page without a content container
    /// aborts the whole run; per-field extraction misses never do.
    pub async fn run(&mut self) -> Result<ResultSet> {
        let start_time = std::time::Instant::now();
        tracing::info!(
            "Resolving categories from {} (filters: {:?})",
            self.config.crawl.base_url,
            self.config.crawl.category_filters
        );

        let categories = resolve_categories(
            &mut self.fetcher,
            &self.config.crawl.base_url,
            &self.config.crawl.category_filters,
        )
        .await?;
        tracing::info!("{} categories matched", categories.len());

        let mut results = ResultSet::new();

        for category in &categories {
            let items = collect_item_urls(
                &mut self.fetcher,
                &category.url,
                self.config.crawl.max_pages,
            )
            .await?;
            tracing::info!("Category {}: {} items", category.url, items.len());

            for item in &items {
                tracing::debug!("Extracting {}", item.url);
                let mut record = extract_detail(&mut self.fetcher, &item.url).await?;
                record.insert(CAT_URL, category.url.clone());
                results.push(record);
            }
        }

        let (rows, cols) = results.shape();
        tracing::info!(
            "Crawl complete: {} records, {} columns in {:?}",
            rows,
            cols,
            start_time.elapsed()
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::testing::ScriptedFetcher;

    const HOME: &str = "https://example.com/";

    fn detail_page(name: &str) -> String {
        format!(
            r#"<div class="content">
                <h1>{}</h1>
                <p class="price_color">£10.00</p>
                <p class="star-rating One"></p>
                <div id="product_description"></div>
                <p>About {}.</p>
                <table><tr><th>UPC</th><td>upc-{}</td></tr></table>
            </div>"#,
            name, name, name
        )
    }

    fn listing_page(hrefs: &[&str]) -> String {
        hrefs
            .iter()
            .map(|href| {
                format!(
                    r#"<div class="image_container"><a href="{}"><img/></a></div>"#,
                    href
                )
            })
            .collect()
    }

    /// Two categories, two items each, scripted end to end
    fn scripted_site() -> ScriptedFetcher {
        let mut fetcher = ScriptedFetcher::new();
        fetcher.stub(
            HOME,
            r#"<a href="/cat/travel/index.html">Travel</a>
               <a href="/cat/mystery/index.html">Mystery</a>
               <a href="/cat/nonfiction/index.html">Nonfiction</a>"#,
        );
        fetcher.stub(
            "https://example.com/cat/travel/index.html",
            &listing_page(&["/item/t1.html", "/item/t2.html"]),
        );
        fetcher.stub(
            "https://example.com/cat/nonfiction/index.html",
            &listing_page(&["/item/n1.html", "/item/n2.html"]),
        );
        for item in ["t1", "t2", "n1", "n2"] {
            fetcher.stub(
                &format!("https://example.com/item/{}.html", item),
                &detail_page(item),
            );
        }
        fetcher
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.crawl.base_url = HOME.to_string();
        config
    }

    #[tokio::test]
    async fn test_result_order_follows_crawl_order() {
        let mut crawler = Crawler::new(test_config(), scripted_site());
        let results = crawler.run().await.unwrap();

        let names: Vec<&str> = results
            .iter()
            .map(|r| r.get("book_name").unwrap())
            .collect();
        assert_eq!(names, vec!["t1", "t2", "n1", "n2"]);
    }

    #[tokio::test]
    async fn test_cat_url_is_listing_not_item_url() {
        let mut crawler = Crawler::new(test_config(), scripted_site());
        let results = crawler.run().await.unwrap();

        for record in results.iter().take(2) {
            assert_eq!(
                record.get("cat_url"),
                Some("https://example.com/cat/travel/index.html")
            );
        }
        for record in results.iter().skip(2) {
            assert_eq!(
                record.get("cat_url"),
                Some("https://example.com/cat/nonfiction/index.html")
            );
        }
    }

    #[tokio::test]
    async fn test_unmatched_category_never_visited() {
        let mut crawler = Crawler::new(test_config(), scripted_site());
        crawler.run().await.unwrap();

        assert!(!crawler
            .fetcher
            .visited
            .contains(&"https://example.com/cat/mystery/index.html".to_string()));
    }

    #[tokio::test]
    async fn test_no_matching_categories_yields_empty_set() {
        let mut fetcher = ScriptedFetcher::new();
        fetcher.stub(HOME, r#"<a href="/cat/mystery/index.html">Mystery</a>"#);

        let mut crawler = Crawler::new(test_config(), fetcher);
        let results = crawler.run().await.unwrap();

        assert!(results.is_empty());
        assert_eq!(results.shape(), (0, 0));
    }
}

//! Listing paginator
//!
//! Walks a category's listing pages in order, collecting item-detail URLs.
//! Page 1 is the category URL as given; page i substitutes `page-{i}` for
//! the first-page `index` marker. The walk is bounded by `max_pages` and
//! ends early the moment a page yields zero item links, which is the sole
//! end-of-category signal. A page that does not exist renders with no item
//! links and so triggers the same stop rule.

use crate::fetcher::PageFetcher;
use crate::Result;
use scraper::{Html, Selector};
use url::Url;

/// Reference to one item-detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    /// Absolute URL of the book's detail page
    pub url: String,
}

/// Computes the URL for the i-th listing page of a category
///
/// Page 1 uses the category URL unchanged; later pages replace the first
/// `index` segment with `page-{i}` (conventional first-page naming, e.g.
/// `.../index.html` becomes `.../page-2.html`).
pub fn page_url(category_url: &str, page: u32) -> String {
    if page <= 1 {
        category_url.to_string()
    } else {
        category_url.replacen("index", &format!("page-{}", page), 1)
    }
}

/// Collects item-detail URLs across a category's listing pages
///
/// # Arguments
///
/// * `fetcher` - The shared page session
/// * `category_url` - First listing page of the category
/// * `max_pages` - Positive bound on pages to attempt
///
/// # Returns
///
/// Item URLs concatenated in visit order; empty if the first page has
/// none. Only a failed navigation is an error.
pub async fn collect_item_urls<F>(
    fetcher: &mut F,
    category_url: &str,
    max_pages: u32,
) -> Result<Vec<ItemRef>>
where
    F: PageFetcher + ?Sized,
{
    let mut items = Vec::new();

    for page_index in 1..=max_pages {
        let url = page_url(category_url, page_index);
        let page = fetcher.fetch(&url).await?;
        let base = Url::parse(&page.final_url)?;

        let page_items = extract_item_links(&page.body, &base);
        if page_items.is_empty() {
            // Sole pagination-end signal; "no such page" and "page with no
            // items" are deliberately indistinguishable here.
            tracing::debug!("Page {} of {} is empty, stopping", page_index, category_url);
            break;
        }

        tracing::debug!(
            "Page {} of {} yielded {} items",
            page_index,
            category_url,
            page_items.len()
        );
        items.extend(page_items);
    }

    Ok(items)
}

/// Selects item-thumbnail anchors on one listing page
fn extract_item_links(html: &str, base: &Url) -> Vec<ItemRef> {
    let document = Html::parse_document(html);
    let mut items = Vec::new();

    if let Ok(thumb_selector) = Selector::parse("div.image_container a[href]") {
        for element in document.select(&thumb_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Ok(absolute) = base.join(href) {
                    items.push(ItemRef {
                        url: absolute.to_string(),
                    });
                }
            }
        }
    }

    items
}

//! Category resolver
//!
//! Loads the homepage and returns the target URLs of every anchor whose
//! visible text contains one of the configured filter substrings. The
//! match is case-sensitive "contains", not equality, so a filter like
//! "Travel" finds the sidebar link however it is padded or nested.

use crate::fetcher::PageFetcher;
use crate::Result;
use scraper::{Html, Selector};
use url::Url;

/// Reference to one category-listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    /// Absolute URL of the category's first listing page
    pub url: String,
}

/// Resolves category-listing URLs from the homepage
///
/// Navigates the shared session to `homepage_url`; the session's current
/// page afterwards is the homepage, and later stages will navigate away
/// from it.
///
/// # Arguments
///
/// * `fetcher` - The shared page session
/// * `homepage_url` - The catalog homepage
/// * `filters` - Substrings a link's text must contain (any of them)
///
/// # Returns
///
/// Matching category URLs in source order; empty if nothing matches.
/// Only a failed navigation is an error.
pub async fn resolve_categories<F>(
    fetcher: &mut F,
    homepage_url: &str,
    filters: &[String],
) -> Result<Vec<CategoryRef>>
where
    F: PageFetcher + ?Sized,
{
    let page = fetcher.fetch(homepage_url).await?;
    let base = Url::parse(&page.final_url)?;

    let categories = filter_category_links(&page.body, &base, filters);
    tracing::debug!(
        "Homepage yielded {} category links for filters {:?}",
        categories.len(),
        filters
    );

    Ok(categories)
}

/// Selects anchors whose text contains any filter substring
fn filter_category_links(html: &str, base: &Url, filters: &[String]) -> Vec<CategoryRef> {
    let document = Html::parse_document(html);
    let mut categories = Vec::new();

    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            let text: String = element.text().collect();
            if !filters.iter().any(|f| text.contains(f.as_str())) {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Ok(absolute) = base.join(href) {
                    categories.push(CategoryRef {
                        url: absolute.to_string(),
                    });
                }
            }
        }
    }

    categories
}

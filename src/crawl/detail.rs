//! Detail-page extractor
//!
//! Turns one book detail page into a flat [`BookRecord`]. The primary
//! content container's inner markup is parsed on its own, then the four
//! core fields are read out of it, then every product-table row is merged
//! in. Each core field degrades independently to the `"N/A"` sentinel when
//! its element is absent; only a missing content container is fatal.
//!
//! Merge order means a table row sharing a core field's name overwrites
//! it. That collision is accepted, not guarded against: the table is the
//! page's own vocabulary and gets the last word.

use crate::fetcher::PageFetcher;
use crate::record::{BookRecord, BOOK_DESC, BOOK_NAME, BOOK_PRICE, BOOK_STAR_COUNT, SENTINEL};
use crate::{CrawlError, Result};
use scraper::{ElementRef, Html, Selector};

/// Class-attribute prefix that marks the rating element
const STAR_CLASS_PREFIX: &str = "star-rating ";

/// Fetches and extracts one item-detail page
///
/// # Arguments
///
/// * `fetcher` - The shared page session
/// * `item_url` - The book's detail-page URL
///
/// # Returns
///
/// * `Ok(BookRecord)` - The extracted record (core fields always present)
/// * `Err(CrawlError)` - Navigation failed, or the page has no content
///   container
pub async fn extract_detail<F>(fetcher: &mut F, item_url: &str) -> Result<BookRecord>
where
    F: PageFetcher + ?Sized,
{
    let page = fetcher.fetch(item_url).await?;
    parse_detail(&page.body, item_url)
}

/// Extracts a record from an already-fetched detail page body
///
/// `url` is only used for logging and error context.
pub fn parse_detail(html: &str, url: &str) -> Result<BookRecord> {
    let document = Html::parse_document(html);

    // The content container's inner markup is the extraction scope; a page
    // without it is not a detail page at all.
    let inner = Selector::parse("div.content")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|el| el.inner_html())
        .ok_or_else(|| CrawlError::MissingContent {
            url: url.to_string(),
        })?;

    let fragment = Html::parse_fragment(&inner);

    let mut record = BookRecord::new();
    record.insert(BOOK_NAME, sentinel_or(select_text(&fragment, "h1")));
    record.insert(
        BOOK_PRICE,
        sentinel_or(select_text(&fragment, "p.price_color")),
    );
    record.insert(BOOK_STAR_COUNT, sentinel_or(star_rating(&fragment)));
    record.insert(BOOK_DESC, sentinel_or(description_text(&fragment, url)));

    // Table-derived fields merge last, replacing core fields on collision
    for (key, value) in table_fields(&fragment, url) {
        record.insert(key, value);
    }

    Ok(record)
}

/// Replaces a missing extraction with the sentinel
fn sentinel_or(value: Option<String>) -> String {
    value.unwrap_or_else(|| SENTINEL.to_string())
}

/// Collected, trimmed text of an element
fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of the first element matching `selector`, if non-empty
fn select_text(fragment: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    fragment
        .select(&sel)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// Full class attribute of the first element whose class list starts with
/// `prefix`
///
/// A predicate over the raw attribute string, not a class-name equality
/// lookup: the rating element's class list is `"star-rating <Level>"`, so
/// only the fixed leading token is known in advance.
fn class_attr_with_prefix<'a>(fragment: &'a Html, tag: &str, prefix: &str) -> Option<&'a str> {
    let sel = Selector::parse(tag).ok()?;
    fragment.select(&sel).find_map(|el| {
        el.value()
            .attr("class")
            .filter(|class| class.starts_with(prefix))
    })
}

/// Rating level: last whitespace-separated token of the rating element's
/// class attribute
fn star_rating(fragment: &Html) -> Option<String> {
    class_attr_with_prefix(fragment, "p", STAR_CLASS_PREFIX)
        .and_then(|class| class.split_whitespace().last())
        .map(str::to_string)
}

/// Description: text of the element immediately following the
/// description anchor
///
/// The anchor itself holds no text; the description lives in the next
/// sibling paragraph. An anchor with no following sibling element degrades
/// to a missing field rather than failing the page.
fn description_text(fragment: &Html, url: &str) -> Option<String> {
    let sel = Selector::parse("#product_description").ok()?;
    let anchor = fragment.select(&sel).next()?;

    match anchor.next_siblings().find_map(ElementRef::wrap) {
        Some(sibling) => Some(element_text(sibling)).filter(|s| !s.is_empty()),
        None => {
            tracing::warn!("Description anchor on {} has no following sibling", url);
            None
        }
    }
}

/// Key-value pairs from the product-information table
///
/// Each row contributes its first header cell's text as the key and its
/// first data cell's text as the value. The key set is whatever the page
/// happens to carry; nothing is predeclared. A page without a table merges
/// nothing, and a row missing either cell is skipped.
fn table_fields(fragment: &Html, url: &str) -> Vec<(String, String)> {
    let mut fields = Vec::new();

    let (table_sel, row_sel, th_sel, td_sel) = match (
        Selector::parse("table"),
        Selector::parse("tr"),
        Selector::parse("th"),
        Selector::parse("td"),
    ) {
        (Ok(t), Ok(r), Ok(h), Ok(d)) => (t, r, h, d),
        _ => return fields,
    };

    let table = match fragment.select(&table_sel).next() {
        Some(t) => t,
        None => {
            tracing::warn!("No product information table on {}", url);
            return fields;
        }
    };

    for row in table.select(&row_sel) {
        let key = row.select(&th_sel).next().map(element_text);
        let value = row.select(&td_sel).next().map(element_text);
        if let (Some(key), Some(value)) = (key, value) {
            fields.push((key, value));
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CORE_FIELDS, SENTINEL};

    const URL: &str = "https://example.com/item/book-a/index.html";

    /// Full detail page in the catalog's shape
    fn sample_page() -> String {
        r#"<html><body>
        <div class="content">
            <div class="product_main">
                <h1>A Light in the Attic</h1>
                <p class="price_color">£51.77</p>
                <p class="star-rating Three"><i></i></p>
            </div>
            <div id="product_description" class="sub-header"></div>
            <p>It's hard to imagine a world without poetry.</p>
            <table class="table table-striped">
                <tr><th>UPC</th><td>abc123</td></tr>
                <tr><th>Product Type</th><td>Books</td></tr>
                <tr><th>Tax</th><td>£1.00</td></tr>
            </table>
        </div>
        </body></html>"#
            .to_string()
    }

    #[test]
    fn test_full_extraction() {
        let record = parse_detail(&sample_page(), URL).unwrap();

        assert_eq!(record.get("book_name"), Some("A Light in the Attic"));
        assert_eq!(record.get("book_price"), Some("£51.77"));
        assert_eq!(record.get("book_star_count"), Some("Three"));
        assert_eq!(
            record.get("book_desc"),
            Some("It's hard to imagine a world without poetry.")
        );
        assert_eq!(record.get("UPC"), Some("abc123"));
        assert_eq!(record.get("Product Type"), Some("Books"));
        assert_eq!(record.get("Tax"), Some("£1.00"));
    }

    #[test]
    fn test_core_fields_always_present() {
        // A bare content container still yields all four core fields
        let html = r#"<div class="content"></div>"#;
        let record = parse_detail(html, URL).unwrap();

        for field in CORE_FIELDS {
            let value = record.get(field).expect("core field must be present");
            assert_eq!(value, SENTINEL);
        }
    }

    #[test]
    fn test_star_rating_last_class_token() {
        let html = r#"<div class="content"><p class="star-rating Three"></p></div>"#;
        let record = parse_detail(html, URL).unwrap();
        assert_eq!(record.get("book_star_count"), Some("Three"));
    }

    #[test]
    fn test_star_rating_requires_prefix() {
        // "star-rating" without the trailing space-delimited level is a
        // different class list and must not match
        let html = r#"<div class="content"><p class="rating star-Three"></p></div>"#;
        let record = parse_detail(html, URL).unwrap();
        assert_eq!(record.get("book_star_count"), Some(SENTINEL));
    }

    #[test]
    fn test_missing_content_container_is_fatal() {
        let html = "<html><body><h1>Not a detail page</h1></body></html>";
        let result = parse_detail(html, URL);
        assert!(matches!(result, Err(CrawlError::MissingContent { .. })));
    }

    #[test]
    fn test_description_anchor_without_sibling_degrades() {
        let html = r#"<div class="content"><div id="product_description"></div></div>"#;
        let record = parse_detail(html, URL).unwrap();
        assert_eq!(record.get("book_desc"), Some(SENTINEL));
    }

    #[test]
    fn test_missing_description_anchor_degrades() {
        let html = r#"<div class="content"><h1>Title</h1></div>"#;
        let record = parse_detail(html, URL).unwrap();
        assert_eq!(record.get("book_desc"), Some(SENTINEL));
    }

    #[test]
    fn test_no_table_merges_nothing() {
        let html = r#"<div class="content"><h1>Title</h1></div>"#;
        let record = parse_detail(html, URL).unwrap();

        // Exactly the four core fields
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn test_table_row_missing_cell_skipped() {
        let html = r#"<div class="content"><table>
            <tr><th>UPC</th><td>abc123</td></tr>
            <tr><th>Orphan Header</th></tr>
            <tr><td>orphan value</td></tr>
        </table></div>"#;
        let record = parse_detail(html, URL).unwrap();

        assert_eq!(record.get("UPC"), Some("abc123"));
        assert!(!record.contains_key("Orphan Header"));
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_table_wins_on_core_key_collision() {
        let html = r#"<div class="content">
            <h1>Title</h1>
            <table><tr><th>book_name</th><td>From The Table</td></tr></table>
        </div>"#;
        let record = parse_detail(html, URL).unwrap();

        assert_eq!(record.get("book_name"), Some("From The Table"));
        // The colliding key must not appear twice
        assert_eq!(record.keys().filter(|k| *k == "book_name").count(), 1);
    }

    #[test]
    fn test_dynamic_keys_verbatim() {
        let html = r#"<div class="content"><table>
            <tr><th>UPC</th><td>abc123</td></tr>
            <tr><th>Tax</th><td>$1.00</td></tr>
        </table></div>"#;
        let record = parse_detail(html, URL).unwrap();

        assert_eq!(record.get("UPC"), Some("abc123"));
        assert_eq!(record.get("Tax"), Some("$1.00"));
    }

    #[test]
    fn test_empty_core_element_degrades_to_sentinel() {
        let html = r#"<div class="content"><h1>   </h1></div>"#;
        let record = parse_detail(html, URL).unwrap();
        assert_eq!(record.get("book_name"), Some(SENTINEL));
    }

    #[tokio::test]
    async fn test_extract_detail_via_fetcher() {
        use crate::crawl::testing::ScriptedFetcher;

        let mut fetcher = ScriptedFetcher::new();
        fetcher.stub(URL, &sample_page());

        let record = extract_detail(&mut fetcher, URL).await.unwrap();
        assert_eq!(record.get("book_name"), Some("A Light in the Attic"));
    }
}

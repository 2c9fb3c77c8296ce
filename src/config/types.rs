use serde::Deserialize;

/// Main configuration structure for bookcrawl
///
/// Every section and every key has a default, so an empty TOML file (or no
/// file at all) yields the stock books.toscrape.com crawl.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawl: CrawlConfig::default(),
            user_agent: UserAgentConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Homepage URL the crawl starts from
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Substrings a category link's text must contain (case-sensitive);
    /// a link matching any one of them is crawled
    #[serde(rename = "category-filters", default = "default_category_filters")]
    pub category_filters: Vec<String>,

    /// Maximum listing pages to attempt per category
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Readiness timeout per navigation (milliseconds)
    #[serde(rename = "settle-timeout-ms", default = "default_settle_timeout_ms")]
    pub settle_timeout_ms: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            category_filters: default_category_filters(),
            max_pages: default_max_pages(),
            settle_timeout_ms: default_settle_timeout_ms(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name sent in the User-Agent header
    #[serde(default = "default_ua_name")]
    pub name: String,

    /// Version sent in the User-Agent header
    #[serde(default = "default_ua_version")]
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: default_ua_name(),
            version: default_ua_version(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Number of records shown in the console preview
    #[serde(rename = "preview-rows", default = "default_preview_rows")]
    pub preview_rows: usize,

    /// Optional CSV export path; no export when absent
    #[serde(rename = "csv-path", default)]
    pub csv_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            preview_rows: default_preview_rows(),
            csv_path: None,
        }
    }
}

fn default_base_url() -> String {
    "https://books.toscrape.com/".to_string()
}

fn default_category_filters() -> Vec<String> {
    vec!["Travel".to_string(), "Nonfiction".to_string()]
}

fn default_max_pages() -> u32 {
    3
}

fn default_settle_timeout_ms() -> u64 {
    10_000
}

fn default_ua_name() -> String {
    "bookcrawl".to_string()
}

fn default_ua_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_preview_rows() -> usize {
    5
}

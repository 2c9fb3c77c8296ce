//! Bookcrawl: a book-catalog scraper
//!
//! This crate implements a single-pass batch crawl of a paginated,
//! multi-category book catalog. It resolves category listings from the
//! homepage, walks each category's pages to collect detail URLs, extracts
//! one flat record per book, and hands the ordered record sequence to a
//! tabular sink for preview or export.

pub mod config;
pub mod crawl;
pub mod fetcher;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for bookcrawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Primary content container missing on {url}")]
    MissingContent { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for bookcrawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use fetcher::{FetchedPage, HttpFetcher, PageFetcher};
pub use record::{BookRecord, ResultSet, SENTINEL};

//! Configuration loading and validation
//!
//! The crawl's only inputs are a handful of constants: the homepage URL,
//! the category name filters, the pagination bound, and the per-navigation
//! readiness timeout. All of them live in an optional TOML file with
//! sensible defaults.

mod parser;
mod types;
mod validation;

pub use parser::{default_config, load_config};
pub use types::{Config, CrawlConfig, OutputConfig, UserAgentConfig};
pub use validation::validate;

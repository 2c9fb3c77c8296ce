use crate::config::types::{Config, CrawlConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use http or https, got '{}'",
            base.scheme()
        )));
    }

    if config.category_filters.is_empty() {
        return Err(ConfigError::Validation(
            "category-filters must name at least one substring".to_string(),
        ));
    }

    if config.category_filters.iter().any(|f| f.is_empty()) {
        return Err(ConfigError::Validation(
            "category-filters must not contain empty strings".to_string(),
        ));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.settle_timeout_ms < 100 || config.settle_timeout_ms > 120_000 {
        return Err(ConfigError::Validation(format!(
            "settle-timeout-ms must be between 100 and 120000, got {}",
            config.settle_timeout_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if !config
        .name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "user-agent name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if config.version.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.preview_rows < 1 {
        return Err(ConfigError::Validation(format!(
            "preview-rows must be >= 1, got {}",
            config.preview_rows
        )));
    }

    if let Some(path) = &config.csv_path {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "csv-path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

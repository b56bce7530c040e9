use crate::config::types::{BookConfig, Config, CrawlerConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_book_config(&config.book)?;
    Ok(())
}

/// Validates the target-site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;
    validate_http_url("start-url", &config.start_url)?;

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // Zero delays are allowed so tests can run without pauses.

    if config.request_timeout_secs < 1 || config.request_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be between 1 and 120, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.epub_path.is_empty() {
        return Err(ConfigError::Validation(
            "epub-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates EPUB metadata configuration
fn validate_book_config(config: &BookConfig) -> Result<(), ConfigError> {
    if config.title.is_empty() {
        return Err(ConfigError::Validation(
            "book title cannot be empty".to_string(),
        ));
    }

    if config.language.is_empty() {
        return Err(ConfigError::Validation(
            "book language cannot be empty".to_string(),
        ));
    }

    if config.identifier.is_empty() {
        return Err(ConfigError::Validation(
            "book identifier cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that a config value parses as an http(s) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            field,
            url.scheme()
        )));
    }

    Ok(())
}

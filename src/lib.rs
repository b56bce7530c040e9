//! Changwen: a blog-category-to-EPUB archiver
//!
//! This crate crawls one paginated blog category, extracts each article's
//! title and body, and bundles the results into a single offline EPUB.
//! The pipeline is strictly sequential: one HTTP request in flight at a time,
//! with a politeness delay between requests.

pub mod config;
pub mod crawler;
pub mod output;
pub mod site;

use thiserror::Error;

/// Main error type for changwen operations
#[derive(Debug, Error)]
pub enum ChangwenError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid CSS selector: {0}")]
    Selector(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("EPUB error: {0}")]
    Epub(#[from] output::EpubError),

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

/// Result type alias for changwen operations
pub type Result<T> = std::result::Result<T, ChangwenError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::run_crawl;
pub use output::{Book, BookChapter, BookMeta};
pub use site::{Article, Extraction, ListingPage, SiteAdapter};

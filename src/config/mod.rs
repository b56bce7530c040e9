//! Configuration module for changwen
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. All fields default to the constants of the original target site, so
//! running without a config file archives the 精选长文 category as-is.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BookConfig, Config, CrawlerConfig, OutputConfig, SiteConfig};

// Re-export parser functions
pub use parser::load_config;
pub use validation::validate;

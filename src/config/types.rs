use serde::Deserialize;

/// Main configuration structure for changwen
///
/// Every field carries a default matching the original target site, so the
/// binary can run without a config file at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    pub book: BookConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL used to resolve relative article links
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// First listing page of the category to crawl
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause between listing page fetches (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,

    /// Pause before each article fetch (milliseconds)
    #[serde(rename = "article-delay-ms")]
    pub article_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the EPUB file to write
    #[serde(rename = "epub-path")]
    pub epub_path: String,
}

/// EPUB metadata configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub title: String,
    pub language: String,
    pub author: String,
    pub identifier: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            crawler: CrawlerConfig::default(),
            output: OutputConfig::default(),
            book: BookConfig::default(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://chentianyuzhou.com".to_string(),
            start_url:
                "https://chentianyuzhou.com/category/%e7%b2%be%e9%80%89%e9%95%bf%e6%96%87/"
                    .to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: 2000,
            article_delay_ms: 3000,
            request_timeout_secs: 20,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            epub_path: "Selected_Articles.epub".to_string(),
        }
    }
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            title: "精选长文 - chentianyuzhou.com".to_string(),
            language: "zh".to_string(),
            author: "chentianyuzhou.com".to_string(),
            identifier: "changwen-selected-articles".to_string(),
        }
    }
}

//! HTTP fetcher
//!
//! Builds the single HTTP client used for the whole run and issues plain GET
//! requests. There are no retries: a failed request surfaces immediately and
//! the coordinator decides whether it is fatal or skippable.

use crate::config::{CrawlerConfig, SiteConfig};
use crate::{ChangwenError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client with fixed browser-style headers and timeouts
///
/// # Arguments
///
/// * `site` - Target site configuration (supplies the User-Agent)
/// * `crawler` - Crawler configuration (supplies the request timeout)
pub fn build_http_client(site: &SiteConfig, crawler: &CrawlerConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
    );

    let client = Client::builder()
        .user_agent(&site.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches one page and returns its body text
///
/// # Returns
///
/// * `Ok(String)` - Response body of a 2xx response
/// * `Err(ChangwenError::HttpStatus)` - Non-success status code
/// * `Err(ChangwenError::Http)` - Network or timeout failure
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await.map_err(|e| ChangwenError::Http {
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ChangwenError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| ChangwenError::Http {
        url: url.to_string(),
        source: e,
    })
}

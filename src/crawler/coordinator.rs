//! Crawl coordinator
//!
//! Drives the whole pipeline: paginate through listing pages collecting
//! article URLs, reverse them into chronological order, fetch and extract each
//! article, assemble the book, and package the EPUB. The run is strictly
//! sequential with a politeness delay between requests.
//!
//! The coordinator is also the failure boundary: per-article faults degrade a
//! single entry, a listing fault shortens the crawl, and anything escaping the
//! pipeline is converted into an error-report book so the run always leaves an
//! output file.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::output::{write_epub, Book, BookMeta};
use crate::site::{Article, Extraction, SiteAdapter, WordPressAdapter};
use crate::Result;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;

/// Title given to articles whose page could not be fetched. Such entries are
/// excluded from the book; the crawl continues.
const FETCH_ERROR_TITLE: &str = "Fetch Error";

/// Crawl coordinator, generic over the site adapter so the pagination and
/// article loops can be exercised against fixture servers
pub struct Coordinator<A: SiteAdapter> {
    config: Config,
    client: Client,
    adapter: A,
}

impl<A: SiteAdapter> Coordinator<A> {
    /// Creates a coordinator with a freshly built HTTP client
    pub fn new(config: Config, adapter: A) -> Result<Self> {
        let client = build_http_client(&config.site, &config.crawler)?;
        Ok(Self {
            config,
            client,
            adapter,
        })
    }

    /// Walks the listing pagination and returns all article URLs in
    /// chronological order.
    ///
    /// Pagination state machine: fetch a page, parse article links and the
    /// next link from the same document, then either follow the next link or
    /// stop. Two independent termination signals exist: a page with no
    /// article links, and a page with no next link. A listing fetch failure
    /// aborts pagination but keeps the URLs already collected.
    pub async fn collect_article_urls(&self) -> Result<Vec<String>> {
        let mut urls = Vec::new();
        let mut current = Some(self.config.site.start_url.clone());
        let mut page_num = 1u32;

        while let Some(page_url) = current.take() {
            if page_num > 1 {
                sleep(Duration::from_millis(self.config.crawler.page_delay_ms)).await;
            }
            tracing::info!("Scraping listing page {}: {}", page_num, page_url);

            let body = match fetch_page(&self.client, &page_url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Listing page {} failed, stopping pagination: {}", page_num, e);
                    break;
                }
            };

            let listing = self.adapter.parse_listing(&body)?;
            if listing.article_urls.is_empty() {
                tracing::info!("No articles found on page {}, stopping", page_num);
                break;
            }
            urls.extend(listing.article_urls);

            match listing.next_url {
                Some(next) => {
                    current = Some(next);
                    page_num += 1;
                }
                None => {
                    tracing::info!("No more pages found, reached the last page");
                }
            }
        }

        // The site lists newest first; reverse for chronological reading order.
        urls.reverse();
        Ok(urls)
    }

    /// Fetches and extracts every article, in order
    ///
    /// Skipped (video) and degraded (fetch failure, missing content) outcomes
    /// are logged and excluded; they never abort the run.
    pub async fn fetch_articles(&self, urls: &[String]) -> Result<Vec<Article>> {
        let mut articles = Vec::new();

        for url in urls {
            sleep(Duration::from_millis(self.config.crawler.article_delay_ms)).await;
            tracing::info!("Fetching article: {}", url);

            let extraction = match fetch_page(&self.client, url).await {
                Ok(body) => self.adapter.parse_article(&body)?,
                Err(e) => Extraction::Degraded {
                    title: FETCH_ERROR_TITLE.to_string(),
                    detail: e.to_string(),
                },
            };

            match extraction {
                Extraction::Article(article) => {
                    tracing::info!("Extracted article: {}", article.title);
                    articles.push(article);
                }
                Extraction::Skipped => {
                    tracing::info!("Skipping video article: {}", url);
                }
                Extraction::Degraded { title, detail } => {
                    tracing::warn!("Excluding degraded article '{}' from {}: {}", title, url, detail);
                }
            }
        }

        Ok(articles)
    }

    /// Runs the crawl-and-extract pipeline
    pub async fn run_pipeline(&self) -> Result<Vec<Article>> {
        let urls = self.collect_article_urls().await?;
        tracing::info!("Found {} articles in total, fetching content", urls.len());
        self.fetch_articles(&urls).await
    }
}

/// Runs a complete crawl and writes the EPUB
///
/// This is the top-level failure boundary: any error escaping the pipeline is
/// logged with full diagnostic detail and turned into an error-report book,
/// so the run always produces an output file. Empty extraction results become
/// the placeholder book.
///
/// # Returns
///
/// The path of the written EPUB file.
pub async fn run_crawl(config: Config) -> Result<PathBuf> {
    let output_path = PathBuf::from(&config.output.epub_path);
    let meta = BookMeta::from(&config.book);

    let book = match run_pipeline(config).await {
        Ok(articles) => {
            if articles.is_empty() {
                tracing::warn!("No valid articles extracted, writing placeholder book");
            }
            Book::from_articles(meta, &articles)
        }
        Err(e) => {
            tracing::error!("Crawl failed: {:?}", e);
            Book::error_report(meta, &format!("{:#?}", e))
        }
    };

    write_epub(&book, &output_path)?;
    tracing::info!(
        "Wrote {} chapter(s) to {}",
        book.chapters.len(),
        output_path.display()
    );
    Ok(output_path)
}

async fn run_pipeline(config: Config) -> Result<Vec<Article>> {
    let adapter = WordPressAdapter::new(&config.site.base_url)?;
    let coordinator = Coordinator::new(config, adapter)?;
    coordinator.run_pipeline().await
}

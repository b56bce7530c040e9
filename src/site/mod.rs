//! Site adapter module
//!
//! The crawl and assembly logic is decoupled from site-specific markup through
//! the [`SiteAdapter`] trait: one method parses a listing page into article
//! links plus an optional next-page link, the other parses an article page
//! into an [`Extraction`]. Adapters can be swapped or unit-tested with fixture
//! HTML without touching the crawler.

mod filters;
mod wordpress;

pub use filters::{collect_content, excluded_nodes, has_video_embed};
pub use wordpress::WordPressAdapter;

use crate::Result;

/// One extracted article, immutable after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    /// Concatenated serialized HTML of the content-bearing elements
    pub content: String,
}

/// Everything found on one listing page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Article URLs in document order (the site lists newest first)
    pub article_urls: Vec<String>,
    /// Absolute URL of the next listing page, if any
    pub next_url: Option<String>,
}

/// Outcome of extracting one article page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A usable article
    Article(Article),

    /// Intentionally skipped (the article embeds a video); not an error
    Skipped,

    /// Weak success: the page yielded no usable content. Degraded entries are
    /// logged and excluded from the book rather than aborting the crawl.
    Degraded { title: String, detail: String },
}

/// Parser strategy for one site's markup conventions
pub trait SiteAdapter {
    /// Parses a listing page into article links and the next-page link
    fn parse_listing(&self, html: &str) -> Result<ListingPage>;

    /// Parses an article page into title and filtered content
    fn parse_article(&self, html: &str) -> Result<Extraction>;
}

//! WordPress site adapter
//!
//! Implements [`SiteAdapter`] for the target blog's WordPress theme. All
//! structural selectors live here; nothing outside this module knows what the
//! site's markup looks like.

use crate::site::filters::{collect_content, excluded_nodes, has_video_embed};
use crate::site::{Article, Extraction, ListingPage, SiteAdapter};
use crate::{ChangwenError, Result};
use scraper::{Html, Selector};
use url::Url;

/// Title used when an article page has no title heading
const NO_TITLE: &str = "No Title";

/// Placeholder body for articles whose content cannot be located
pub const CONTENT_MISSING: &str = "未找到文章内容";

/// Boilerplate blocks removed from the content container before extraction
const DENY_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    ".sharedaddy",
    ".sd-sharing-enabled",
    ".jp-relatedposts",
    ".post-navigation",
    ".wpcnt",
];

/// Content-bearing tags collected from the container, in document order
const ALLOWED_TAGS: &[&str] = &[
    "p", "h2", "h3", "h4", "h5", "h6", "blockquote", "ol", "ul", "li", "figure", "pre",
];

/// Site adapter for the target WordPress blog
pub struct WordPressAdapter {
    base_url: Url,
    listing_link: Selector,
    next_page: Selector,
    title: Selector,
    content: Selector,
    video: Selector,
    deny: Vec<Selector>,
}

impl WordPressAdapter {
    /// Creates an adapter resolving relative links against `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            listing_link: create_selector("h2.entry-title a")?,
            next_page: create_selector("a.next.page-numbers")?,
            title: create_selector("h1.entry-title")?,
            content: create_selector("div.entry-content")?,
            video: create_selector("iframe")?,
            deny: DENY_SELECTORS
                .iter()
                .map(|s| create_selector(s))
                .collect::<Result<Vec<_>>>()?,
        })
    }

    /// Resolves an href against the base URL, keeping only http(s) results
    fn resolve_link(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }

        match self.base_url.join(href) {
            Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
                Some(absolute.to_string())
            }
            _ => None,
        }
    }
}

impl SiteAdapter for WordPressAdapter {
    fn parse_listing(&self, html: &str) -> Result<ListingPage> {
        let document = Html::parse_document(html);

        let article_urls = document
            .select(&self.listing_link)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| self.resolve_link(href))
            .collect();

        let next_url = document
            .select(&self.next_page)
            .filter_map(|element| element.value().attr("href"))
            .find_map(|href| self.resolve_link(href));

        Ok(ListingPage {
            article_urls,
            next_url,
        })
    }

    fn parse_article(&self, html: &str) -> Result<Extraction> {
        let document = Html::parse_document(html);

        let title = document
            .select(&self.title)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string());

        let container = match document.select(&self.content).next() {
            Some(container) => container,
            None => {
                return Ok(Extraction::Degraded {
                    title,
                    detail: CONTENT_MISSING.to_string(),
                })
            }
        };

        // Boilerplate removal happens before the video check so stray iframes
        // inside removed widgets don't trigger a skip.
        let excluded = excluded_nodes(container, &self.deny);

        if has_video_embed(container, &self.video, &excluded) {
            return Ok(Extraction::Skipped);
        }

        let fragments = collect_content(container, ALLOWED_TAGS, &excluded);
        if fragments.is_empty() {
            return Ok(Extraction::Degraded {
                title,
                detail: CONTENT_MISSING.to_string(),
            });
        }

        Ok(Extraction::Article(Article {
            title,
            content: fragments.concat(),
        }))
    }
}

fn create_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| ChangwenError::Selector(selector.to_string()))
}

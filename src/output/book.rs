//! Document builder
//!
//! Assembles extracted articles into an in-memory [`Book`]: ordered chapters,
//! a table of contents mirroring chapter order, and EPUB metadata. Empty input
//! and top-level failures produce single-chapter report books through the same
//! type, so a run always has something to write.

use crate::config::BookConfig;
use crate::site::Article;

/// Maximum chapter-title length (in characters) used in file names
const MAX_TITLE_CHARS: usize = 60;

/// Chapter title of the empty-result placeholder book
pub const NO_ARTICLES_TITLE: &str = "未找到新文章";

/// Chapter title of the error-report book
pub const ERROR_REPORT_TITLE: &str = "执行报告";

/// Book metadata
#[derive(Debug, Clone)]
pub struct BookMeta {
    pub title: String,
    pub language: String,
    pub author: String,
    pub identifier: String,
}

impl From<&BookConfig> for BookMeta {
    fn from(config: &BookConfig) -> Self {
        Self {
            title: config.title.clone(),
            language: config.language.clone(),
            author: config.author.clone(),
            identifier: config.identifier.clone(),
        }
    }
}

/// One chapter of the output document
#[derive(Debug, Clone)]
pub struct BookChapter {
    /// Unique chapter identifier, also used as the manifest item id
    pub id: String,
    /// Archive entry name of the chapter's XHTML file
    pub file_name: String,
    /// Original, unsanitized title
    pub title: String,
    /// Chapter body: a rendered heading followed by the extracted content
    pub body_html: String,
}

/// The final output artifact before packaging
///
/// The table of contents is derived from the chapter list, so toc entries and
/// chapters always match in cardinality and order.
#[derive(Debug, Clone)]
pub struct Book {
    pub meta: BookMeta,
    pub chapters: Vec<BookChapter>,
}

impl Book {
    /// Builds the main book from extracted articles, in input order.
    ///
    /// With no articles this builds the placeholder book instead, so the
    /// caller always receives something to write.
    pub fn from_articles(meta: BookMeta, articles: &[Article]) -> Self {
        if articles.is_empty() {
            return Self::placeholder(meta);
        }

        let chapters = articles
            .iter()
            .enumerate()
            .map(|(i, article)| make_chapter(i, &article.title, &article.content))
            .collect();

        Self { meta, chapters }
    }

    /// Builds the single-chapter book used when no valid articles were found
    pub fn placeholder(meta: BookMeta) -> Self {
        let body = "<p>本次抓取没有找到可以收录的新文章。</p>".to_string();
        let chapters = vec![make_chapter(0, NO_ARTICLES_TITLE, &body)];
        Self { meta, chapters }
    }

    /// Builds the single-chapter error-report book from a diagnostic trace
    pub fn error_report(meta: BookMeta, diagnostic: &str) -> Self {
        let body = format!("<pre>{}</pre>", escape_text(diagnostic));
        let chapters = vec![make_chapter(0, ERROR_REPORT_TITLE, &body)];
        Self { meta, chapters }
    }
}

fn make_chapter(index: usize, title: &str, content_html: &str) -> BookChapter {
    let position = index + 1;
    let safe_title = truncate_chars(&sanitize_title(title), MAX_TITLE_CHARS);
    BookChapter {
        id: format!("chap_{}", position),
        file_name: format!("chap_{}_{}.xhtml", position, safe_title),
        title: title.to_string(),
        body_html: format!("<h1>{}</h1>{}", escape_text(title), content_html),
    }
}

/// Strips characters that are illegal in resource/file names
fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|'))
        .collect()
}

/// Truncates on character boundaries; titles are mostly CJK
fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Minimal text escaping for embedding plain text in markup
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

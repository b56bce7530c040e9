//! Integration tests for the crawl pipeline
//!
//! These tests use wiremock to stand in for the blog and drive the full
//! crawl-extract-package cycle, then reopen the produced EPUB to check its
//! contents.

use changwen::run_crawl;
use changwen::Config;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::ZipArchive;

/// Creates a test configuration pointed at the mock server
fn test_config(server_uri: &str, start_path: &str, epub_path: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = server_uri.to_string();
    config.site.start_url = format!("{}{}", server_uri, start_path);
    config.crawler.page_delay_ms = 0;
    config.crawler.article_delay_ms = 0;
    config.crawler.request_timeout_secs = 5;
    config.output.epub_path = epub_path.to_string_lossy().into_owned();
    config
}

fn listing_html(links: &[&str], next: Option<&str>) -> String {
    let mut html = String::from("<html><body>");
    for link in links {
        html.push_str(&format!(
            r#"<h2 class="entry-title"><a href="{}">文章</a></h2>"#,
            link
        ));
    }
    if let Some(next) = next {
        html.push_str(&format!(
            r#"<a class="next page-numbers" href="{}">下一页</a>"#,
            next
        ));
    }
    html.push_str("</body></html>");
    html
}

fn article_html(title: &str, body: &str) -> String {
    format!(
        r#"<html><body><h1 class="entry-title">{}</h1><div class="entry-content">{}</div></body></html>"#,
        title, body
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn read_entry(epub: &Path, entry: &str) -> String {
    let mut archive = ZipArchive::new(File::open(epub).unwrap()).unwrap();
    let mut content = String::new();
    archive
        .by_name(entry)
        .unwrap_or_else(|_| panic!("missing entry {}", entry))
        .read_to_string(&mut content)
        .unwrap();
    content
}

fn chapter_count(epub: &Path) -> usize {
    let archive = ZipArchive::new(File::open(epub).unwrap()).unwrap();
    archive
        .file_names()
        .filter(|name| name.starts_with("OEBPS/chap_"))
        .count()
}

#[tokio::test]
async fn test_full_crawl_reverses_to_chronological_order() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let epub = dir.path().join("out.epub");

    // P1 lists [a, b] with next=P2; P2 lists [c] with no next.
    mount_page(
        &server,
        "/category/essays/",
        listing_html(&["/a/", "/b/"], Some("/category/essays/page/2/")),
    )
    .await;
    mount_page(
        &server,
        "/category/essays/page/2/",
        listing_html(&["/c/"], None),
    )
    .await;
    mount_page(&server, "/a/", article_html("文章A", "<p>甲</p>")).await;
    mount_page(&server, "/b/", article_html("文章B", "<p>乙</p>")).await;
    mount_page(&server, "/c/", article_html("文章C", "<p>丙</p>")).await;

    let config = test_config(&server.uri(), "/category/essays/", &epub);
    run_crawl(config).await.unwrap();

    // Crawl order [a, b, c] becomes reading order [c, b, a].
    assert_eq!(chapter_count(&epub), 3);
    let nav = read_entry(&epub, "OEBPS/nav.xhtml");
    let pos_c = nav.find("文章C").unwrap();
    let pos_b = nav.find("文章B").unwrap();
    let pos_a = nav.find("文章A").unwrap();
    assert!(pos_c < pos_b && pos_b < pos_a);
}

#[tokio::test]
async fn test_listing_with_no_articles_stops_pagination() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let epub = dir.path().join("out.epub");

    // The empty page still advertises a next link, which must not be followed.
    mount_page(
        &server,
        "/category/essays/",
        listing_html(&[], Some("/category/essays/page/2/")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/category/essays/page/2/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&["/a/"], None)))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), "/category/essays/", &epub);
    run_crawl(config).await.unwrap();

    // Zero articles means the placeholder book.
    assert_eq!(chapter_count(&epub), 1);
    let nav = read_entry(&epub, "OEBPS/nav.xhtml");
    assert!(nav.contains("未找到新文章"));
}

#[tokio::test]
async fn test_article_fetch_failure_is_excluded_and_crawl_continues() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let epub = dir.path().join("out.epub");

    mount_page(
        &server,
        "/category/essays/",
        listing_html(&["/broken/", "/fine/"], None),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/fine/", article_html("好文章", "<p>内容</p>")).await;

    let config = test_config(&server.uri(), "/category/essays/", &epub);
    run_crawl(config).await.unwrap();

    assert_eq!(chapter_count(&epub), 1);
    let nav = read_entry(&epub, "OEBPS/nav.xhtml");
    assert!(nav.contains("好文章"));
    assert!(!nav.contains("Fetch Error"));
}

#[tokio::test]
async fn test_listing_fetch_failure_keeps_collected_pages() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let epub = dir.path().join("out.epub");

    mount_page(
        &server,
        "/category/essays/",
        listing_html(&["/a/"], Some("/category/essays/page/2/")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/category/essays/page/2/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/a/", article_html("第一篇", "<p>内容</p>")).await;

    let config = test_config(&server.uri(), "/category/essays/", &epub);
    run_crawl(config).await.unwrap();

    // Page 2 failed, but page 1's article still makes it into the book.
    assert_eq!(chapter_count(&epub), 1);
    let nav = read_entry(&epub, "OEBPS/nav.xhtml");
    assert!(nav.contains("第一篇"));
}

#[tokio::test]
async fn test_video_and_degraded_articles_excluded() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let epub = dir.path().join("out.epub");

    mount_page(
        &server,
        "/category/essays/",
        listing_html(&["/video/", "/empty/", "/good/"], None),
    )
    .await;
    mount_page(
        &server,
        "/video/",
        article_html(
            "视频文章",
            r#"<iframe src="https://www.youtube.com/embed/x"></iframe>"#,
        ),
    )
    .await;
    // No entry-content container at all.
    mount_page(
        &server,
        "/empty/",
        "<html><body><h1 class=\"entry-title\">空文章</h1></body></html>".to_string(),
    )
    .await;
    mount_page(&server, "/good/", article_html("正常文章", "<p>内容</p>")).await;

    let config = test_config(&server.uri(), "/category/essays/", &epub);
    run_crawl(config).await.unwrap();

    assert_eq!(chapter_count(&epub), 1);
    let nav = read_entry(&epub, "OEBPS/nav.xhtml");
    assert!(nav.contains("正常文章"));
    assert!(!nav.contains("视频文章"));
    assert!(!nav.contains("空文章"));
}

#[tokio::test]
async fn test_pipeline_failure_produces_error_report_book() {
    let dir = tempfile::tempdir().unwrap();
    let epub = dir.path().join("out.epub");

    // An unparseable base URL makes the pipeline fail before any request;
    // the run must still write a report book instead of bailing out.
    let mut config = Config::default();
    config.site.base_url = "not a url".to_string();
    config.output.epub_path = epub.to_string_lossy().into_owned();

    run_crawl(config).await.unwrap();

    assert_eq!(chapter_count(&epub), 1);
    let nav = read_entry(&epub, "OEBPS/nav.xhtml");
    assert!(nav.contains("执行报告"));

    // The report chapter carries the captured diagnostic.
    let report = read_entry(&epub, "OEBPS/chap_1_执行报告.xhtml");
    assert!(report.contains("UrlParse"));
}

#[tokio::test]
async fn test_all_articles_invalid_produces_placeholder_book() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let epub = dir.path().join("out.epub");

    mount_page(&server, "/category/essays/", listing_html(&["/video/"], None)).await;
    mount_page(
        &server,
        "/video/",
        article_html(
            "视频文章",
            r#"<iframe src="https://player.example.com/1"></iframe>"#,
        ),
    )
    .await;

    let config = test_config(&server.uri(), "/category/essays/", &epub);
    run_crawl(config).await.unwrap();

    assert_eq!(chapter_count(&epub), 1);
    let nav = read_entry(&epub, "OEBPS/nav.xhtml");
    assert!(nav.contains("未找到新文章"));
}

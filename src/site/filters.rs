//! Content filtering passes
//!
//! Extraction filters an article's content container in two explicit passes:
//!
//! 1. A denylist pass marks boilerplate subtrees (scripts, styles, sharing
//!    widgets, related-posts widgets) as excluded.
//! 2. An allowlist pass walks the container in document order and collects the
//!    outermost content-bearing elements that are not inside an excluded
//!    subtree.
//!
//! `scraper` offers no DOM mutation, so "removal" is an exclusion set keyed by
//! node id. The video check consults it, and kept elements are serialized by a
//! walk that omits excluded subtrees, so boilerplate nested inside a kept
//! element never reaches the output either.

use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Node, Selector};
use std::collections::HashSet;

/// Pass 1: collects the node ids of all elements under `container` matching
/// any of the denylist selectors. Everything beneath those nodes is treated as
/// removed by the later passes.
pub fn excluded_nodes(container: ElementRef, deny: &[Selector]) -> HashSet<NodeId> {
    let mut excluded = HashSet::new();
    for selector in deny {
        for element in container.select(selector) {
            excluded.insert(element.id());
        }
    }
    excluded
}

/// Returns true if the container holds a video embed outside the excluded
/// subtrees. Stray iframes inside removed widgets do not count.
pub fn has_video_embed(
    container: ElementRef,
    video: &Selector,
    excluded: &HashSet<NodeId>,
) -> bool {
    container
        .select(video)
        .any(|element| !is_excluded(*element, excluded))
}

/// Pass 2: walks the container in document order and collects the serialized
/// HTML of the outermost allowlisted elements outside excluded subtrees.
///
/// Taking only the outermost match keeps nested structures intact: a `ul` is
/// serialized once with its `li` children, never each `li` again on its own.
/// Serialization itself skips excluded subtrees, so a denylisted widget
/// nested inside a kept paragraph or figure is dropped as well.
pub fn collect_content(
    container: ElementRef,
    allowed_tags: &[&str],
    excluded: &HashSet<NodeId>,
) -> Vec<String> {
    let mut fragments = Vec::new();
    walk(*container, allowed_tags, excluded, &mut fragments);
    fragments
}

fn walk(
    node: NodeRef<Node>,
    allowed_tags: &[&str],
    excluded: &HashSet<NodeId>,
    out: &mut Vec<String>,
) {
    for child in node.children() {
        if excluded.contains(&child.id()) {
            continue;
        }
        if let Some(element) = ElementRef::wrap(child) {
            if allowed_tags.contains(&element.value().name()) {
                let mut html = String::new();
                serialize_node(child, excluded, &mut html);
                out.push(html);
                continue;
            }
        }
        walk(child, allowed_tags, excluded, out);
    }
}

fn is_excluded(node: NodeRef<Node>, excluded: &HashSet<NodeId>) -> bool {
    excluded.contains(&node.id()) || node.ancestors().any(|a| excluded.contains(&a.id()))
}

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Serializes a node to HTML, omitting excluded subtrees
fn serialize_node(node: NodeRef<Node>, excluded: &HashSet<NodeId>, out: &mut String) {
    if excluded.contains(&node.id()) {
        return;
    }
    match node.value() {
        Node::Element(element) => {
            out.push('<');
            out.push_str(element.name());
            for (name, value) in element.attrs() {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
            out.push('>');
            if !VOID_ELEMENTS.contains(&element.name()) {
                for child in node.children() {
                    serialize_node(child, excluded, out);
                }
                out.push_str("</");
                out.push_str(element.name());
                out.push('>');
            }
        }
        Node::Text(text) => out.push_str(&escape_text(text)),
        _ => {}
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const ALLOWED: &[&str] = &["p", "h2", "h3", "blockquote", "ol", "ul", "li", "figure", "pre"];

    fn deny_selectors() -> Vec<Selector> {
        ["script", "style", ".sharedaddy", ".jp-relatedposts"]
            .iter()
            .map(|s| Selector::parse(s).unwrap())
            .collect()
    }

    fn with_container<F: FnOnce(ElementRef)>(html: &str, f: F) {
        let document = Html::parse_document(html);
        let selector = Selector::parse("div.entry-content").unwrap();
        let container = document.select(&selector).next().expect("no container");
        f(container);
    }

    #[test]
    fn test_excluded_nodes_marks_denylisted_elements() {
        let html = r#"<div class="entry-content">
            <p>keep</p>
            <script>var x = 1;</script>
            <div class="sharedaddy"><p>share me</p></div>
        </div>"#;
        with_container(html, |container| {
            let excluded = excluded_nodes(container, &deny_selectors());
            assert_eq!(excluded.len(), 2);
        });
    }

    #[test]
    fn test_collect_content_skips_boilerplate_subtrees() {
        let html = r#"<div class="entry-content">
            <p>first</p>
            <div class="jp-relatedposts"><p>related</p><ul><li>x</li></ul></div>
            <p>second</p>
        </div>"#;
        with_container(html, |container| {
            let excluded = excluded_nodes(container, &deny_selectors());
            let fragments = collect_content(container, ALLOWED, &excluded);
            assert_eq!(fragments, vec!["<p>first</p>", "<p>second</p>"]);
        });
    }

    #[test]
    fn test_boilerplate_nested_inside_kept_element_is_stripped() {
        let html = r#"<div class="entry-content"><p>正文<script>track()</script></p></div>"#;
        with_container(html, |container| {
            let excluded = excluded_nodes(container, &deny_selectors());
            let fragments = collect_content(container, ALLOWED, &excluded);
            assert_eq!(fragments, vec!["<p>正文</p>"]);
        });
    }

    #[test]
    fn test_widget_nested_inside_blockquote_is_stripped() {
        let html = r#"<div class="entry-content">
            <blockquote><p>引文</p><div class="sharedaddy">share</div></blockquote>
        </div>"#;
        with_container(html, |container| {
            let excluded = excluded_nodes(container, &deny_selectors());
            let fragments = collect_content(container, ALLOWED, &excluded);
            assert_eq!(fragments, vec!["<blockquote><p>引文</p></blockquote>"]);
        });
    }

    #[test]
    fn test_serialization_preserves_attributes_and_text_escaping() {
        let html = r#"<div class="entry-content"><p class="intro">A &amp; B</p></div>"#;
        with_container(html, |container| {
            let fragments = collect_content(container, ALLOWED, &HashSet::new());
            assert_eq!(fragments, vec![r#"<p class="intro">A &amp; B</p>"#]);
        });
    }

    #[test]
    fn test_serialization_of_void_elements() {
        let html = r#"<div class="entry-content"><figure><img src="x.jpg"></figure></div>"#;
        with_container(html, |container| {
            let fragments = collect_content(container, ALLOWED, &HashSet::new());
            assert_eq!(fragments, vec![r#"<figure><img src="x.jpg"></figure>"#]);
        });
    }

    #[test]
    fn test_collect_content_keeps_document_order() {
        let html = r#"<div class="entry-content">
            <h2>Heading</h2>
            <p>one</p>
            <blockquote><p>quote</p></blockquote>
            <p>two</p>
        </div>"#;
        with_container(html, |container| {
            let fragments = collect_content(container, ALLOWED, &HashSet::new());
            assert_eq!(fragments.len(), 4);
            assert!(fragments[0].starts_with("<h2>"));
            assert!(fragments[2].starts_with("<blockquote>"));
        });
    }

    #[test]
    fn test_list_items_not_duplicated() {
        let html = r#"<div class="entry-content">
            <ul><li>a</li><li>b</li></ul>
        </div>"#;
        with_container(html, |container| {
            let fragments = collect_content(container, ALLOWED, &HashSet::new());
            // The ul is taken whole; its li children are not collected again.
            assert_eq!(fragments.len(), 1);
            assert!(fragments[0].starts_with("<ul>"));
        });
    }

    #[test]
    fn test_collects_content_nested_in_wrapper_divs() {
        let html = r#"<div class="entry-content">
            <div class="wp-block-group"><p>wrapped</p></div>
        </div>"#;
        with_container(html, |container| {
            let fragments = collect_content(container, ALLOWED, &HashSet::new());
            assert_eq!(fragments, vec!["<p>wrapped</p>"]);
        });
    }

    #[test]
    fn test_video_embed_detected() {
        let html = r#"<div class="entry-content">
            <p>intro</p>
            <iframe src="https://player.example.com/v/1"></iframe>
        </div>"#;
        with_container(html, |container| {
            let video = Selector::parse("iframe").unwrap();
            let excluded = excluded_nodes(container, &deny_selectors());
            assert!(has_video_embed(container, &video, &excluded));
        });
    }

    #[test]
    fn test_iframe_inside_boilerplate_ignored() {
        let html = r#"<div class="entry-content">
            <p>text only</p>
            <div class="sharedaddy"><iframe src="https://share.example.com"></iframe></div>
        </div>"#;
        with_container(html, |container| {
            let video = Selector::parse("iframe").unwrap();
            let excluded = excluded_nodes(container, &deny_selectors());
            assert!(!has_video_embed(container, &video, &excluded));
        });
    }
}

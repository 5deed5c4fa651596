//! Case listing parser
//!
//! The primary site lists judgments in classed containers; the mirror
//! mostly exposes bare judgment links. Strategies are ordered from most to
//! least specific.

use crate::listing::{resolve_href, run_strategies, ListedItem, Strategy};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Class-attribute fragments that mark a case container
const CASE_CLASS_HINTS: &[&str] = &["case", "judgment", "decision"];

/// Href fragments that mark a judgment detail link
const CASE_HREF_HINTS: &[&str] = &["judgment", "case", "/akn/"];

const STRATEGIES: &[(&str, Strategy<ListedItem>)] = &[
    ("classed-containers", strategy_classed_containers),
    ("judgment-links", strategy_judgment_links),
    ("content-id-links", strategy_content_id_links),
];

/// Parses a case listing page into detail-page items
///
/// Pure over its input: the same HTML yields the same items. Unparseable
/// pages yield an empty list.
pub fn parse_case_listing(html: &str, base: &Url) -> Vec<ListedItem> {
    run_strategies(html, base, STRATEGIES)
}

/// Containers (div/article/tr/li) whose class mentions cases or judgments
fn strategy_classed_containers(document: &Html, base: &Url) -> Vec<ListedItem> {
    let Ok(selector) = Selector::parse("div[class], article[class], tr[class], li[class]") else {
        return Vec::new();
    };
    let Ok(anchor) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for container in document.select(&selector) {
        let class = container.value().attr("class").unwrap_or("").to_lowercase();
        if !CASE_CLASS_HINTS.iter().any(|hint| class.contains(hint)) {
            continue;
        }

        let Some(link) = container.select(&anchor).next() else {
            continue;
        };
        let Some(url) = link.value().attr("href").and_then(|h| resolve_href(h, base)) else {
            continue;
        };

        let title = container_title(&container, &link);
        push_item(&mut items, url, title);
    }
    items
}

/// Bare anchors whose href mentions judgments or cases
fn strategy_judgment_links(document: &Html, base: &Url) -> Vec<ListedItem> {
    anchors_matching(document, base, |href| {
        CASE_HREF_HINTS.iter().any(|hint| href.contains(hint))
    })
}

/// Legacy-site content links ("index.php?id=...")
fn strategy_content_id_links(document: &Html, base: &Url) -> Vec<ListedItem> {
    anchors_matching(document, base, |href| href.contains("index.php?id="))
}

fn anchors_matching(
    document: &Html,
    base: &Url,
    predicate: impl Fn(&str) -> bool,
) -> Vec<ListedItem> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for link in document.select(&selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !predicate(&href.to_lowercase()) {
            continue;
        }
        let Some(url) = resolve_href(href, base) else {
            continue;
        };

        let title = element_text(&link);
        push_item(&mut items, url, title);
    }
    items
}

/// Prefers a heading inside the container over the anchor text
fn container_title(container: &ElementRef, link: &ElementRef) -> String {
    if let Ok(heading) = Selector::parse("h1, h2, h3, h4, a") {
        if let Some(element) = container.select(&heading).next() {
            let text = element_text(&element);
            if !text.is_empty() {
                return text;
            }
        }
    }
    element_text(link)
}

fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Dedupes by URL and drops items with no title
fn push_item(items: &mut Vec<ListedItem>, url: String, title: String) {
    if title.is_empty() {
        return;
    }
    if items.iter().any(|item| item.url == url) {
        return;
    }
    items.push(ListedItem { url, title });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/judgments/").unwrap()
    }

    #[test]
    fn test_classed_container_strategy() {
        let html = r#"
            <html><body>
              <div class="judgment-item">
                <h3>Doe v Republic</h3>
                <a href="/case/1">Read</a>
              </div>
              <div class="judgment-item">
                <h3>Roe v State</h3>
                <a href="/case/2">Read</a>
              </div>
              <div class="sidebar"><a href="/about">About</a></div>
            </body></html>"#;

        let items = parse_case_listing(html, &base());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Doe v Republic");
        assert_eq!(items[0].url, "https://example.com/case/1");
    }

    #[test]
    fn test_falls_back_to_judgment_links() {
        let html = r#"
            <html><body>
              <a href="/judgments/2024/15">Doe v Republic [2024]</a>
              <a href="/judgments/2024/16">Roe v State [2024]</a>
              <a href="/contact">Contact us</a>
            </body></html>"#;

        let items = parse_case_listing(html, &base());
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].url, "https://example.com/judgments/2024/16");
    }

    #[test]
    fn test_legacy_content_links() {
        let html = r#"
            <html><body>
              <a href="index.php?id=87">Recent decisions</a>
            </body></html>"#;

        let items = parse_case_listing(html, &base());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://example.com/judgments/index.php?id=87");
    }

    #[test]
    fn test_unparseable_page_yields_empty() {
        let items = parse_case_listing("<html><body><p>Maintenance</p></body></html>", &base());
        assert!(items.is_empty());
    }

    #[test]
    fn test_duplicate_urls_collapsed() {
        let html = r#"
            <html><body>
              <a href="/case/judgment-1">Doe v Republic</a>
              <a href="/case/judgment-1">Doe v Republic (again)</a>
            </body></html>"#;

        let items = parse_case_listing(html, &base());
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_parse_is_pure() {
        let html = r#"<html><body><a href="/case/judgment-9">Doe v Republic</a></body></html>"#;
        assert_eq!(
            parse_case_listing(html, &base()),
            parse_case_listing(html, &base())
        );
    }
}

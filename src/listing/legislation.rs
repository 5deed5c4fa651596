//! Legislation listing parser
//!
//! The mirror lists Acts in a content table, one row per Act with the
//! title in the first column and year/number metadata in the second. The
//! primary site uses classed containers instead. Year-menu links drive
//! pagination across listing pages.

use crate::listing::{resolve_href, run_strategies, Strategy};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Class-attribute fragments that mark an Act container
const ACT_CLASS_HINTS: &[&str] = &["act", "legislation", "statute", "chapter"];

/// Href fragments that mark an Act detail link
const ACT_HREF_HINTS: &[&str] = &["/act", "legislation", "chapter"];

static CHAPTER_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:cap\.?|chapter)\s*(\d+)").expect("chapter regex"));

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("year regex"));

/// One Act found on a legislation listing page
#[derive(Debug, Clone, PartialEq)]
pub struct ListedAct {
    pub title: String,

    /// Chapter number parsed from the title or metadata text
    pub chapter_number: Option<String>,

    /// Enactment year parsed from the metadata text
    pub year_enacted: Option<u16>,

    /// Absolute link to the Act document, when the row carries one
    pub download_url: Option<String>,

    /// Absolute link of the listing entry itself
    pub source_url: Option<String>,
}

const STRATEGIES: &[(&str, Strategy<ListedAct>)] = &[
    ("content-table", strategy_content_table),
    ("classed-containers", strategy_classed_containers),
    ("act-links", strategy_act_links),
];

/// Parses a legislation listing page into Act entries
pub fn parse_act_listing(html: &str, base: &Url) -> Vec<ListedAct> {
    run_strategies(html, base, STRATEGIES)
}

/// Year-menu links for pagination to further listing pages
pub fn year_page_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("ul.vert-two li a[href], ul.year-menu li a[href]") else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.contains("id=") && !YEAR.is_match(&element_text(&anchor)) {
            continue;
        }
        if let Some(url) = resolve_href(href, base) {
            if !links.contains(&url) {
                links.push(url);
            }
        }
    }
    links
}

/// Content-table rows: title column, metadata column, document link
fn strategy_content_table(document: &Html, base: &Url) -> Vec<ListedAct> {
    let (Ok(row_selector), Ok(cell_selector), Ok(anchor_selector)) = (
        Selector::parse("table.contenttable tr, table.tablecontent tr"),
        Selector::parse("td"),
        Selector::parse("a[href]"),
    ) else {
        return Vec::new();
    };

    let mut acts = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<String> = row.select(&cell_selector).map(|c| element_text(&c)).collect();
        if cells.len() < 2 || cells[0].is_empty() {
            continue;
        }

        let title = cells[0].clone();
        let meta = cells[1].clone();
        let link = row
            .select(&anchor_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| resolve_href(href, base));

        push_act(
            &mut acts,
            ListedAct {
                chapter_number: chapter_number(&format!("{} {}", title, meta)),
                year_enacted: year_enacted(&meta).or_else(|| year_enacted(&title)),
                download_url: link.clone(),
                source_url: link,
                title,
            },
        );
    }
    acts
}

/// Containers (div/article/li) whose class mentions Acts or legislation
fn strategy_classed_containers(document: &Html, base: &Url) -> Vec<ListedAct> {
    let (Ok(selector), Ok(anchor_selector)) = (
        Selector::parse("div[class], article[class], li[class], tr[class]"),
        Selector::parse("a[href]"),
    ) else {
        return Vec::new();
    };

    let mut acts = Vec::new();
    for container in document.select(&selector) {
        let class = container.value().attr("class").unwrap_or("").to_lowercase();
        if !ACT_CLASS_HINTS.iter().any(|hint| class.contains(hint)) {
            continue;
        }

        let text = element_text(&container);
        if text.is_empty() {
            continue;
        }

        let mut download_url = None;
        let mut source_url = None;
        for anchor in container.select(&anchor_selector) {
            let Some(url) = anchor.value().attr("href").and_then(|h| resolve_href(h, base))
            else {
                continue;
            };
            if url.to_lowercase().ends_with(".pdf") {
                download_url.get_or_insert(url);
            } else {
                source_url.get_or_insert(url);
            }
        }

        let title = container_title(&container).unwrap_or_else(|| text.clone());
        push_act(
            &mut acts,
            ListedAct {
                chapter_number: chapter_number(&text),
                year_enacted: year_enacted(&text),
                download_url,
                source_url,
                title,
            },
        );
    }
    acts
}

/// Bare anchors whose href mentions Acts or legislation
fn strategy_act_links(document: &Html, base: &Url) -> Vec<ListedAct> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut acts = Vec::new();
    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href_lower = href.to_lowercase();
        if !ACT_HREF_HINTS.iter().any(|hint| href_lower.contains(hint)) {
            continue;
        }
        let Some(url) = resolve_href(href, base) else {
            continue;
        };

        let title = element_text(&anchor);
        if title.is_empty() {
            continue;
        }

        push_act(
            &mut acts,
            ListedAct {
                chapter_number: chapter_number(&title),
                year_enacted: year_enacted(&title),
                download_url: href_lower.ends_with(".pdf").then(|| url.clone()),
                source_url: Some(url),
                title,
            },
        );
    }
    acts
}

/// Extracts "Cap. 63" / "Chapter 63" style chapter numbers
fn chapter_number(text: &str) -> Option<String> {
    CHAPTER_NUMBER
        .captures(text)
        .map(|captures| captures[1].to_string())
}

/// Extracts a plausible enactment year
fn year_enacted(text: &str) -> Option<u16> {
    YEAR.find(text).and_then(|m| m.as_str().parse().ok())
}

fn container_title(container: &ElementRef) -> Option<String> {
    let heading = Selector::parse("h1, h2, h3, h4, a").ok()?;
    container
        .select(&heading)
        .next()
        .map(|e| element_text(&e))
        .filter(|t| !t.is_empty())
}

fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Dedupes by title and drops untitled entries
fn push_act(acts: &mut Vec<ListedAct>, act: ListedAct) {
    if act.title.is_empty() {
        return;
    }
    if acts.iter().any(|existing| existing.title == act.title) {
        return;
    }
    acts.push(act);
}

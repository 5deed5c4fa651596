//! Case detail-page metadata parser
//!
//! Detail pages carry a "document details" panel with labelled values
//! (Citation, Court, Judges, ...). The panel's markup varies: definition
//! lists on the primary site, two-column tables on the mirror, and plain
//! "Label: value" text in older templates. All three layouts feed one
//! label/value pair stream.

use crate::listing::dates::normalize_date;
use scraper::{ElementRef, Html, Selector};

/// Metadata recovered from a case detail page; missing labels stay empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseDetails {
    pub citation: String,
    pub court: String,
    pub court_station: String,
    pub case_number: String,
    pub judgment_date: String,
    pub case_action: String,
    pub judges: Vec<String>,
}

/// Longest text accepted as a label
const MAX_LABEL_LEN: usize = 40;

/// Parses the document-details panel of a case page
pub fn parse_case_details(html: &str) -> CaseDetails {
    let document = Html::parse_document(html);

    let mut pairs = Vec::new();
    collect_definition_lists(&document, &mut pairs);
    collect_table_rows(&document, &mut pairs);
    collect_inline_labels(&document, &mut pairs);

    let mut details = CaseDetails::default();
    for (label, value) in pairs {
        assign(&mut details, &label, &value);
    }
    details
}

/// dt/dd pairs
fn collect_definition_lists(document: &Html, pairs: &mut Vec<(String, String)>) {
    let Ok(dt_selector) = Selector::parse("dt") else {
        return;
    };

    for dt in document.select(&dt_selector) {
        let Some(dd) = dt
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "dd")
        else {
            continue;
        };
        pairs.push((element_text(&dt), element_text(&dd)));
    }
}

/// Two-column table rows
fn collect_table_rows(document: &Html, pairs: &mut Vec<(String, String)>) {
    let (Ok(tr_selector), Ok(td_selector)) = (Selector::parse("tr"), Selector::parse("td, th"))
    else {
        return;
    };

    for tr in document.select(&tr_selector) {
        let cells: Vec<String> = tr.select(&td_selector).map(|c| element_text(&c)).collect();
        if cells.len() >= 2 && !cells[0].is_empty() {
            pairs.push((cells[0].clone(), cells[1].clone()));
        }
    }
}

/// "Label: value" inside paragraph-level elements
fn collect_inline_labels(document: &Html, pairs: &mut Vec<(String, String)>) {
    let Ok(selector) = Selector::parse("p, li, div, span, b, strong") else {
        return;
    };

    for element in document.select(&selector) {
        // Only leaf-ish elements; containers repeat their children's text
        if element.children().filter_map(ElementRef::wrap).count() > 2 {
            continue;
        }

        let text = element_text(&element);
        let Some((label, value)) = text.split_once(':') else {
            continue;
        };
        if label.len() <= MAX_LABEL_LEN && !value.trim().is_empty() {
            pairs.push((label.to_string(), value.to_string()));
        }
    }
}

/// Routes one label/value pair into the details; first non-empty value
/// per field wins
fn assign(details: &mut CaseDetails, label: &str, value: &str) {
    // "Copy" is the clipboard-button caption bleeding into panel text
    let value = value.trim().trim_end_matches("Copy").trim();
    if value.is_empty() {
        return;
    }

    match label.trim().trim_end_matches(':').to_lowercase().as_str() {
        "citation" | "media neutral citation" => set_if_empty(&mut details.citation, value),
        "court" => set_if_empty(&mut details.court, value),
        "court station" => set_if_empty(&mut details.court_station, value),
        "case number" | "case no" => set_if_empty(&mut details.case_number, value),
        "case action" => set_if_empty(&mut details.case_action, value),
        "judgment date" | "date delivered" => {
            if details.judgment_date.is_empty() {
                details.judgment_date =
                    normalize_date(value).unwrap_or_else(|| value.to_string());
            }
        }
        "judges" | "judge" | "before" | "coram" => {
            if details.judges.is_empty() {
                details.judges = split_judges(value);
            }
        }
        _ => {}
    }
}

fn set_if_empty(slot: &mut String, value: &str) {
    if slot.is_empty() {
        *slot = value.to_string();
    }
}

fn split_judges(value: &str) -> Vec<String> {
    value
        .split(',')
        .flat_map(|chunk| chunk.split(" and "))
        .flat_map(|chunk| chunk.split(" & "))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

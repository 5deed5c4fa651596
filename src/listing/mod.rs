//! Listing and detail-page parsers
//!
//! Listing pages enumerate cases or acts with links to detail pages. Site
//! markup differs between the primary site and the mirror and shifts over
//! time, so every parser is an ordered chain of pure selector strategies
//! tried in sequence until one yields items. A page no strategy understands
//! is logged and yields zero items; it never raises.

mod cases;
mod dates;
mod details;
mod legislation;

pub use cases::parse_case_listing;
pub use dates::normalize_date;
pub use details::{parse_case_details, CaseDetails};
pub use legislation::{parse_act_listing, year_page_links, ListedAct};

use scraper::Html;
use url::Url;

/// One item found on a listing page
#[derive(Debug, Clone, PartialEq)]
pub struct ListedItem {
    /// Absolute URL of the detail page
    pub url: String,

    /// Shallow title text from the listing
    pub title: String,
}

/// A named, pure selector strategy over a parsed document
pub type Strategy<T> = fn(&Html, &Url) -> Vec<T>;

/// Runs strategies in order until one yields non-empty results
///
/// Returns empty when every strategy comes up dry; the caller decides
/// whether that is worth more than a log line.
pub fn run_strategies<T>(html: &str, base: &Url, strategies: &[(&str, Strategy<T>)]) -> Vec<T> {
    let document = Html::parse_document(html);

    for (name, strategy) in strategies {
        let items = strategy(&document, base);
        if !items.is_empty() {
            tracing::debug!("Listing strategy '{}' matched {} items", name, items.len());
            return items;
        }
        tracing::trace!("Listing strategy '{}' yielded nothing", name);
    }

    tracing::warn!("No selector strategy matched listing page from {}", base);
    Vec::new()
}

/// Resolves an href to an absolute http(s) URL against the page base
pub(crate) fn resolve_href(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    if href.starts_with("javascript:") || href.starts_with("mailto:") || href.starts_with("tel:") {
        return None;
    }

    match base.join(href) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(url.to_string()),
        _ => None,
    }
}

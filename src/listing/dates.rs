//! Date normalization for listing and detail fields

use chrono::NaiveDate;

/// Formats accepted from the sites, tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d %B %Y",
    "%d %b %Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
];

/// Normalizes a date string to YYYY-MM-DD
///
/// Returns `None` when no accepted format matches; callers keep the
/// verbatim source text in that case.
pub fn normalize_date(text: &str) -> Option<String> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cleaned, format) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }

    // ISO timestamps ("2026-01-16T10:30:00Z" and offset variants)
    let iso = cleaned.replace('Z', "+00:00");
    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(&iso) {
        return Some(datetime.format("%Y-%m-%d").to_string());
    }

    None
}

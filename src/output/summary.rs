//! Derived summary objects written alongside each collection

use crate::records::{ActRecord, AnalysisRecord, CaseRecord};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Counts per court for a case collection
pub fn cases_summary(records: &[CaseRecord]) -> Value {
    let mut courts: BTreeMap<String, u64> = BTreeMap::new();
    for record in records {
        *courts.entry(record.court.clone()).or_default() += 1;
    }

    json!({
        "total_cases": records.len(),
        "courts": courts,
        "with_judgment_date": records.iter().filter(|r| !r.judgment_date.is_empty()).count(),
    })
}

/// Counts per category and per year for an Act collection
pub fn legislation_summary(records: &[ActRecord]) -> Value {
    let mut categories: BTreeMap<String, u64> = BTreeMap::new();
    let mut years: BTreeMap<String, u64> = BTreeMap::new();

    for record in records {
        *categories.entry(record.legal_category.clone()).or_default() += 1;
        let year = record
            .year_enacted
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        *years.entry(year).or_default() += 1;
    }

    json!({
        "total_acts": records.len(),
        "categories": categories,
        "years": years,
        "chapters_with_numbers": records.iter().filter(|r| r.chapter_number.is_some()).count(),
        "with_download_links": records.iter().filter(|r| r.download_url.is_some()).count(),
    })
}

/// Aggregate extraction statistics for an analysis collection
pub fn analysis_summary(records: &[AnalysisRecord]) -> Value {
    let average_text_length = if records.is_empty() {
        0
    } else {
        records.iter().map(|r| r.metadata.text_length).sum::<usize>() / records.len()
    };

    json!({
        "total_cases_analyzed": records.len(),
        "average_text_length": average_text_length,
        "total_legal_issues": records.iter().map(|r| r.legal_issues.len()).sum::<usize>(),
        "total_precedents_cited": records.iter().map(|r| r.precedents_cited.len()).sum::<usize>(),
        "cases_with_parties": records.iter().filter(|r| !r.parties.plaintiff.is_empty()).count(),
        "cases_with_decision": records.iter().filter(|r| !r.decision.is_empty()).count(),
    })
}

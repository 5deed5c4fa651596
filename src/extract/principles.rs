//! Legal principles and cited precedents
//!
//! Precedents are citation-shaped substrings: a party-v-party pair followed
//! by a bracketed year, or a year-plus-reporter token. Principles are
//! sentences containing one of a fixed set of cue phrases. Both are
//! best-effort sets: deduplicated, first-appearance order preserved.

use regex::Regex;
use std::sync::LazyLock;

/// "Doe v Republic [2010]" and similar party-v-party citations
static CASE_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[A-Z][\w.'&()-]*(?:\s+[A-Z&][\w.'&()-]*){0,6}\s+v[s]?\.?\s+[A-Z][\w.'&()-]*(?:\s+[\w.'&()-]+){0,6}\s*[\[(]\d{4}[\])](?:\s*e?KLR)?",
    )
    .expect("case citation regex")
});

/// Year-plus-reporter tokens: "[2001] KLR 417", "(1999) EA 233"
static REPORTER_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\[(]\d{4}[\])]\s*e?(?:KLR|EA)(?:\s+\d+)?").expect("reporter citation regex")
});

/// Phrases that flag a sentence as stating a legal principle
const PRINCIPLE_CUES: &[&str] = &[
    "the court held that",
    "it is a settled principle",
    "it is settled law",
    "it is trite law",
    "it is established that",
    "the law provides that",
    "the principle is",
    "ratio decidendi",
];

/// Extracts cited precedents, deduplicated in first-appearance order
pub fn extract_precedents(text: &str) -> Vec<String> {
    let mut precedents = Vec::new();

    for m in CASE_CITATION.find_iter(text) {
        push_unique(&mut precedents, m.as_str().trim().to_string());
    }

    for m in REPORTER_CITATION.find_iter(text) {
        let token = m.as_str().trim().to_string();
        // Skip reporters already covered by a full party-v-party match
        if !precedents.iter().any(|p| p.contains(&token)) {
            push_unique(&mut precedents, token);
        }
    }

    precedents
}

/// Extracts sentences stating legal principles
pub fn extract_principles(text: &str) -> Vec<String> {
    let mut principles = Vec::new();

    for sentence in split_sentences(text) {
        let lower = sentence.to_lowercase();
        if PRINCIPLE_CUES.iter().any(|cue| lower.contains(cue)) {
            push_unique(&mut principles, sentence.trim().to_string());
        }
    }

    principles
}

/// Rough sentence segmentation; citations keep their bracketed years since
/// splitting only happens after ". " boundaries
fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive(['.', '?', '!'])
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

fn push_unique(items: &mut Vec<String>, item: String) {
    if !items.contains(&item) {
        items.push(item);
    }
}

//! Text normalization and segmentation
//!
//! Judgment text arrives with arbitrary whitespace, page artifacts and
//! mixed Unicode forms depending on which site variant served it. All
//! extractors run over the normalized form so cue matching sees one
//! canonical shape.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Lines that are page furniture, not judgment content
static PAGE_ARTIFACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(page\s+\d+|\d+\s+of\s+\d+|-\s*\d+\s*-|\d{1,3})$").expect("artifact regex")
});

/// Normalizes judgment text for extraction
///
/// - Unicode normalized to NFKC
/// - Page-number/header artifact lines dropped
/// - Whitespace runs collapsed within each line
/// - Paragraph boundaries (blank lines) preserved, runs of blank lines
///   collapsed to one
pub fn normalize(text: &str) -> String {
    let text: String = text.nfkc().collect();

    let mut lines = Vec::new();
    let mut previous_blank = true;

    for raw_line in text.lines() {
        let line = collapse_spaces(raw_line.trim());

        if line.is_empty() {
            if !previous_blank {
                lines.push(String::new());
                previous_blank = true;
            }
            continue;
        }

        if PAGE_ARTIFACT.is_match(&line) {
            continue;
        }

        lines.push(line);
        previous_blank = false;
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// Splits normalized text into paragraphs
///
/// Blank lines delimit paragraphs. Text without any blank line falls back
/// to one paragraph per line, which matches sites that emit each paragraph
/// as a single line of extracted HTML text.
pub fn paragraphs(text: &str) -> Vec<String> {
    let blank_separated: Vec<String> = text
        .split("\n\n")
        .map(|p| p.replace('\n', " ").trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    if blank_separated.len() > 1 || !text.contains('\n') {
        return blank_separated;
    }

    text.lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Whitespace-delimited word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn collapse_spaces(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

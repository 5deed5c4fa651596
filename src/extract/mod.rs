//! Structured-text extraction engine
//!
//! Full judgment text carries no reliable machine-readable structure, so
//! extraction is a fixed pipeline of independent, best-effort extractors
//! over normalized text. Each extractor is a pure function with an explicit
//! "no match" terminal state: a miss degrades its field to empty and never
//! blocks the others. Cue-pattern tables live as data in the extractor
//! modules, separate from control flow.

mod decision;
mod issues;
mod normalize;
mod parties;
mod preamble;
mod principles;
mod summary;

pub use normalize::{normalize, paragraphs, word_count};

use crate::records::{AnalysisMetadata, Parties};

/// Everything the extraction pipeline recovers from one judgment text
#[derive(Debug, Clone, Default)]
pub struct ExtractedFields {
    /// Normalized full text all fields were extracted from
    pub full_text: String,
    pub parties: Parties,
    pub case_summary: String,
    pub legal_issues: Vec<String>,
    pub decision: String,
    pub legal_principles: Vec<String>,
    pub precedents_cited: Vec<String>,
    pub advocates: Vec<String>,
    pub judges: Vec<String>,
    /// Computed unconditionally, even for empty input
    pub metadata: AnalysisMetadata,
}

impl ExtractedFields {
    /// Names of fields that degraded to empty, for degradation logging
    pub fn low_confidence_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.parties.plaintiff.is_empty() && self.parties.defendant.is_empty() {
            fields.push("parties");
        }
        if self.case_summary.is_empty() {
            fields.push("case_summary");
        }
        if self.legal_issues.is_empty() {
            fields.push("legal_issues");
        }
        if self.decision.is_empty() {
            fields.push("decision");
        }
        if self.legal_principles.is_empty() {
            fields.push("legal_principles");
        }
        if self.precedents_cited.is_empty() {
            fields.push("precedents_cited");
        }
        if self.advocates.is_empty() {
            fields.push("advocates");
        }
        if self.judges.is_empty() {
            fields.push("judges");
        }
        fields
    }
}

/// Runs the full extraction pipeline over raw judgment text
pub fn extract(full_text: &str) -> ExtractedFields {
    let text = normalize(full_text);
    let paras = paragraphs(&text);

    let metadata = AnalysisMetadata {
        text_length: text.chars().count(),
        word_count: word_count(&text),
        paragraph_count: paras.len(),
    };

    ExtractedFields {
        parties: parties::extract_parties(&paras),
        case_summary: summary::extract_summary(&paras),
        legal_issues: issues::extract_issues(&paras),
        decision: decision::extract_decision(&paras),
        legal_principles: principles::extract_principles(&text),
        precedents_cited: principles::extract_precedents(&text),
        advocates: preamble::extract_advocates(&paras),
        judges: preamble::extract_judges(&paras),
        metadata,
        full_text: text,
    }
}

//! Record types shared across the scraping pipelines
//!
//! Records are value objects: created by one parsing step, handed downstream
//! by move, and serialized as-is by the output sinks. Extraction failure
//! degrades a field to its empty value, never to a missing key, so the
//! serialized shape is stable for downstream consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discriminator tag identifying which record shape a stored document
/// represents. Shared by the file sinks and the search index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    CaseLaw,
    Legislation,
    CaseAnalysis,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::CaseLaw => "case_law",
            DocumentType::Legislation => "legislation",
            DocumentType::CaseAnalysis => "case_analysis",
        }
    }
}

/// A single case-law entry with shallow metadata
///
/// Invariant: `citation` and `court` are non-empty for every emitted record.
/// Listing entries that cannot be resolved to a citation and court are
/// dropped by the pipeline rather than emitted with empty fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub title: String,
    pub citation: String,
    pub court: String,

    /// Judgment date normalized to YYYY-MM-DD where the source format was
    /// recognized; the verbatim source text otherwise.
    pub judgment_date: String,

    /// Judge names in source order
    pub judges: Vec<String>,

    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    pub document_type: DocumentType,
}

impl CaseRecord {
    /// Whether the record satisfies the emit invariant
    pub fn is_complete(&self) -> bool {
        !self.citation.trim().is_empty() && !self.court.trim().is_empty()
    }
}

/// A single Act/statute entry from the legislation listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActRecord {
    pub title: String,
    pub chapter_number: Option<String>,
    pub year_enacted: Option<u16>,
    pub download_url: Option<String>,

    /// Always assigned; "Uncategorized" when no rule matches the title
    pub legal_category: String,

    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    pub document_type: DocumentType,
}

/// Parties to a case, extracted from the judgment text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parties {
    pub plaintiff: String,
    pub defendant: String,
    pub other_parties: Vec<String>,
}

/// Size metrics computed unconditionally over the normalized full text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub text_length: usize,
    pub word_count: usize,
    pub paragraph_count: usize,
}

/// Full-text judgment analysis
///
/// Every field defaults to an empty container or string; a failed
/// extraction sub-step leaves its field empty and never blocks the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub source_url: String,
    pub full_text: String,
    pub parties: Parties,
    pub case_summary: String,
    pub legal_issues: Vec<String>,
    pub decision: String,
    pub legal_principles: Vec<String>,
    pub precedents_cited: Vec<String>,
    pub advocates: Vec<String>,
    pub judges: Vec<String>,
    pub metadata: AnalysisMetadata,
    pub fetched_at: DateTime<Utc>,
    pub document_type: DocumentType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_serializes_snake_case() {
        let json = serde_json::to_string(&DocumentType::CaseLaw).unwrap();
        assert_eq!(json, "\"case_law\"");
        let json = serde_json::to_string(&DocumentType::CaseAnalysis).unwrap();
        assert_eq!(json, "\"case_analysis\"");
    }

    #[test]
    fn test_case_record_completeness() {
        let mut record = CaseRecord {
            title: "Doe v Republic".to_string(),
            citation: "[2024] KEHC 123".to_string(),
            court: "High Court".to_string(),
            judgment_date: "2024-01-16".to_string(),
            judges: vec!["A Judge".to_string()],
            source_url: "https://example.com/case/1".to_string(),
            fetched_at: Utc::now(),
            document_type: DocumentType::CaseLaw,
        };
        assert!(record.is_complete());

        record.citation = "  ".to_string();
        assert!(!record.is_complete());
    }

    #[test]
    fn test_analysis_record_shape_is_stable() {
        let record = AnalysisRecord {
            source_url: "https://example.com/case/1".to_string(),
            full_text: String::new(),
            parties: Parties::default(),
            case_summary: String::new(),
            legal_issues: vec![],
            decision: String::new(),
            legal_principles: vec![],
            precedents_cited: vec![],
            advocates: vec![],
            judges: vec![],
            metadata: AnalysisMetadata::default(),
            fetched_at: Utc::now(),
            document_type: DocumentType::CaseAnalysis,
        };

        let value = serde_json::to_value(&record).unwrap();
        // Empty fields serialize as empty values, never disappear
        assert_eq!(value["parties"]["plaintiff"], "");
        assert!(value["legal_issues"].as_array().unwrap().is_empty());
        assert_eq!(value["metadata"]["word_count"], 0);
    }
}

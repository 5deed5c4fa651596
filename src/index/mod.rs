//! Search-index sink
//!
//! All three record kinds go into one index, discriminated by their
//! `document_type` tag. The sink is optional: pipelines log and continue
//! when indexing fails, so a down index never aborts a batch run.

mod http;

pub use http::HttpSearchIndex;

use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from index operations
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Index rejected request: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Contract between the pipelines and the search index
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Creates the index with its mapping if it does not exist
    async fn ensure_index(&self) -> IndexResult<()>;

    /// Indexes one document under a content-derived id
    async fn index(&self, document: &Value) -> IndexResult<()>;

    /// Runs a query and returns matching documents
    async fn search(&self, query: &Value) -> IndexResult<Vec<Value>>;
}

/// Derives a stable document id from record key fields
///
/// The same record indexed twice overwrites itself instead of
/// duplicating.
pub fn document_id(document: &Value) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for key in ["title", "citation", "chapter_number", "source_url"] {
        if let Some(value) = document.get(key).and_then(|v| v.as_str()) {
            if !value.is_empty() {
                parts.push(value);
            }
        }
    }

    let joined = parts.join("|");
    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hex::encode(hasher.finalize())[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_id_is_stable() {
        let doc = json!({"title": "Penal Code", "citation": "Cap 63"});
        assert_eq!(document_id(&doc), document_id(&doc));
        assert_eq!(document_id(&doc).len(), 16);
    }

    #[test]
    fn test_different_documents_different_ids() {
        let a = json!({"title": "Penal Code"});
        let b = json!({"title": "Evidence Act"});
        assert_ne!(document_id(&a), document_id(&b));
    }

    #[test]
    fn test_empty_fields_skipped() {
        let a = json!({"title": "Penal Code", "citation": ""});
        let b = json!({"title": "Penal Code"});
        assert_eq!(document_id(&a), document_id(&b));
    }
}

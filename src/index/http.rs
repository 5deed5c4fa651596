//! HTTP JSON implementation of the search-index contract
//!
//! Speaks the Elasticsearch-style REST surface: `PUT /{index}` with a
//! mapping, `PUT /{index}/_doc/{id}`, `POST /{index}/_search`.

use crate::config::IndexConfig;
use crate::index::{document_id, IndexError, IndexResult, SearchIndex};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Shared mapping for all three record kinds
fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "title":          {"type": "text"},
                "full_text":      {"type": "text"},
                "document_type":  {"type": "keyword"},
                "citation":       {"type": "keyword"},
                "court":          {"type": "keyword"},
                "judges":         {"type": "text"},
                "judgment_date":  {"type": "keyword"},
                "chapter_number": {"type": "keyword"},
                "year_enacted":   {"type": "integer"},
                "legal_category": {"type": "keyword"},
                "source_url":     {"type": "keyword"},
                "fetched_at":     {"type": "date"}
            }
        }
    })
}

/// Search-index client over HTTP
pub struct HttpSearchIndex {
    client: Client,
    base_url: String,
    index_name: String,
}

impl HttpSearchIndex {
    pub fn new(config: &IndexConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            index_name: config.index_name.clone(),
        })
    }

    fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index_name)
    }

    async fn check_response(response: reqwest::Response) -> IndexResult<Value> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await.unwrap_or(Value::Null));
        }
        let body = response.text().await.unwrap_or_default();
        Err(IndexError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SearchIndex for HttpSearchIndex {
    async fn ensure_index(&self) -> IndexResult<()> {
        let exists = self
            .client
            .head(self.index_url())
            .send()
            .await?
            .status()
            .is_success();

        if exists {
            return Ok(());
        }

        let response = self
            .client
            .put(self.index_url())
            .json(&index_mapping())
            .send()
            .await?;
        Self::check_response(response).await?;

        tracing::info!("Created index '{}'", self.index_name);
        Ok(())
    }

    async fn index(&self, document: &Value) -> IndexResult<()> {
        let id = document_id(document);
        let url = format!("{}/_doc/{}", self.index_url(), id);

        let response = self.client.put(&url).json(document).send().await?;
        Self::check_response(response).await?;

        tracing::debug!("Indexed document {}", id);
        Ok(())
    }

    async fn search(&self, query: &Value) -> IndexResult<Vec<Value>> {
        let url = format!("{}/_search", self.index_url());

        let response = self.client.post(&url).json(query).send().await?;
        let body = Self::check_response(response).await?;

        let hits = body
            .pointer("/hits/hits")
            .and_then(|h| h.as_array())
            .ok_or_else(|| {
                IndexError::MalformedResponse("response has no hits.hits array".to_string())
            })?;

        Ok(hits
            .iter()
            .filter_map(|hit| hit.get("_source").cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> IndexConfig {
        IndexConfig {
            base_url: base_url.to_string(),
            index_name: "legal_documents".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ensure_index_skips_existing() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/legal_documents"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let index = HttpSearchIndex::new(&config(&server.uri())).unwrap();
        index.ensure_index().await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_index_creates_missing() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/legal_documents"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/legal_documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "acknowledged": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let index = HttpSearchIndex::new(&config(&server.uri())).unwrap();
        index.ensure_index().await.unwrap();
    }

    #[tokio::test]
    async fn test_index_document_uses_derived_id() {
        let server = MockServer::start().await;
        let document = serde_json::json!({
            "title": "Penal Code",
            "document_type": "legislation"
        });
        let id = document_id(&document);

        Mock::given(method("PUT"))
            .and(path(format!("/legal_documents/_doc/{}", id)))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "result": "created"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let index = HttpSearchIndex::new(&config(&server.uri())).unwrap();
        index.index(&document).await.unwrap();
    }

    #[tokio::test]
    async fn test_search_extracts_sources() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/legal_documents/_search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "hits": {"hits": [
                    {"_id": "1", "_source": {"title": "Penal Code"}},
                    {"_id": "2", "_source": {"title": "Evidence Act"}}
                ]}
            })))
            .mount(&server)
            .await;

        let index = HttpSearchIndex::new(&config(&server.uri())).unwrap();
        let results = index
            .search(&serde_json::json!({"query": {"match_all": {}}}))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["title"], "Penal Code");
    }

    #[tokio::test]
    async fn test_rejected_request_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(400).set_body_string("mapping error"))
            .mount(&server)
            .await;

        let index = HttpSearchIndex::new(&config(&server.uri())).unwrap();
        let result = index.index(&serde_json::json!({"title": "X"})).await;
        assert!(matches!(
            result,
            Err(IndexError::Rejected { status: 400, .. })
        ));
    }
}

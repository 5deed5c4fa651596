//! Full-text case analysis pipeline
//!
//! Takes explicit judgment URLs or reuses the case extraction pipeline to
//! find them, fans the detail fetches out, pulls the judgment text out of
//! each page, and runs the structured-text extractor.

use crate::config::Config;
use crate::extract::extract;
use crate::fetch::{run_batch, FetchEngine};
use crate::index::SearchIndex;
use crate::output::{analysis_summary, summary_path, timestamped_path, write_json, write_json_value};
use crate::pipeline::{collect_cases, index_records, RunReport};
use crate::records::{AnalysisRecord, DocumentType};
use crate::Result;
use chrono::Utc;
use scraper::{ElementRef, Html, Selector};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Content-area selectors tried in order before falling back to body
const CONTENT_SELECTORS: &[&str] = &[
    "div[class*='judgment']",
    "div[class*='content']",
    "div[class*='main']",
    "article",
    "main",
    "div[id*='content']",
    "div[id*='main']",
];

/// Result of an analysis run
#[derive(Debug)]
pub struct AnalysisRun {
    pub records: Vec<AnalysisRecord>,
    pub report: RunReport,
    pub output_path: Option<PathBuf>,
}

/// Runs the full pipeline: fetch, extract, write JSON + summary, index
pub async fn run_analysis(
    engine: Arc<FetchEngine>,
    config: &Config,
    index: Option<&dyn SearchIndex>,
    count: usize,
    urls: Option<Vec<String>>,
    output: Option<PathBuf>,
) -> Result<AnalysisRun> {
    let mut urls = match urls {
        Some(urls) => urls,
        None => {
            tracing::info!("No URLs supplied; collecting them from the case listing");
            collect_cases(Arc::clone(&engine), config, count)
                .await?
                .records
                .into_iter()
                .map(|record| record.source_url)
                .collect()
        }
    };
    urls.truncate(count);

    if urls.is_empty() {
        tracing::warn!("No case URLs to analyze");
        return Ok(AnalysisRun {
            records: Vec::new(),
            report: RunReport::default(),
            output_path: None,
        });
    }

    tracing::info!("Analyzing {} cases in detail", urls.len());
    let batch = run_batch(
        Arc::clone(&engine),
        urls,
        config.fetch.max_concurrency as usize,
        config.fetch.batch_timeout_secs.map(Duration::from_secs),
    )
    .await;
    let report = RunReport::from(&batch);

    let fetched_at = Utc::now();
    let mut records = Vec::new();
    for outcome in &batch.outcomes {
        let Some(body) = outcome.body() else {
            continue;
        };

        let text = judgment_text(body);
        if text.trim().is_empty() {
            tracing::warn!("No judgment text found at {}", outcome.url);
            continue;
        }

        let fields = extract(&text);
        let degraded = fields.low_confidence_fields();
        if !degraded.is_empty() {
            tracing::debug!(
                "Low-confidence extraction for {}: {}",
                outcome.url,
                degraded.join(", ")
            );
        }

        records.push(AnalysisRecord {
            source_url: outcome.url.clone(),
            full_text: fields.full_text,
            parties: fields.parties,
            case_summary: fields.case_summary,
            legal_issues: fields.legal_issues,
            decision: fields.decision,
            legal_principles: fields.legal_principles,
            precedents_cited: fields.precedents_cited,
            advocates: fields.advocates,
            judges: fields.judges,
            metadata: fields.metadata,
            fetched_at,
            document_type: DocumentType::CaseAnalysis,
        });
    }

    tracing::info!("Case analysis: {} ({} records kept)", report, records.len());

    let output_path = if records.is_empty() {
        None
    } else {
        let path = match output {
            Some(path) => path,
            None => timestamped_path(&config.output.directory, "case_analysis", "json")?,
        };
        write_json(&records, &path)?;
        write_json_value(&analysis_summary(&records), &summary_path(&path))?;

        if let Some(index) = index {
            index_records(index, &records).await;
        }
        Some(path)
    };

    Ok(AnalysisRun {
        records,
        report,
        output_path,
    })
}

/// Pulls the judgment text out of a detail page
///
/// Tries the content-area selector chain, then the body. Script and style
/// subtrees are excluded; block-element boundaries become newlines so the
/// extractor's paragraph segmentation survives the flattening.
pub fn judgment_text(html: &str) -> String {
    let document = Html::parse_document(html);

    for selector_text in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_text) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = block_text(element);
            if !text.trim().is_empty() {
                return text;
            }
        }
    }

    if let Ok(body) = Selector::parse("body") {
        if let Some(element) = document.select(&body).next() {
            return block_text(element);
        }
    }

    String::new()
}

/// Elements whose boundaries delimit lines in the flattened text
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "li", "tr", "br", "h1", "h2", "h3", "h4", "h5", "h6", "section", "blockquote",
];

fn block_text(element: ElementRef) -> String {
    let mut out = String::new();
    append_text(element, &mut out);
    out
}

fn append_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if name == "script" || name == "style" || name == "noscript" {
                continue;
            }
            let is_block = BLOCK_ELEMENTS.contains(&name);
            if is_block && !out.ends_with('\n') && !out.is_empty() {
                out.push('\n');
            }
            append_text(child_element, out);
            if is_block && !out.ends_with('\n') && !out.is_empty() {
                out.push('\n');
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

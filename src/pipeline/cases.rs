//! Case extraction pipeline
//!
//! Walks the judgments listing, fans detail fetches out through the
//! dispatch coordinator, merges shallow listing fields with the detail
//! panel, and emits only records satisfying the citation/court invariant.

use crate::config::Config;
use crate::fetch::{run_batch, FetchEngine};
use crate::index::SearchIndex;
use crate::listing::{parse_case_details, parse_case_listing, ListedItem};
use crate::output::{cases_summary, summary_path, timestamped_path, write_cases_csv, write_json_value};
use crate::pipeline::{index_records, RunReport};
use crate::records::{CaseRecord, DocumentType};
use crate::Result;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Listing path on the primary site
const CASE_LISTING_PATH: &str = "/judgments/";

/// Result of a case extraction run
#[derive(Debug)]
pub struct CasesRun {
    pub records: Vec<CaseRecord>,
    pub report: RunReport,
    pub output_path: Option<PathBuf>,
}

/// Collects case records without writing any output
///
/// Shared with the analysis pipeline, which reuses the detail URLs.
pub async fn collect_cases(
    engine: Arc<FetchEngine>,
    config: &Config,
    count: usize,
) -> Result<CasesRun> {
    tracing::info!("Extracting up to {} recent cases", count);

    let items = collect_listing_items(&engine, config, count).await?;
    if items.is_empty() {
        tracing::warn!("No cases found on any listing page");
        return Ok(CasesRun {
            records: Vec::new(),
            report: RunReport::default(),
            output_path: None,
        });
    }

    // Fan out detail fetches, bounded by the configured concurrency
    let urls: Vec<String> = items.iter().map(|item| item.url.clone()).collect();
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
    for (item, outcome) in items.iter().zip(&batch.outcomes) {
        let Some(body) = outcome.body() else {
            continue;
        };

        let details = parse_case_details(body);
        let record = CaseRecord {
            title: item.title.clone(),
            citation: details.citation,
            court: details.court,
            judgment_date: details.judgment_date,
            judges: details.judges,
            source_url: item.url.clone(),
            fetched_at,
            document_type: DocumentType::CaseLaw,
        };

        // Invariant: no record without citation and court
        if record.is_complete() {
            records.push(record);
        } else {
            tracing::warn!(
                "Dropping case without citation/court metadata: {}",
                item.url
            );
        }
    }

    tracing::info!("Case extraction: {} ({} records kept)", report, records.len());
    Ok(CasesRun {
        records,
        report,
        output_path: None,
    })
}

/// Runs the full pipeline: collect, write CSV + summary, index
pub async fn run_cases(
    engine: Arc<FetchEngine>,
    config: &Config,
    index: Option<&dyn SearchIndex>,
    count: usize,
    output: Option<PathBuf>,
) -> Result<CasesRun> {
    let mut run = collect_cases(engine, config, count).await?;

    if run.records.is_empty() {
        tracing::warn!("No case records to save");
        return Ok(run);
    }

    let path = match output {
        Some(path) => path,
        None => timestamped_path(&config.output.directory, "cases", "csv")?,
    };
    write_cases_csv(&run.records, &path)?;
    write_json_value(&cases_summary(&run.records), &summary_path(&path))?;

    if let Some(index) = index {
        index_records(index, &run.records).await;
    }

    run.output_path = Some(path);
    Ok(run)
}

/// Requests successive listing pages until the target count or the
/// page-scan limit is reached
async fn collect_listing_items(
    engine: &FetchEngine,
    config: &Config,
    count: usize,
) -> Result<Vec<ListedItem>> {
    let base = Url::parse(&config.sites.primary_base_url)?;
    let listing_url = base.join(CASE_LISTING_PATH)?;

    let mut items: Vec<ListedItem> = Vec::new();

    for page in 1..=config.listing.max_page_scan {
        let page_url = if page == 1 {
            listing_url.to_string()
        } else {
            format!("{}?page={}", listing_url, page)
        };

        let outcome = engine.fetch(&page_url).await;
        let Some(body) = outcome.body() else {
            tracing::warn!("Listing page {} failed; stopping pagination", page_url);
            break;
        };

        let page_base = Url::parse(&page_url)?;
        let page_items = parse_case_listing(body, &page_base);
        if page_items.is_empty() {
            // A page no strategy understands ends the scan
            break;
        }

        let before = items.len();
        for item in page_items {
            if !items.iter().any(|existing| existing.url == item.url) {
                items.push(item);
            }
        }

        if items.len() >= count {
            break;
        }
        if items.len() == before {
            // Pagination is looping on itself
            tracing::warn!("Listing page {} repeated known items; stopping", page_url);
            break;
        }
    }

    items.truncate(count);
    Ok(items)
}

//! Legislation pipeline
//!
//! Paginates the legislation listing until the target number of Acts or
//! the page-scan limit is reached. The first page yields the year-menu
//! links; further listing pages are fetched as one dispatched batch.

use crate::categorize::categorize;
use crate::config::Config;
use crate::fetch::{run_batch, FetchEngine};
use crate::index::SearchIndex;
use crate::listing::{parse_act_listing, year_page_links, ListedAct};
use crate::output::{legislation_summary, summary_path, timestamped_path, write_json, write_json_value};
use crate::pipeline::{index_records, RunReport};
use crate::records::{ActRecord, DocumentType};
use crate::Result;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Listing path on the primary site
const LEGISLATION_LISTING_PATH: &str = "/legislation/";

/// Result of a legislation run
#[derive(Debug)]
pub struct LegislationRun {
    pub records: Vec<ActRecord>,
    pub report: RunReport,
    pub output_path: Option<PathBuf>,
}

/// Runs the full pipeline: paginate, categorize, write JSON + summary,
/// index
pub async fn run_legislation(
    engine: Arc<FetchEngine>,
    config: &Config,
    index: Option<&dyn SearchIndex>,
    min_acts: usize,
    output: Option<PathBuf>,
) -> Result<LegislationRun> {
    tracing::info!("Extracting at least {} Acts", min_acts);

    let base = Url::parse(&config.sites.primary_base_url)?;
    let listing_url = base.join(LEGISLATION_LISTING_PATH)?;

    let mut records: Vec<ActRecord> = Vec::new();
    let mut report = RunReport::default();

    // First page: Acts plus the year-menu links for pagination
    let first = engine.fetch(listing_url.as_str()).await;
    report.requested += 1;
    let mut further_pages: Vec<String> = Vec::new();

    match first.body() {
        Some(body) => {
            report.succeeded += 1;
            absorb_acts(&mut records, parse_act_listing(body, &listing_url), min_acts);
            further_pages = year_page_links(body, &listing_url);
        }
        None => {
            report.failed += 1;
            tracing::warn!("Legislation listing page failed: {}", listing_url);
        }
    }

    // Remaining listing pages as one bounded batch
    further_pages.retain(|url| url != listing_url.as_str());
    if records.len() < min_acts && !further_pages.is_empty() {
        let page_limit = (config.listing.max_page_scan as usize).saturating_sub(1);
        further_pages.truncate(page_limit);

        let batch = run_batch(
            Arc::clone(&engine),
            further_pages,
            config.fetch.max_concurrency as usize,
            config.fetch.batch_timeout_secs.map(Duration::from_secs),
        )
        .await;

        report.requested += batch.requested;
        report.succeeded += batch.succeeded;
        report.failed += batch.failed;

        for outcome in &batch.outcomes {
            if records.len() >= min_acts {
                break;
            }
            let Some(body) = outcome.body() else {
                continue;
            };
            let page_base = Url::parse(&outcome.url)?;
            absorb_acts(&mut records, parse_act_listing(body, &page_base), min_acts);
        }
    }

    if records.len() < min_acts {
        tracing::warn!(
            "Found {} Acts, short of the requested {}",
            records.len(),
            min_acts
        );
    }
    tracing::info!("Legislation: {} ({} Acts kept)", report, records.len());

    let output_path = if records.is_empty() {
        None
    } else {
        let path = match output {
            Some(path) => path,
            None => timestamped_path(&config.output.directory, "legislation", "json")?,
        };
        write_json(&records, &path)?;
        write_json_value(&legislation_summary(&records), &summary_path(&path))?;

        if let Some(index) = index {
            index_records(index, &records).await;
        }
        Some(path)
    };

    Ok(LegislationRun {
        records,
        report,
        output_path,
    })
}

/// Converts listed Acts into records, up to the target count
fn absorb_acts(records: &mut Vec<ActRecord>, acts: Vec<ListedAct>, min_acts: usize) {
    let fetched_at = Utc::now();

    for act in acts {
        if records.len() >= min_acts {
            return;
        }
        if records.iter().any(|existing| existing.title == act.title) {
            continue;
        }

        records.push(ActRecord {
            legal_category: categorize(&act.title).to_string(),
            title: act.title,
            chapter_number: act.chapter_number,
            year_enacted: act.year_enacted,
            download_url: act.download_url,
            source_url: act.source_url.unwrap_or_default(),
            fetched_at,
            document_type: DocumentType::Legislation,
        });
    }
}

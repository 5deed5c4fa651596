//! Scraping pipelines
//!
//! One pipeline per document kind: case extraction, legislation, and
//! full-text case analysis. Each pipeline drives the fetch engine through
//! the dispatch coordinator, hands pages to its parser or extractor, and
//! streams records to the file sinks and (when configured) the search
//! index. A pipeline always completes and reports counts; individual
//! failures are logged, never fatal.

mod analysis;
mod cases;
mod legislation;

pub use analysis::{run_analysis, AnalysisRun};
pub use cases::{collect_cases, run_cases, CasesRun};
pub use legislation::{run_legislation, LegislationRun};

use crate::fetch::BatchReport;
use crate::index::SearchIndex;
use serde::Serialize;

/// Counts reported by every pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl From<&BatchReport> for RunReport {
    fn from(batch: &BatchReport) -> Self {
        Self {
            requested: batch.requested,
            succeeded: batch.succeeded,
            failed: batch.failed,
        }
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} requested, {} succeeded, {} failed",
            self.requested, self.succeeded, self.failed
        )
    }
}

/// Indexes a record collection, logging failures instead of propagating
///
/// A down index must not abort a batch that already has its data.
pub(crate) async fn index_records<T: Serialize>(index: &dyn SearchIndex, records: &[T]) {
    if let Err(e) = index.ensure_index().await {
        tracing::warn!("Could not ensure search index exists: {}", e);
        return;
    }

    let mut indexed = 0usize;
    for record in records {
        let document = match serde_json::to_value(record) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Could not serialize record for indexing: {}", e);
                continue;
            }
        };

        match index.index(&document).await {
            Ok(()) => indexed += 1,
            Err(e) => tracing::warn!("Failed to index document: {}", e),
        }
    }

    tracing::info!("Indexed {} of {} records", indexed, records.len());
}

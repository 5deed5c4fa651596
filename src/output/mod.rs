//! Output sinks for scraped records
//!
//! This module handles:
//! - CSV export of case records
//! - JSON export of Act and analysis collections
//! - Derived summary objects written alongside each collection
//!
//! Sinks are appended to by the pipeline only, never by concurrent fetch
//! workers, so writers need no locking.

mod csv_output;
mod json_output;
mod summary;

pub use csv_output::write_cases_csv;
pub use json_output::{write_json, write_json_value};
pub use summary::{analysis_summary, cases_summary, legislation_summary};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Builds "directory/stem_YYYYMMDD_HHMMSS.ext" and creates the directory
pub fn timestamped_path(directory: &str, stem: &str, extension: &str) -> OutputResult<PathBuf> {
    std::fs::create_dir_all(directory)?;
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    Ok(Path::new(directory).join(format!("{}_{}.{}", stem, timestamp, extension)))
}

/// Sibling path with "_summary" appended to the stem; summaries are
/// always JSON regardless of the collection's format
pub fn summary_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    path.with_file_name(format!("{}_summary.json", stem))
}

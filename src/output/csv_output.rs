//! CSV export for case records

use crate::output::OutputResult;
use crate::records::CaseRecord;
use std::path::Path;

const HEADER: &[&str] = &[
    "title",
    "citation",
    "court",
    "judgment_date",
    "judges",
    "source_url",
    "fetched_at",
    "document_type",
];

/// Writes case records as CSV, one row per record
///
/// Judge lists are joined with "; " since CSV has no nested sequences.
pub fn write_cases_csv(records: &[CaseRecord], path: &Path) -> OutputResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(HEADER)?;
    for record in records {
        let judges = record.judges.join("; ");
        let fetched_at = record.fetched_at.to_rfc3339();
        writer.write_record([
            record.title.as_str(),
            record.citation.as_str(),
            record.court.as_str(),
            record.judgment_date.as_str(),
            judges.as_str(),
            record.source_url.as_str(),
            fetched_at.as_str(),
            record.document_type.as_str(),
        ])?;
    }

    writer.flush()?;
    tracing::info!("Saved {} cases to {}", records.len(), path.display());
    Ok(())
}

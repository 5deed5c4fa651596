//! JSON export for Act and analysis collections

use crate::output::OutputResult;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Writes a serializable collection as pretty-printed JSON
pub fn write_json<T: Serialize>(records: &[T], path: &Path) -> OutputResult<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// Writes a single pre-built JSON value (summaries)
pub fn write_json_value(value: &serde_json::Value, path: &Path) -> OutputResult<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ActRecord, DocumentType};
    use chrono::Utc;

    fn act(title: &str) -> ActRecord {
        ActRecord {
            title: title.to_string(),
            chapter_number: Some("63".to_string()),
            year_enacted: Some(1930),
            download_url: None,
            legal_category: "Criminal".to_string(),
            source_url: "https://example.com/acts/63".to_string(),
            fetched_at: Utc::now(),
            document_type: DocumentType::Legislation,
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acts.json");

        write_json(&[act("Penal Code")], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<ActRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Penal Code");
        assert_eq!(parsed[0].year_enacted, Some(1930));
        assert_eq!(parsed[0].document_type, DocumentType::Legislation);
    }

    #[test]
    fn test_empty_collection_is_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acts.json");

        write_json::<ActRecord>(&[], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "[]");
    }

    #[test]
    fn test_write_json_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");

        let value = serde_json::json!({"total_acts": 3});
        write_json_value(&value, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["total_acts"], 3);
    }
}

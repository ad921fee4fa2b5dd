//! CSV report of the run's categorizations.

use crate::models::CategorizationRecord;
use anyhow::Context;
use std::path::Path;

/// Write all records to `path` with a `filename,category` header, replacing
/// any report from a previous run.
pub fn write_report(path: &Path, records: &[CategorizationRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating report {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .with_context(|| format!("writing report {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(filename: &str, category: &str) -> CategorizationRecord {
        CategorizationRecord {
            filename: filename.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn writes_header_and_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write_report(
            &path,
            &[
                record("a.pdf", "Engineering"),
                record("b.pdf", "Sales"),
            ],
        )
        .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "filename,category\na.pdf,Engineering\nb.pdf,Sales\n");
    }

    #[test]
    fn overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write_report(&path, &[record("old.pdf", "Sales")]).unwrap();
        write_report(&path, &[record("new.pdf", "Engineering")]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("old.pdf"));
        assert!(content.contains("new.pdf,Engineering"));
    }
}

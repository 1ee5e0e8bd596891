// src/utils/block_debug.rs
use std::fs;
use std::path::Path;
use crate::extractors::{BlockStatus, Extraction, SkipReason};
use crate::utils::error::AppError;

/// Renders every segmented block with the decision taken for it.
pub fn render_block_report(text: &str, extraction: &Extraction) -> String {
    let mut report = String::new();

    report.push_str(&format!(
        "{} blocks, {} records, {} duplicates dropped\n",
        extraction.block_count(),
        extraction.table.len(),
        extraction.dropped_duplicates().len()
    ));

    for outcome in &extraction.outcomes {
        let status = match &outcome.status {
            BlockStatus::Accepted => "record".to_string(),
            BlockStatus::Skipped(SkipReason::NoAccountMarker) => "skipped: no account marker".to_string(),
            BlockStatus::Skipped(SkipReason::NoCptCodes) => "skipped: no CPT codes".to_string(),
            BlockStatus::DuplicateDropped => "dropped: duplicate account (first occurrence kept)".to_string(),
        };

        report.push_str(&format!(
            "\n===== block {} | offset {} | account {} | {} =====\n",
            outcome.index,
            outcome.offset,
            outcome.account_number.as_deref().unwrap_or("-"),
            status
        ));

        // Offsets always come from the same text, but never panic over a bad slice.
        let body = text
            .get(outcome.offset..outcome.offset + outcome.length)
            .unwrap_or("<block text unavailable>");
        report.push_str(body);
        if !body.ends_with('\n') {
            report.push('\n');
        }
    }

    report
}

/// Writes the block report to `filename`.
pub fn save_block_report(text: &str, extraction: &Extraction, filename: &Path) -> Result<(), AppError> {
    fs::write(filename, render_block_report(text, extraction))?;

    tracing::info!("Saved block debug report to {}", filename.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::RecordExtractor;

    #[test]
    fn test_report_lists_each_block_with_its_outcome() {
        let text = "Header\nAccount: 1234\nDOE JOHN 99213\nAccount: 1234\n99214\nAccount: 4321\nnothing\n";
        let extraction = RecordExtractor::new().extract(text).unwrap();

        let report = render_block_report(text, &extraction);

        assert!(report.starts_with("4 blocks, 1 records, 1 duplicates dropped\n"));
        assert!(report.contains("block 0 | offset 0 | account - | skipped: no account marker"));
        assert!(report.contains("block 1 | offset 7 | account 1234 | record"));
        assert!(report.contains("account 1234 | dropped: duplicate account"));
        assert!(report.contains("account 4321 | skipped: no CPT codes"));
        assert!(report.contains("DOE JOHN 99213\n"));
    }

    #[test]
    fn test_save_block_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocks.txt");
        let text = "Account: 1234\n99213\n";
        let extraction = RecordExtractor::new().extract(text).unwrap();

        save_block_report(text, &extraction, &path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("account 1234 | record"));
    }
}

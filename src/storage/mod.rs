// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::document::SourceDocument;
use crate::extractors::{BlockStatus, Extraction, RecordTable, SkipReason, COLUMNS, TABLE_NAME};
use crate::utils::error::StorageError;
use rust_xlsxwriter::Workbook;

/// File format for the exported record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes the table as `<stem>.<ext>`, header row first, one row per record.
    pub fn save_table(&self, table: &RecordTable, format: ExportFormat, stem: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}.{}", stem, format.extension()));

        match format {
            ExportFormat::Xlsx => {
                let mut workbook = Workbook::new();
                let worksheet = workbook.add_worksheet();
                worksheet.set_name(TABLE_NAME)?;
                for (col, header) in COLUMNS.iter().enumerate() {
                    worksheet.write_string(0, col as u16, *header)?;
                }
                for (row, record) in table.iter().enumerate() {
                    for (col, cell) in record.cells().iter().enumerate() {
                        worksheet.write_string(row as u32 + 1, col as u16, cell)?;
                    }
                }
                workbook.save(&file_path)?;
            }
            ExportFormat::Csv => {
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_path(&file_path)?;
                writer.write_record(COLUMNS)?;
                for record in table {
                    writer.write_record(record.cells())?;
                }
                writer.flush().map_err(StorageError::IoError)?;
            }
            ExportFormat::Json => {
                let json = serde_json::to_string_pretty(table)
                    .map_err(|e| StorageError::SerializationError(e.to_string()))?;
                fs::write(&file_path, json)
                    .map_err(StorageError::IoError)?;
            }
        }

        tracing::info!("Saved {} records to {}", table.len(), file_path.display());

        Ok(file_path)
    }

    /// Saves metadata about the run in JSON format as `<stem>_meta.json`
    pub fn save_metadata(
        &self,
        document: &SourceDocument,
        extraction: &Extraction,
        export_path: &Path,
        stem: &str,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_meta.json", stem));

        let metadata = serde_json::json!({
            "source_file": document.display_name(),
            "source_kind": document.kind,
            "page_count": document.page_count,
            "table_name": TABLE_NAME,
            "columns": COLUMNS,
            "export_file": export_path.display().to_string(),
            "record_count": extraction.table.len(),
            "block_count": extraction.block_count(),
            "skipped_no_account": extraction.count(&BlockStatus::Skipped(SkipReason::NoAccountMarker)),
            "skipped_no_cpt": extraction.count(&BlockStatus::Skipped(SkipReason::NoCptCodes)),
            "dropped_duplicates": extraction.dropped_duplicates(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

/// Fixed-width text rendering of the table for the terminal.
pub fn render_table(table: &RecordTable) -> String {
    let rows: Vec<[String; 4]> = table.iter().map(|record| record.cells()).collect();

    let mut widths = COLUMNS.map(|column| column.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: [&str; 4]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_row(COLUMNS));
    out.push('\n');
    out.push_str(&widths.map(|width| "-".repeat(width)).join("-+-"));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row([&row[0], &row[1], &row[2], &row[3]]));
        out.push('\n');
    }
    out
}

// src/main.rs
mod utils;
mod document;
mod extractors;
mod storage;

use clap::Parser;
use std::path::PathBuf;
use utils::AppError;
use utils::error::ExtractError;
use extractors::{BlockStatus, ExtractorConfig, IgnoreList, RecordExtractor, SkipReason};
use storage::{ExportFormat, StorageManager};

/// Command Line Interface for the account billing record extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input document: a PDF, or a text dump already extracted from one
    input: PathBuf,

    /// Output directory for exported files
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Export format for the record table
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Xlsx)]
    format: ExportFormat,

    /// File name (without extension) for the exported table
    #[arg(long, default_value = "clean_accounts")]
    file_name: String,

    /// Extra words never accepted as part of a patient name (repeatable)
    #[arg(long = "ignore-word", env = "ACCOUNT_EXTRACTOR_IGNORE_WORDS", value_delimiter = ',')]
    ignore_words: Vec<String>,

    /// Print the table only, write no files
    #[arg(long)]
    no_export: bool,

    /// Debug mode - save a block-by-block report of the segmentation
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    if args.file_name.trim().is_empty() {
        return Err(AppError::Config("--file-name must not be empty".to_string()));
    }

    // 3. Build the extractor configuration
    let ignore_words = IgnoreList::new().with_extra(&args.ignore_words);
    tracing::debug!("Ignore list ({} words): {:?}", ignore_words.len(), ignore_words.iter().collect::<Vec<_>>());
    let extractor = RecordExtractor::with_config(ExtractorConfig { ignore_words });

    // 4. Acquire the document text
    let document = document::load_document(&args.input).await?;

    // 5. Run the extraction pipeline
    let extraction = match extractor.extract(&document.text) {
        Ok(extraction) => extraction,
        Err(e) => {
            tracing::error!("{} ({})", e, document.display_name());
            return Err(e.into());
        }
    };

    tracing::info!(
        "Scanned {} blocks: {} without account marker, {} without CPT codes, {} duplicate accounts dropped",
        extraction.block_count(),
        extraction.count(&BlockStatus::Skipped(SkipReason::NoAccountMarker)),
        extraction.count(&BlockStatus::Skipped(SkipReason::NoCptCodes)),
        extraction.count(&BlockStatus::DuplicateDropped)
    );

    // 6. Debug report, written even when nothing was extracted
    let storage = if args.no_export && !args.debug {
        None
    } else {
        Some(StorageManager::new(&args.output_dir)?)
    };

    if args.debug {
        if let Some(storage) = &storage {
            let report_path = storage.base_dir().join(format!("{}_blocks.txt", args.file_name));
            if let Err(e) = utils::block_debug::save_block_report(&document.text, &extraction, &report_path) {
                tracing::warn!("Failed to create block debug report: {}", e);
            }
        }
    }

    // 7. Surface an empty result as a warning, not a failure
    let table = match extraction.ensure_records() {
        Ok(table) => table,
        Err(e @ ExtractError::EmptyResultSet { .. }) => {
            tracing::warn!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Extracted {} clean account records!", table.len());
    print!("{}", storage::render_table(table));

    // 8. Export
    if args.no_export {
        return Ok(());
    }

    if let Some(storage) = &storage {
        let export_path = storage.save_table(table, args.format, &args.file_name)?;

        match storage.save_metadata(&document, &extraction, &export_path, &args.file_name) {
            Ok(path) => tracing::info!("Saved run metadata to: {}", path.display()),
            Err(e) => tracing::error!("Failed to save run metadata: {}", e),
        }
    }

    Ok(())
}

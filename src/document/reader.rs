// src/document/reader.rs
use crate::document::models::{SourceDocument, SourceKind};
use crate::utils::error::DocumentError;
use std::path::Path;

const PAGE_BREAK: char = '\u{c}';

/// Reads the input file and produces the document text blob.
/// PDF decoding is CPU-bound and runs on the blocking pool.
pub async fn load_document(path: &Path) -> Result<SourceDocument, DocumentError> {
    let kind = SourceKind::from_path(path);
    tracing::info!("Reading {:?} document from: {}", kind, path.display());

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());

    let (text, page_count) = match kind {
        SourceKind::Pdf => {
            let pages = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&bytes))
                .await?
                .map_err(|e| DocumentError::Pdf(format!("failed to extract text from {}: {}", path.display(), e)))?;
            (join_pages(&pages), pages.len())
        }
        SourceKind::Text => {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            let page_count = text.matches(PAGE_BREAK).count() + 1;
            (text, page_count)
        }
    };

    tracing::info!("Acquired {} characters of text from {} page(s)", text.chars().count(), page_count);

    Ok(SourceDocument {
        path: path.to_path_buf(),
        kind,
        text,
        page_count,
    })
}

/// Concatenates page texts, each non-empty page followed by a newline.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for page in pages.iter().map(AsRef::as_ref).filter(|page| !page.is_empty()) {
        text.push_str(page);
        text.push('\n');
    }
    text
}

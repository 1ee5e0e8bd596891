// src/document/models.rs
use serde::Serialize;
use std::path::{Path, PathBuf};

/// How the input file is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Decoded with pdf-extract, one text chunk per page.
    Pdf,
    /// Already-extracted text dump, read as-is.
    Text,
}

impl SourceKind {
    /// Picks the kind from the file extension (case-insensitive). Anything
    /// that is not `.pdf` is treated as text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => SourceKind::Pdf,
            _ => SourceKind::Text,
        }
    }
}

/// The whole document as one text blob, plus where it came from.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub kind: SourceKind,
    pub text: String,
    pub page_count: usize,
}

impl SourceDocument {
    /// File name used in logs and metadata.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

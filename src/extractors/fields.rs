// src/extractors/fields.rs
//
// Field extractors for a single account block. None of these fail: a missing
// field comes back empty and the assembler decides what that means.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

// --- Regex Patterns (Lazy Static) ---
static ACCOUNT_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Account:\s*(\d{4,5})").expect("Failed to compile ACCOUNT_NUMBER_RE")
});

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{2}/\d{2}/\d{4}\b").expect("Failed to compile DATE_RE")
});

// Captures the whole line following the account marker line.
static LINE_AFTER_ACCOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Account:\s*\d{4}.*?\n(.*)").expect("Failed to compile LINE_AFTER_ACCOUNT_RE")
});

static CPT_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d{5}(?:-[A-Z0-9]{2})?\b").expect("Failed to compile CPT_CODE_RE")
});

/// Separator used when CPT codes are rendered as a single cell.
pub const CPT_SEPARATOR: &str = ", ";

/// First account number (4–5 digits) following an `Account:` marker.
pub fn extract_account_number(block: &str) -> Option<String> {
    ACCOUNT_NUMBER_RE
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Date of service: first date on the line right after the account line,
/// otherwise the first date anywhere in the block, otherwise empty.
pub fn extract_date_of_service(block: &str) -> String {
    if let Some(line) = LINE_AFTER_ACCOUNT_RE.captures(block).and_then(|caps| caps.get(1)) {
        if let Some(date) = DATE_RE.find(line.as_str()) {
            return date.as_str().to_string();
        }
        tracing::trace!("No date on line after account marker, falling back to block scan");
    }

    DATE_RE
        .find(block)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Distinct CPT codes in ascending order. Modifier casing is kept as written.
pub fn extract_cpt_codes(block: &str) -> Vec<String> {
    CPT_CODE_RE
        .find_iter(block)
        .map(|m| m.as_str().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Renders codes the way they appear in the table cell.
pub fn join_cpt_codes(codes: &[String]) -> String {
    codes.join(CPT_SEPARATOR)
}

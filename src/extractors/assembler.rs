// src/extractors/assembler.rs

// --- Imports ---
use crate::extractors::fields::{extract_account_number, extract_cpt_codes, extract_date_of_service};
use crate::extractors::ignore::IgnoreList;
use crate::extractors::names::extract_patient_name;
use crate::extractors::record::{Record, RecordTable};
use crate::extractors::segment::{split_blocks, AccountBlock};
use crate::utils::error::ExtractError;
use std::collections::HashSet;

// --- Configuration ---
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    pub ignore_words: IgnoreList,
}

// --- Data Structures ---

/// Why a block produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `Account: ####` marker (usually the page header before the first account).
    NoAccountMarker,
    /// An account number but nothing shaped like a CPT code.
    NoCptCodes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockStatus {
    Accepted,
    Skipped(SkipReason),
    /// A later block for an account that already has a record; dropped unmerged.
    DuplicateDropped,
}

/// What happened to one block, for reporting and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    pub index: usize,
    pub offset: usize,
    pub length: usize,
    pub account_number: Option<String>,
    pub status: BlockStatus,
}

/// Result of running the pipeline over one document.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub table: RecordTable,
    pub outcomes: Vec<BlockOutcome>,
}

impl Extraction {
    pub fn block_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn count(&self, status: &BlockStatus) -> usize {
        self.outcomes.iter().filter(|o| &o.status == status).count()
    }

    /// Account numbers whose later blocks were discarded by keep-first dedup.
    pub fn dropped_duplicates(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.status == BlockStatus::DuplicateDropped)
            .filter_map(|o| o.account_number.as_deref())
            .collect()
    }

    /// Fails with `EmptyResultSet` when no block produced a record.
    pub fn ensure_records(&self) -> Result<&RecordTable, ExtractError> {
        if self.table.is_empty() {
            return Err(ExtractError::EmptyResultSet { blocks: self.block_count() });
        }
        Ok(&self.table)
    }
}

/// Items surviving keep-first dedup, and the ones it discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepFirst<T> {
    pub kept: Vec<T>,
    pub dropped: Vec<T>,
}

/// Keeps the first item for each key and drops every later one, preserving
/// the relative order of what is kept. Later items are never merged into the
/// first, even when their other fields differ.
pub fn dedup_keep_first<T, F>(items: Vec<T>, key: F) -> KeepFirst<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(items.len());
    let mut dropped = Vec::new();

    for item in items {
        if seen.insert(key(&item).to_string()) {
            kept.push(item);
        } else {
            dropped.push(item);
        }
    }

    KeepFirst { kept, dropped }
}

// --- Main Extractor Structure ---
pub struct RecordExtractor {
    config: ExtractorConfig,
}

impl RecordExtractor {
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Runs segmentation, field extraction and assembly over the whole document text.
    ///
    /// Only blank input is an error here. A document with no usable blocks
    /// comes back with an empty table; see [`Extraction::ensure_records`].
    pub fn extract(&self, text: &str) -> Result<Extraction, ExtractError> {
        if text.trim().is_empty() {
            return Err(ExtractError::NoTextExtracted);
        }

        let blocks = split_blocks(text);
        let mut outcomes = Vec::with_capacity(blocks.len());
        let mut candidates: Vec<(usize, Record)> = Vec::new();

        for block in &blocks {
            match self.extract_block(block) {
                Ok(record) => {
                    outcomes.push(BlockOutcome {
                        index: block.index,
                        offset: block.offset,
                        length: block.text.len(),
                        account_number: Some(record.account_number.clone()),
                        status: BlockStatus::Accepted,
                    });
                    candidates.push((outcomes.len() - 1, record));
                }
                Err((account_number, reason)) => {
                    tracing::trace!("Skipping block {} at offset {}: {:?}", block.index, block.offset, reason);
                    outcomes.push(BlockOutcome {
                        index: block.index,
                        offset: block.offset,
                        length: block.text.len(),
                        account_number,
                        status: BlockStatus::Skipped(reason),
                    });
                }
            }
        }

        let deduped = dedup_keep_first(candidates, |(_, record)| record.account_number.as_str());
        for (slot, record) in &deduped.dropped {
            tracing::warn!(
                "Account {} appears again in block {}; keeping the first occurrence and dropping this one",
                record.account_number,
                outcomes[*slot].index
            );
            outcomes[*slot].status = BlockStatus::DuplicateDropped;
        }

        let table = RecordTable::from_unique(deduped.kept.into_iter().map(|(_, record)| record).collect());
        tracing::debug!(
            "Assembled {} records from {} blocks ({} duplicates dropped)",
            table.len(),
            blocks.len(),
            deduped.dropped.len()
        );

        Ok(Extraction { table, outcomes })
    }

    /// Builds the record for one block, or reports why there is none.
    fn extract_block(&self, block: &AccountBlock) -> Result<Record, (Option<String>, SkipReason)> {
        let account_number = extract_account_number(block.text).ok_or((None, SkipReason::NoAccountMarker))?;

        let cpt_codes = extract_cpt_codes(block.text);
        if cpt_codes.is_empty() {
            return Err((Some(account_number), SkipReason::NoCptCodes));
        }

        Ok(Record {
            patient_name: extract_patient_name(block.text, &self.config.ignore_words),
            date_of_service: extract_date_of_service(block.text),
            account_number,
            cpt_codes,
        })
    }
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    const SAMPLE: &str = "\
GENESICARE BILLING REPORT
Page 1
Account: 1234 Visit
DOE JOHN 03/15/2024 99213 99214
PRIMARY INSURANCE
Account: 5001
SMITH JANE 04/01/2024
90000-3D 99213
Account: 7777
ROE RICHARD 05/05/2024
no procedures billed
Account: 5001
SMITH JANE 04/02/2024
99215
Account: 12345
Brown, Alice M. 06/07/2024 99212
";

    fn extract(text: &str) -> Extraction {
        RecordExtractor::new().extract(text).expect("extraction should succeed")
    }

    #[test]
    fn test_sample_document_table() {
        let extraction = extract(SAMPLE);
        let table = extraction.ensure_records().unwrap();

        let accounts: Vec<&str> = table.iter().map(|r| r.account_number.as_str()).collect();
        assert_eq!(accounts, vec!["1234", "5001", "12345"]);

        let first = table.get("1234").unwrap();
        assert_eq!(first.patient_name, "Doe John");
        assert_eq!(first.date_of_service, "03/15/2024");
        assert_eq!(first.cpt_codes_joined(), "99213, 99214");

        let five_digit = table.get("12345").unwrap();
        assert_eq!(five_digit.patient_name, "Brown, Alice M.");
        // The five-digit account number is itself CPT-shaped.
        assert_eq!(five_digit.cpt_codes_joined(), "12345, 99212");
    }

    #[test]
    fn test_block_outcomes_are_reported() {
        let extraction = extract(SAMPLE);
        let statuses: Vec<&BlockStatus> = extraction.outcomes.iter().map(|o| &o.status).collect();
        assert_eq!(
            statuses,
            vec![
                &BlockStatus::Skipped(SkipReason::NoAccountMarker),
                &BlockStatus::Accepted,
                &BlockStatus::Accepted,
                &BlockStatus::Skipped(SkipReason::NoCptCodes),
                &BlockStatus::DuplicateDropped,
                &BlockStatus::Accepted,
            ]
        );
        assert_eq!(extraction.block_count(), 6);
        assert_eq!(extraction.count(&BlockStatus::Accepted), 3);
        assert_eq!(extraction.dropped_duplicates(), vec!["5001"]);
        assert_eq!(extraction.outcomes[3].account_number.as_deref(), Some("7777"));
    }

    #[test]
    fn test_duplicate_account_keeps_first_block() {
        let table = extract(SAMPLE).table;
        let kept = table.get("5001").unwrap();
        assert_eq!(kept.cpt_codes_joined(), "90000-3D, 99213");
        assert_eq!(kept.date_of_service, "04/01/2024");
    }

    #[test]
    fn test_minimal_block() {
        let table = extract("Account: 1234\nDOE JOHN\n99213\n").table;
        assert_eq!(table.len(), 1);
        let record = table.iter().next().unwrap();
        assert_eq!(record.account_number, "1234");
        assert_eq!(record.patient_name, "Doe John");
        assert_eq!(record.date_of_service, "");
        assert_eq!(record.cpt_codes_joined(), "99213");
    }

    #[test]
    fn test_block_without_cpt_produces_nothing() {
        let extraction = extract("Account: 1234\nDOE JOHN 03/15/2024\n");
        assert!(extraction.table.is_empty());
        assert_eq!(extraction.ensure_records(), Err(ExtractError::EmptyResultSet { blocks: 1 }));
    }

    #[test]
    fn test_no_markers_is_empty_result_set() {
        let extraction = extract("DOE JOHN 99213 03/15/2024\n");
        assert!(extraction.table.is_empty());
        assert!(matches!(extraction.ensure_records(), Err(ExtractError::EmptyResultSet { .. })));
    }

    #[test]
    fn test_blank_text_is_no_text_extracted() {
        let extractor = RecordExtractor::new();
        assert_eq!(extractor.extract("").unwrap_err(), ExtractError::NoTextExtracted);
        assert_eq!(extractor.extract(" \n\t\n").unwrap_err(), ExtractError::NoTextExtracted);
    }

    #[test]
    fn test_configured_ignore_words_reach_name_extraction() {
        let config = ExtractorConfig {
            ignore_words: IgnoreList::new().with_extra(["RICHARD"]),
        };
        let table = RecordExtractor::with_config(config)
            .extract("Account: 1234\nROE RICHARD\n99213\n")
            .unwrap()
            .table;
        assert_eq!(table.get("1234").unwrap().patient_name, "");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = RecordExtractor::new();
        let first = extractor.extract(SAMPLE).unwrap().table;
        let second = extractor.extract(SAMPLE).unwrap().table;
        assert_eq!(first, second);
    }

    #[test]
    fn test_table_invariants_hold() {
        let account_re = Regex::new(r"^\d{4,5}$").unwrap();
        let cpt_re = Regex::new(r"^\d{5}(-[A-Za-z0-9]{2})?$").unwrap();
        let table = extract(SAMPLE).table;

        let mut seen = HashSet::new();
        for record in &table {
            assert!(account_re.is_match(&record.account_number), "bad account {}", record.account_number);
            assert!(seen.insert(record.account_number.clone()), "duplicate account {}", record.account_number);

            let joined = record.cpt_codes_joined();
            let codes: Vec<&str> = joined.split(", ").collect();
            assert!(!codes.is_empty());
            assert!(codes.iter().all(|c| cpt_re.is_match(c)), "bad codes {:?}", codes);
            assert!(codes.windows(2).all(|w| w[0] < w[1]), "codes not strictly ascending: {:?}", codes);
        }
    }

    #[test]
    fn test_dedup_keep_first_preserves_order() {
        let items = vec![("a", 1), ("b", 2), ("a", 3), ("c", 4), ("b", 5)];
        let result = dedup_keep_first(items, |(key, _)| *key);
        assert_eq!(result.kept, vec![("a", 1), ("b", 2), ("c", 4)]);
        assert_eq!(result.dropped, vec![("a", 3), ("b", 5)]);
    }
}

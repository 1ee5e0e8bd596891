// src/extractors/record.rs
use crate::extractors::fields::join_cpt_codes;
use serde::{Serialize, Serializer};

/// Name of the exported table (the sheet name in spreadsheet terms).
pub const TABLE_NAME: &str = "Extracted";

/// Column headers, in output order.
pub const COLUMNS: [&str; 4] = ["Account Number", "Patient Name", "Date of Service", "CPT Codes"];

/// One billable account extracted from the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(rename = "Account Number")]
    pub account_number: String,
    #[serde(rename = "Patient Name")]
    pub patient_name: String,
    #[serde(rename = "Date of Service")]
    pub date_of_service: String,
    /// Distinct, ascending. Never empty for a record in a table.
    #[serde(rename = "CPT Codes", serialize_with = "serialize_cpt_codes")]
    pub cpt_codes: Vec<String>,
}

impl Record {
    /// CPT codes as a single comma-joined cell.
    pub fn cpt_codes_joined(&self) -> String {
        join_cpt_codes(&self.cpt_codes)
    }

    /// Cell values in column order.
    pub fn cells(&self) -> [String; 4] {
        [
            self.account_number.clone(),
            self.patient_name.clone(),
            self.date_of_service.clone(),
            self.cpt_codes_joined(),
        ]
    }
}

fn serialize_cpt_codes<S: Serializer>(codes: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&join_cpt_codes(codes))
}

/// Records in first-seen order of their account numbers, one per account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordTable {
    records: Vec<Record>,
}

impl RecordTable {
    pub(crate) fn from_unique(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn get(&self, account_number: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.account_number == account_number)
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

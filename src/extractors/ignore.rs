// src/extractors/ignore.rs
use std::collections::BTreeSet;

/// Administrative and boilerplate words that never belong to a patient name.
/// Compared against whitespace-separated tokens exactly as they appear (tier 1)
/// or upper-cased (tier 2), so punctuation attached to a token defeats a match.
pub const DEFAULT_IGNORE_WORDS: &[&str] = &[
    "SECONDARY",
    "PRIMARY",
    "DOL",
    "PAY",
    "INSURANCE",
    "PPO",
    "PLAN",
    "TOTALS",
    "BALANCE",
    "OVERPD",
    "GENESISC",
    "GENESICARE",
    "FLORIDA",
    "USA",
    "NOT",
    "USE",
    "BCBS",
    "FBU",
];

/// The single set of words excluded from name candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreList {
    words: BTreeSet<String>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self {
            words: DEFAULT_IGNORE_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Extends the defaults. Extra words are trimmed and upper-cased; blanks are dropped.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in extra {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                self.words.insert(word.to_uppercase());
            }
        }
        self
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self::new()
    }
}

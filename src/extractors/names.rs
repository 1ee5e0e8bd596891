// src/extractors/names.rs
use crate::extractors::ignore::IgnoreList;
use once_cell::sync::Lazy;
use regex::Regex;

// Tier 1: runs of upper-case letters and name punctuation, e.g. "CORBITT III, MORRIS E".
static UPPERCASE_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z ,.'\-]{3,}\b").expect("Failed to compile UPPERCASE_RUN_RE")
});

// Tier 2: mixed-case "Last, First M." e.g. "Smith, John J.".
static LAST_FIRST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Z][a-z]+(?: [A-Z][a-z]+)*, [A-Z][a-z]+(?: [A-Z]\.?)?")
        .expect("Failed to compile LAST_FIRST_RE")
});

/// Best-effort patient name for a block, or an empty string.
///
/// Upper-case runs win over mixed-case "Last, First" matches whenever at least
/// one upper-case candidate survives the ignore-list.
pub fn extract_patient_name(block: &str, ignore: &IgnoreList) -> String {
    if let Some(name) = uppercase_candidate(block, ignore) {
        return title_case(name);
    }

    if let Some(name) = last_first_candidate(block, ignore) {
        return name.trim().to_string();
    }

    String::new()
}

fn uppercase_candidate<'a>(block: &'a str, ignore: &IgnoreList) -> Option<&'a str> {
    let candidates = UPPERCASE_RUN_RE
        .find_iter(block)
        .map(|m| m.as_str().trim())
        .filter(|run| {
            let tokens: Vec<&str> = run.split_whitespace().collect();
            tokens.len() >= 2 && !tokens.iter().any(|token| ignore.contains(token))
        });

    longest(candidates)
}

fn last_first_candidate<'a>(block: &'a str, ignore: &IgnoreList) -> Option<&'a str> {
    let candidates = LAST_FIRST_RE
        .find_iter(block)
        .map(|m| m.as_str())
        .filter(|m| !m.split_whitespace().any(|w| ignore.contains(&w.to_uppercase())));

    longest(candidates)
}

/// Longest candidate by character count; the earliest one wins a tie.
fn longest<'a>(candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut best: Option<&str> = None;
    for candidate in candidates {
        match best {
            Some(current) if current.chars().count() >= candidate.chars().count() => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Upper-cases a letter that follows a non-letter and lower-cases every other
/// letter, so "O'NEIL, MARY-ANN" becomes "O'Neil, Mary-Ann".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

// src/extractors/segment.rs
use once_cell::sync::Lazy;
use regex::Regex;

// Boundary only needs four digits; a fifth digit stays inside the block.
static BLOCK_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Account:\s*\d{4}").expect("Failed to compile BLOCK_BOUNDARY_RE")
});

/// A slice of the document text that belongs to a single account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountBlock<'a> {
    /// Position among the non-blank blocks, in document order.
    pub index: usize,
    /// Byte offset of the block within the document text.
    pub offset: usize,
    pub text: &'a str,
}

/// Splits `text` in front of every account marker, keeping the marker at the
/// head of the block it opens. The preamble before the first marker is kept
/// as a block; whitespace-only blocks are dropped.
pub fn split_blocks(text: &str) -> Vec<AccountBlock<'_>> {
    let mut cuts: Vec<usize> = BLOCK_BOUNDARY_RE.find_iter(text).map(|m| m.start()).collect();
    cuts.push(text.len());

    let mut blocks = Vec::with_capacity(cuts.len());
    let mut start = 0;
    for end in cuts {
        let slice = &text[start..end];
        if !slice.trim().is_empty() {
            blocks.push(AccountBlock {
                index: blocks.len(),
                offset: start,
                text: slice,
            });
        }
        start = end;
    }

    tracing::debug!("Segmented {} bytes of text into {} blocks", text.len(), blocks.len());
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_starts_each_block() {
        let text = "Report header\nAccount: 1001\nDOE JOHN\nAccount: 1002\nROE JANE\n";
        let blocks = split_blocks(text);

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].text, "Report header\n");
        assert!(blocks[1].text.starts_with("Account: 1001"));
        assert!(blocks[2].text.starts_with("Account: 1002"));
        assert_eq!(blocks[2].offset, text.find("Account: 1002").unwrap());
        assert_eq!(blocks.iter().map(|b| b.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_blocks_cover_the_whole_text() {
        let text = "intro\nAccount: 1001 a\nAccount:12345 b\n";
        let joined: String = split_blocks(text).iter().map(|b| b.text).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_five_digit_account_stays_intact() {
        let blocks = split_blocks("Account: 12345\n99213\n");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].text.starts_with("Account: 12345"));
    }

    #[test]
    fn test_short_numbers_do_not_split() {
        let blocks = split_blocks("Account: 1001\nsee Account: 12 for details\n");
        assert_eq!(blocks.len(), 1, "a three-digit reference is not a boundary");
    }

    #[test]
    fn test_whitespace_blocks_are_dropped() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks("   \n\t").is_empty());

        let blocks = split_blocks("\n\nAccount: 1001 x");
        assert_eq!(blocks.len(), 1, "blank preamble should not survive");
        assert_eq!(blocks[0].offset, 2);
    }

    #[test]
    fn test_no_marker_yields_single_block() {
        let blocks = split_blocks("nothing to see here");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "nothing to see here");
    }
}

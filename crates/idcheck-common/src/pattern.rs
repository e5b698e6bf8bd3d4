//! The PAN identifier pattern and normalization rules.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::PAN_PATTERN;

static PAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(PAN_PATTERN).expect("PAN pattern is valid"));

/// Find the first (leftmost) PAN-shaped substring in `text`.
///
/// Matching is case-sensitive; only upper-case runs count.
pub fn find_identifier(text: &str) -> Option<&str> {
    PAN_RE.find(text).map(|m| m.as_str())
}

/// Normalize an identifier for comparison: trim surrounding whitespace and upper-case.
pub fn normalize_identifier(value: &str) -> String {
    value.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_identifier_in_card_text() {
        let text = "INCOME TAX DEPARTMENT\nName: John\nPAN: ABCDE1234F Date: 2020";
        assert_eq!(find_identifier(text), Some("ABCDE1234F"));
    }

    #[test]
    fn test_find_identifier_returns_first_match() {
        let text = "ZZZZZ0000Z then ABCDE1234F";
        assert_eq!(find_identifier(text), Some("ZZZZZ0000Z"));
    }

    #[test]
    fn test_find_identifier_inside_longer_run() {
        // No word boundaries: the pattern may start mid-token
        assert_eq!(find_identifier("XABCDE1234FY"), Some("ABCDE1234F"));
    }

    #[test]
    fn test_find_identifier_rejects_near_misses() {
        assert_eq!(find_identifier("blank receipt, no identifiers"), None);
        assert_eq!(find_identifier("abcde1234f"), None);
        assert_eq!(find_identifier("ABCD1234F"), None);
        assert_eq!(find_identifier("ABCDE123F"), None);
        assert_eq!(find_identifier("ABCDE12345"), None);
        assert_eq!(find_identifier(""), None);
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("  abcde1234f\n"), "ABCDE1234F");
        assert_eq!(normalize_identifier("ABCDE1234F"), "ABCDE1234F");
    }
}

//! Question normalization.
//!
//! Lowercases the question, drops every character that is neither a word
//! character nor whitespace, and rejoins the remaining tokens with single
//! spaces. Punctuation-only tokens vanish, and hyphenated words are glued
//! together ("well-known" becomes "wellknown").

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything that is not a (Unicode) word character or whitespace.
    static ref NON_WORD_PATTERN: Regex = Regex::new(r"[^\w\s]").unwrap();
}

/// Normalize a raw question.
///
/// Total and idempotent. Empty or whitespace-only input yields an empty string.
pub fn normalize(question: &str) -> String {
    let lowered = question.to_lowercase();
    let stripped = NON_WORD_PATTERN.replace_all(&lowered, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_case_and_punctuation_insensitive() {
        assert_eq!(normalize("Hello, World!"), "hello world");
        assert_eq!(normalize("HELLO world"), normalize("hello, world."));
    }

    #[test]
    fn test_capital_of_france() {
        assert_eq!(
            normalize("What is the Capital of France?"),
            "what is the capital of france"
        );
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize("  many\t\tspaces \n here  "), "many spaces here");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
        assert_eq!(normalize("?!... --"), "");
    }

    #[test]
    fn test_hyphens_and_apostrophes_removed() {
        assert_eq!(normalize("A well-known fact"), "a wellknown fact");
        assert_eq!(normalize("What's up"), "whats up");
    }

    #[test]
    fn test_underscores_and_digits_kept() {
        assert_eq!(normalize("snake_case 42 times"), "snake_case 42 times");
    }

    #[test]
    fn test_unicode_letters_kept() {
        assert_eq!(normalize("Où est la Gare?"), "où est la gare");
    }

    proptest! {
        #[test]
        fn prop_idempotent(input in "[A-Za-z0-9À-ÿ _,.;:!?'\"()\\-\t\n]{0,80}") {
            let once = normalize(&input);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_no_punctuation_or_extra_spaces(input in "[A-Za-z0-9 ,.!?'\\-]{0,80}") {
            let out = normalize(&input);
            prop_assert!(!out.starts_with(' '));
            prop_assert!(!out.ends_with(' '));
            prop_assert!(!out.contains("  "));
            prop_assert!(out.chars().all(|c| c.is_alphanumeric() || c == ' '));
            prop_assert_eq!(out.to_lowercase(), out.clone());
        }
    }
}

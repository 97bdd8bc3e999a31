//! Word/punctuation/whitespace tokenizer used as the comparison unit for diffing.
//!
//! Comparing at token granularity (instead of characters) keeps prompt diffs readable: a changed
//! word shows up as one deleted token and one inserted token.

use regex::Regex;
use std::sync::LazyLock;

/// Delimiters: a whitespace run, or a single character out of `. , ; ? ! ( ) [ ] { }`.
static DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+|[.,;?!()\[\]{}]").expect("delimiter pattern is valid"));

/// Split `text` into tokens, keeping delimiters as their own tokens.
///
/// Tokens are borrowed slices of `text`, in document order; empty tokens are never produced, so
/// concatenating the result always gives back `text`.
///
/// ```
/// use review_core::tokenize;
///
/// assert_eq!(tokenize("Hello, world!"), vec!["Hello", ",", " ", "world", "!"]);
/// ```
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for m in DELIMITER.find_iter(text) {
        if m.start() > last {
            tokens.push(&text[last..m.start()]);
        }
        tokens.push(m.as_str());
        last = m.end();
    }

    if last < text.len() {
        tokens.push(&text[last..]);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_sentence() {
        assert_eq!(
            tokenize("Hello, world!"),
            vec!["Hello", ",", " ", "world", "!"]
        );
    }

    #[test]
    fn test_whitespace_runs_are_single_tokens() {
        assert_eq!(tokenize("a  \n\tb"), vec!["a", "  \n\t", "b"]);
    }

    #[test]
    fn test_adjacent_punctuation_is_split() {
        assert_eq!(tokenize("(x)."), vec!["(", "x", ")", "."]);
        assert_eq!(tokenize("{[]}"), vec!["{", "[", "]", "}"]);
    }

    #[test]
    fn test_other_symbols_stay_inside_words() {
        assert_eq!(tokenize("don't re-use a:b"), vec!["don't", " ", "re-use", " ", "a:b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_non_ascii_words() {
        assert_eq!(tokenize("café, 日本"), vec!["café", ",", " ", "日本"]);
    }
}

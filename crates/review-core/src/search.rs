//! Literal quote search.
//!
//! Quotes supplied by an analysis collaborator are arbitrary text, so they are always escaped
//! before being compiled into a regex: `"(a)"` matches the five characters `(a)`, never a group.
//! All inputs/outputs use **character offsets** (not byte offsets).

use crate::range::{CharIndex, TextRange};
use regex::{Regex, RegexBuilder};

/// Search errors.
#[derive(Debug)]
pub enum SearchError {
    /// The escaped quote failed to compile (in practice: it exceeded the regex size limit).
    InvalidPattern(regex::Error),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern(err) => write!(f, "Invalid quote pattern: {}", err),
        }
    }
}

impl std::error::Error for SearchError {}

fn compile_literal(query: &str) -> Result<Regex, SearchError> {
    RegexBuilder::new(&regex::escape(query))
        .build()
        .map_err(SearchError::InvalidPattern)
}

/// Find every non-overlapping occurrence of `query` in `text`, left to right.
///
/// After each match the scan resumes at the match end. Returns an empty list if `query` is empty.
pub fn find_all(text: &str, query: &str) -> Result<Vec<TextRange>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let re = compile_literal(query)?;
    let index = CharIndex::new(text);

    Ok(re
        .find_iter(text)
        .map(|m| TextRange::new(index.byte_to_char(m.start()), index.byte_to_char(m.end())))
        .filter(|range| !range.is_empty())
        .collect())
}

/// Find the first occurrence of `query` in `text`.
///
/// Returns `Ok(None)` if there is no match (or if `query` is empty).
pub fn find_first(text: &str, query: &str) -> Result<Option<TextRange>, SearchError> {
    if query.is_empty() {
        return Ok(None);
    }

    let re = compile_literal(query)?;
    let Some(m) = re.find(text) else {
        return Ok(None);
    };

    let index = CharIndex::new(text);
    Ok(Some(TextRange::new(
        index.byte_to_char(m.start()),
        index.byte_to_char(m.end()),
    )))
}

//! Applying a suggested replacement to a document.
//!
//! A fix replaces the **first** literal occurrence of a quote. Later occurrences of the same
//! quote are left untouched.

use crate::analysis::AnalysisResult;
use crate::error::ReviewError;
use crate::range::{CharIndex, TextRange};
use crate::search;
use serde::Serialize;

/// The single edit a fix makes, expressed in character offsets of the pre-fix document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixEdit {
    /// Start character offset of the replaced quote.
    pub start: usize,
    /// Exact deleted text (the quote).
    pub deleted_text: String,
    /// Exact inserted text (the replacement).
    pub inserted_text: String,
}

impl FixEdit {
    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Exclusive end character offset in the pre-fix document.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len())
    }

    /// Range of the inserted text in the post-fix document.
    pub fn inserted_range(&self) -> TextRange {
        TextRange::new(self.start, self.start + self.inserted_len())
    }
}

/// Describe the edit `apply_fix` would make, or `None` if `quote` is empty or absent.
pub fn locate_fix(document: &str, quote: &str, replacement: &str) -> Option<FixEdit> {
    let range = match search::find_first(document, quote) {
        Ok(range) => range?,
        Err(err) => {
            tracing::warn!(error = %err, "cannot search for fix quote");
            return None;
        }
    };

    Some(FixEdit {
        start: range.start,
        deleted_text: quote.to_string(),
        inserted_text: replacement.to_string(),
    })
}

/// Replace the first literal occurrence of `quote` in `document` with `replacement`.
///
/// Returns `document` unchanged when `quote` is empty or does not occur. An empty quote is
/// treated as absent on purpose: a plain string replace would insert `replacement` at offset 0.
///
/// ```
/// use review_core::apply_fix;
///
/// assert_eq!(apply_fix("a b a", "a", "c"), "c b a");
/// assert_eq!(apply_fix("a b a", "z", "c"), "a b a");
/// assert_eq!(apply_fix("a b a", "", "c"), "a b a");
/// ```
pub fn apply_fix(document: &str, quote: &str, replacement: &str) -> String {
    match locate_fix(document, quote, replacement) {
        Some(edit) => splice(document, &edit),
        None => {
            tracing::debug!("fix quote not found; document unchanged");
            document.to_string()
        }
    }
}

fn splice(document: &str, edit: &FixEdit) -> String {
    let index = CharIndex::new(document);
    let start = index.char_to_byte(edit.start);
    let end = index.char_to_byte(edit.end());

    let mut out = String::with_capacity(document.len() - (end - start) + edit.inserted_text.len());
    out.push_str(&document[..start]);
    out.push_str(&edit.inserted_text);
    out.push_str(&document[end..]);
    out
}

/// Outcome of accepting an issue's reference fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedFix {
    /// The document after the fix.
    pub document: String,
    /// The edit that was made, or `None` if the quote no longer occurs.
    pub edit: Option<FixEdit>,
    /// Number of findings removed from the analysis result.
    pub removed_issues: usize,
}

/// Accept the reference fix of issue `issue_id`.
///
/// Applies the fix to `document` and drops every finding in `result` that quotes the replaced
/// text, whether or not the quote was still present.
pub fn apply_issue_fix(
    result: &mut AnalysisResult,
    document: &str,
    issue_id: &str,
) -> Result<AppliedFix, ReviewError> {
    let issue = result.issue(issue_id)?;
    let replacement = issue
        .reference_fix
        .ok_or_else(|| ReviewError::NoReplacement(issue_id.to_string()))?;

    let edit = locate_fix(document, &issue.quote, &replacement);
    let document = match &edit {
        Some(edit) => splice(document, edit),
        None => document.to_string(),
    };
    let removed_issues = result.remove_issues_quoting(&issue.quote);

    tracing::debug!(
        issue = issue_id,
        applied = edit.is_some(),
        removed_issues,
        "accepted reference fix"
    );

    Ok(AppliedFix {
        document,
        edit,
        removed_issues,
    })
}

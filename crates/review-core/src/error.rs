//! Error type for payload decoding, input validation and issue lookups.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced at the edges of `review-core`: input validation and payload decoding.
///
/// The diff, annotation and fix algorithms themselves are total and never return these.
pub enum ReviewError {
    #[error("missing required input: {field}")]
    /// A required input field was empty or whitespace only.
    MissingInput {
        /// Name of the missing field.
        field: &'static str,
    },

    #[error("invalid analysis payload: {0}")]
    /// The analysis payload was not valid JSON for the expected shape.
    InvalidPayload(#[from] serde_json::Error),

    #[error("{field} must be within 0..=100, got {value}")]
    /// A score field was outside the `0..=100` range.
    ScoreOutOfRange {
        /// Name of the score field.
        field: &'static str,
        /// The offending value.
        value: i64,
    },

    #[error("unknown issue id '{0}'")]
    /// No issue with the given id exists in the analysis result.
    UnknownIssue(String),

    #[error("issue '{0}' has no suggested replacement")]
    /// The issue exists but carries no reference fix to apply.
    NoReplacement(String),

    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),
}

//! Reviewer-facing issue records.
//!
//! An [`Issue`] is the flattened, read-only view of one finding from an analysis payload. It is
//! what the annotation matcher consumes: an id to jump to, a category for highlighting, and the
//! literal quote to locate in a document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which document an issue quotes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSource {
    /// The generated output text.
    #[default]
    Output,
    /// The reasoning trace that produced the output.
    Reasoning,
}

impl fmt::Display for IssueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output => f.write_str("output"),
            Self::Reasoning => f.write_str("reasoning"),
        }
    }
}

/// Coarse issue category, used for highlight styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCategory {
    /// Factual problem (fabrication, contradiction, ...).
    Fact,
    /// Deviation from the prompt's strategy.
    Strategy,
    /// Compliance or risk finding.
    Compliance,
}

impl IssueCategory {
    /// Prefix used when generating issue ids (`fact-0`, `strat-0`, `comp-0`).
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Fact => "fact",
            Self::Strategy => "strat",
            Self::Compliance => "comp",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fact => f.write_str("Fact"),
            Self::Strategy => f.write_str("Strategy"),
            Self::Compliance => f.write_str("Compliance"),
        }
    }
}

/// A single finding anchored to a literal quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Stable id within one analysis result.
    pub id: String,
    /// Highlight category.
    pub category: IssueCategory,
    /// Literal text expected to appear in the source document.
    pub quote: String,
    /// Document the quote comes from.
    pub source: IssueSource,
    /// Why this is a problem.
    pub reason: String,
    /// What to do about it.
    pub suggestion: String,
    /// Replacement text for `quote`, when the finding carries one.
    pub reference_fix: Option<String>,
    /// The violated strategy rule (strategy issues only).
    pub rule: Option<String>,
    /// Finer-grained type tag (e.g. `Fabrication`, `Risk`).
    pub sub_type: Option<String>,
}

impl Issue {
    /// Create an issue with empty diagnostic text, quoting the output document.
    pub fn new(id: impl Into<String>, category: IssueCategory, quote: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category,
            quote: quote.into(),
            source: IssueSource::Output,
            reason: String::new(),
            suggestion: String::new(),
            reference_fix: None,
            rule: None,
            sub_type: None,
        }
    }

    /// Set the source document.
    pub fn with_source(mut self, source: IssueSource) -> Self {
        self.source = source;
        self
    }

    /// Set the reason and suggestion text.
    pub fn with_details(mut self, reason: impl Into<String>, suggestion: impl Into<String>) -> Self {
        self.reason = reason.into();
        self.suggestion = suggestion.into();
        self
    }

    /// Set the reference fix.
    pub fn with_reference_fix(mut self, replacement: impl Into<String>) -> Self {
        self.reference_fix = Some(replacement.into());
        self
    }
}

/// Issues quoting `source`, in their original order.
pub fn issues_for_source(issues: &[Issue], source: IssueSource) -> Vec<&Issue> {
    issues.iter().filter(|issue| issue.source == source).collect()
}

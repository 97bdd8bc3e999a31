#![warn(missing_docs)]
//! Review Core - Headless Diff and Annotation Kernel for Output Review
//!
//! # Overview
//!
//! `review-core` holds the reusable logic behind a reviewer's workspace for generated text.
//! It does not render anything: a host (UI, terminal, web view) asks the core for pure data and
//! decides how to draw it. Two relationships are computed:
//!
//! - a **token-level diff** between an original prompt and an edited, optimized prompt
//! - an **annotation overlay** mapping issue quotes onto their occurrences in a document, so a
//!   reviewer can click a highlighted span and jump to the issue
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Analysis payload (serde) & Input checks    │  ← Collaborator boundary
//! ├─────────────────────────────────────────────┤
//! │  Issue records (flattened, read-only)       │  ← Annotation input
//! ├──────────────────────┬──────────────────────┤
//! │  Diff engine         │  Annotation matcher  │  ← Pure algorithms
//! ├──────────────────────┼──────────────────────┤
//! │  Tokenizer           │  Literal search      │
//! ├──────────────────────┴──────────────────────┤
//! │  Character ranges                           │  ← Shared span model
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Diffing a prompt revision
//!
//! ```rust
//! use review_core::{diff, DiffKind};
//!
//! let result = diff("Write a short story.", "Write a very short story.");
//! let inserted: String = result
//!     .parts()
//!     .iter()
//!     .filter(|p| p.kind == DiffKind::Inserted)
//!     .map(|p| p.text.as_ref())
//!     .collect();
//! assert_eq!(inserted, "very ");
//! ```
//!
//! ## Annotating a document
//!
//! ```rust
//! use review_core::{annotate, AnalysisResult, IssueSource, issues_for_source};
//!
//! let payload = r#"{
//!     "score": 72,
//!     "summary": "One fabricated claim.",
//!     "rootCause": "The prompt does not pin the launch date.",
//!     "issues": [{
//!         "quote": "launched in 2019",
//!         "source": "output",
//!         "type": "Fabrication",
//!         "reason": "The facts say 2021.",
//!         "suggestion": "Use the documented date.",
//!         "replacement": "launched in 2021"
//!     }]
//! }"#;
//!
//! let result = AnalysisResult::from_json(payload).unwrap();
//! let issues = result.unified_issues();
//! let document = "The product launched in 2019 to great acclaim.";
//!
//! let segments = annotate(document, issues_for_source(&issues, IssueSource::Output));
//! assert_eq!(segments.len(), 3);
//! assert_eq!(segments[1].text, "launched in 2019");
//! ```
//!
//! # Module Description
//!
//! - [`tokenizer`] - word / punctuation / whitespace tokens
//! - [`diff`] - bounded-lookahead token diff
//! - [`search`] - literal quote search in character offsets
//! - [`annotate`] - quote-to-span matching and segment linearization
//! - [`fix`] - single-occurrence fix application
//! - [`analysis`] - analysis payload data model
//! - [`issue`] - flattened issue records
//! - [`input`] - review input validation
//! - [`score`] - score bands
//! - [`config`] - host configuration
//!
//! # Offsets
//!
//! Every public offset is a **character offset** (Unicode scalar value), never a byte offset.
//! All algorithms are synchronous and pure; they allocate fresh output per call and are safe to
//! call from any number of threads.

pub mod analysis;
pub mod annotate;
pub mod config;
pub mod diff;
pub mod error;
pub mod fix;
pub mod input;
pub mod issue;
pub mod range;
pub mod score;
pub mod search;
pub mod tokenizer;

pub use analysis::{
    AnalysisResult, ComplianceIssue, ComplianceType, FactIssue, FactIssueType,
    OptimizationResult, Severity, StrategyIssue, StrategyReport,
};
pub use annotate::{AnnotatedSegment, Match, annotate, find_matches, match_at};
pub use config::ReviewConfig;
pub use diff::{
    DEFAULT_LOOKAHEAD, DiffKind, DiffOptions, DiffPart, DiffStats, TextDiff, diff,
    diff_with_options,
};
pub use error::ReviewError;
pub use fix::{AppliedFix, FixEdit, apply_fix, apply_issue_fix, locate_fix};
pub use input::{AnalysisInput, Language};
pub use issue::{Issue, IssueCategory, IssueSource, issues_for_source};
pub use range::TextRange;
pub use score::{AdherenceBand, ReliabilityBand};
pub use search::SearchError;
pub use tokenizer::tokenize;

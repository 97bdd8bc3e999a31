//! Analysis payload data model.
//!
//! The analysis service is an external collaborator: it receives the facts, prompt, reasoning
//! trace and output, and answers with JSON shaped like [`AnalysisResult`]. It answers in two
//! phases. The audit arrives first and is displayed immediately; the prompt optimization arrives
//! later as an [`OptimizationResult`] and is merged into the same result with
//! [`AnalysisResult::merge_optimization`].
//!
//! Field names follow the service's camelCase JSON.

use crate::error::ReviewError;
use crate::issue::{Issue, IssueCategory, IssueSource};
use serde::{Deserialize, Serialize};

/// Kind of a factual issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactIssueType {
    /// Content not supported by the facts.
    Fabrication,
    /// Content that contradicts the facts.
    Contradiction,
    /// A required fact was left out.
    Omission,
    /// The reasoning trace does not support its conclusion.
    #[serde(rename = "Reasoning Error")]
    ReasoningError,
    /// Anything else, including types this crate does not know about.
    #[serde(other)]
    Other,
}

impl FactIssueType {
    /// The label used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fabrication => "Fabrication",
            Self::Contradiction => "Contradiction",
            Self::Omission => "Omission",
            Self::ReasoningError => "Reasoning Error",
            Self::Other => "Other",
        }
    }
}

/// Kind of a compliance issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceType {
    /// Advertising law violation.
    #[serde(rename = "Ad Law Violation")]
    AdLawViolation,
    /// General risk.
    Risk,
    /// Ethical concern.
    #[serde(rename = "Ethical Concern")]
    EthicalConcern,
    /// The output breaks the prompt's strategy.
    #[serde(rename = "Strategy Violation")]
    StrategyViolation,
    /// A type this crate does not know about.
    #[serde(other)]
    Other,
}

impl ComplianceType {
    /// The label used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AdLawViolation => "Ad Law Violation",
            Self::Risk => "Risk",
            Self::EthicalConcern => "Ethical Concern",
            Self::StrategyViolation => "Strategy Violation",
            Self::Other => "Other",
        }
    }
}

/// Severity of a compliance issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Low severity.
    Low,
    /// Medium severity.
    Medium,
    /// High severity.
    High,
}

/// A factual finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactIssue {
    /// Literal quote from the source document.
    pub quote: String,
    /// Document the quote comes from.
    #[serde(default)]
    pub source: IssueSource,
    /// Issue type.
    #[serde(rename = "type")]
    pub issue_type: FactIssueType,
    /// Why this is a problem.
    pub reason: String,
    /// What to do about it.
    pub suggestion: String,
    /// Replacement text for `quote`.
    #[serde(default)]
    pub replacement: String,
}

/// A compliance finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceIssue {
    /// Literal quote from the source document.
    pub quote: String,
    /// Document the quote comes from.
    #[serde(default)]
    pub source: IssueSource,
    /// Issue type.
    #[serde(rename = "type")]
    pub issue_type: ComplianceType,
    /// Severity.
    pub severity: Severity,
    /// Why this is a problem.
    pub reason: String,
    /// What to do about it.
    pub suggestion: String,
}

/// A strategy adherence finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyIssue {
    /// The violated rule.
    pub rule: String,
    /// Literal quote from the source document.
    pub quote: String,
    /// Document the quote comes from.
    #[serde(default)]
    pub source: IssueSource,
    /// How the rule was violated.
    pub violation: String,
    /// How the prompt could prevent it.
    pub prompt_improvement: String,
}

/// How well the output follows the prompt's overall strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyReport {
    /// The strategy inferred from the prompt.
    pub meta_strategy: String,
    /// Adherence score, `0..=100`.
    pub adherence_score: i64,
    /// Individual deviations.
    #[serde(default)]
    pub issues: Vec<StrategyIssue>,
}

/// Result of the second, slower optimization call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    /// Rewritten prompt.
    pub optimized_prompt: String,
    /// Human-readable improvement suggestions.
    #[serde(default)]
    pub prompt_suggestions: Vec<String>,
}

/// Full analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Whether any hallucination was detected.
    #[serde(default)]
    pub has_hallucination: bool,
    /// Reliability score, `0..=100`.
    pub score: i64,
    /// Free-text summary.
    pub summary: String,
    /// Root-cause diagnosis.
    pub root_cause: String,
    /// Strategy adherence report.
    #[serde(default)]
    pub strategy_report: StrategyReport,
    /// Factual issues.
    #[serde(default)]
    pub issues: Vec<FactIssue>,
    /// Compliance issues.
    #[serde(default)]
    pub compliance_issues: Vec<ComplianceIssue>,
    /// Improvement suggestions, once the optimization phase has completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_suggestions: Option<Vec<String>>,
    /// Optimized prompt, once the optimization phase has completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimized_prompt: Option<String>,
}

fn check_score(field: &'static str, value: i64) -> Result<(), ReviewError> {
    if (0..=100).contains(&value) {
        Ok(())
    } else {
        Err(ReviewError::ScoreOutOfRange { field, value })
    }
}

impl AnalysisResult {
    /// Parse and validate a JSON payload.
    pub fn from_json(json: &str) -> Result<Self, ReviewError> {
        let result: Self = serde_json::from_str(json)?;
        result.validate()?;
        Ok(result)
    }

    /// Check that both scores are within `0..=100`.
    pub fn validate(&self) -> Result<(), ReviewError> {
        check_score("score", self.score)?;
        check_score("adherenceScore", self.strategy_report.adherence_score)
    }

    /// Returns `true` once the optimization phase has been merged.
    pub fn is_optimized(&self) -> bool {
        self.optimized_prompt.is_some()
    }

    /// Merge the result of the optimization phase into this result.
    ///
    /// A markdown code fence wrapped around the optimized prompt is removed first, so fence lines
    /// never show up as inserted tokens in a prompt diff.
    pub fn merge_optimization(&mut self, optimization: OptimizationResult) {
        self.optimized_prompt = Some(strip_code_fence(&optimization.optimized_prompt));
        self.prompt_suggestions = Some(optimization.prompt_suggestions);
    }

    /// Flatten all findings into [`Issue`]s: fact issues, then strategy, then compliance.
    ///
    /// Ids are `fact-{n}`, `strat-{n}` and `comp-{n}`, numbered per list.
    pub fn unified_issues(&self) -> Vec<Issue> {
        let facts = self.issues.iter().enumerate().map(|(idx, i)| Issue {
            id: issue_id(IssueCategory::Fact, idx),
            category: IssueCategory::Fact,
            quote: i.quote.clone(),
            source: i.source,
            reason: i.reason.clone(),
            suggestion: i.suggestion.clone(),
            reference_fix: Some(i.replacement.clone()).filter(|r| !r.is_empty()),
            rule: None,
            sub_type: Some(i.issue_type.as_str().to_string()),
        });

        let strategy = self
            .strategy_report
            .issues
            .iter()
            .enumerate()
            .map(|(idx, i)| Issue {
                id: issue_id(IssueCategory::Strategy, idx),
                category: IssueCategory::Strategy,
                quote: i.quote.clone(),
                source: i.source,
                reason: i.violation.clone(),
                suggestion: i.prompt_improvement.clone(),
                reference_fix: None,
                rule: Some(i.rule.clone()),
                sub_type: Some("Adherence".to_string()),
            });

        let compliance = self.compliance_issues.iter().enumerate().map(|(idx, i)| Issue {
            id: issue_id(IssueCategory::Compliance, idx),
            category: IssueCategory::Compliance,
            quote: i.quote.clone(),
            source: i.source,
            reason: i.reason.clone(),
            suggestion: i.suggestion.clone(),
            reference_fix: None,
            rule: None,
            sub_type: Some(i.issue_type.as_str().to_string()),
        });

        facts.chain(strategy).chain(compliance).collect()
    }

    /// Find a unified issue by id.
    pub fn issue(&self, id: &str) -> Result<Issue, ReviewError> {
        self.unified_issues()
            .into_iter()
            .find(|issue| issue.id == id)
            .ok_or_else(|| ReviewError::UnknownIssue(id.to_string()))
    }

    /// Remove every finding whose quote is exactly `quote`; returns how many were removed.
    ///
    /// Called after a fix replaced `quote`, since those findings no longer point at anything.
    pub fn remove_issues_quoting(&mut self, quote: &str) -> usize {
        let before = self.issue_count();
        self.issues.retain(|i| i.quote != quote);
        self.strategy_report.issues.retain(|i| i.quote != quote);
        self.compliance_issues.retain(|i| i.quote != quote);
        before - self.issue_count()
    }

    /// Total number of findings across all lists.
    pub fn issue_count(&self) -> usize {
        self.issues.len() + self.strategy_report.issues.len() + self.compliance_issues.len()
    }
}

fn issue_id(category: IssueCategory, idx: usize) -> String {
    format!("{}-{}", category.id_prefix(), idx)
}

/// Drop an opening fence (three backticks, optionally tagged `markdown` or `text`) and a closing
/// fence, then trim. Text that does not start with a fence is returned as is.
fn strip_code_fence(prompt: &str) -> String {
    let Some(rest) = prompt.strip_prefix("```") else {
        return prompt.to_string();
    };
    let rest = rest
        .strip_prefix("markdown")
        .or_else(|| rest.strip_prefix("text"))
        .unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```markdown\nWrite a story.\n```"), "Write a story.");
        assert_eq!(strip_code_fence("```text\nBe brief.\n```"), "Be brief.");
        assert_eq!(strip_code_fence("```\nBe brief.\n```"), "Be brief.");
        assert_eq!(strip_code_fence("```\nunterminated "), "unterminated");
        assert_eq!(strip_code_fence("  plain prompt \n"), "  plain prompt \n");
        assert_eq!(strip_code_fence("Use ``` for code"), "Use ``` for code");
    }
}

use review_core::{
    AdherenceBand, AnalysisResult, ComplianceType, FactIssueType, IssueCategory, IssueSource,
    OptimizationResult, ReliabilityBand, ReviewConfig, ReviewError, Severity,
};
use serde_json::json;

fn payload() -> serde_json::Value {
    json!({
        "hasHallucination": true,
        "score": 64,
        "summary": "Mostly grounded.",
        "rootCause": "Ambiguous instructions about pricing.",
        "strategyReport": {
            "metaStrategy": "Problem, agitation, solution",
            "adherenceScore": 85,
            "issues": [{
                "rule": "Agitate before solving",
                "quote": "Buy now",
                "violation": "Skips the agitation step",
                "promptImprovement": "Require a pain point first"
            }]
        },
        "issues": [{
            "quote": "costs $5",
            "source": "output",
            "type": "Fabrication",
            "reason": "No price in the facts",
            "suggestion": "Remove the price",
            "replacement": "is affordable"
        }, {
            "quote": "so the price must be low",
            "source": "reasoning",
            "type": "Reasoning Error",
            "reason": "Non sequitur",
            "suggestion": "Ground the inference",
            "replacement": ""
        }],
        "complianceIssues": [{
            "quote": "Buy now",
            "source": "output",
            "type": "Ad Law Violation",
            "severity": "High",
            "reason": "Pressure tactic",
            "suggestion": "Soften the call to action"
        }]
    })
}

#[test]
fn test_parse_full_payload() {
    let result = AnalysisResult::from_json(&payload().to_string()).unwrap();

    assert!(result.has_hallucination);
    assert_eq!(result.score, 64);
    assert_eq!(result.strategy_report.adherence_score, 85);
    assert_eq!(result.issues[1].issue_type, FactIssueType::ReasoningError);
    assert_eq!(result.issues[1].source, IssueSource::Reasoning);
    assert_eq!(result.compliance_issues[0].issue_type, ComplianceType::AdLawViolation);
    assert_eq!(result.compliance_issues[0].severity, Severity::High);

    // Missing `source` defaults to the output document.
    assert_eq!(result.strategy_report.issues[0].source, IssueSource::Output);
    assert!(!result.is_optimized());
}

#[test]
fn test_unified_issue_ids_and_fields() {
    let result = AnalysisResult::from_json(&payload().to_string()).unwrap();
    let issues = result.unified_issues();

    let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["fact-0", "fact-1", "strat-0", "comp-0"]);

    assert_eq!(issues[0].category, IssueCategory::Fact);
    assert_eq!(issues[0].reference_fix.as_deref(), Some("is affordable"));
    assert_eq!(issues[0].sub_type.as_deref(), Some("Fabrication"));

    // An empty replacement is not offered as a fix.
    assert_eq!(issues[1].reference_fix, None);

    assert_eq!(issues[2].category, IssueCategory::Strategy);
    assert_eq!(issues[2].reason, "Skips the agitation step");
    assert_eq!(issues[2].suggestion, "Require a pain point first");
    assert_eq!(issues[2].rule.as_deref(), Some("Agitate before solving"));

    assert_eq!(issues[3].category, IssueCategory::Compliance);
    assert_eq!(issues[3].sub_type.as_deref(), Some("Ad Law Violation"));

    assert_eq!(result.issue("comp-0").unwrap().quote, "Buy now");
}

#[test]
fn test_optional_lists_default_to_empty() {
    let result = AnalysisResult::from_json(
        r#"{ "score": 100, "summary": "Clean.", "rootCause": "None." }"#,
    )
    .unwrap();
    assert!(result.issues.is_empty());
    assert!(result.compliance_issues.is_empty());
    assert!(result.strategy_report.issues.is_empty());
    assert!(result.unified_issues().is_empty());
}

#[test]
fn test_unknown_issue_types_map_to_other() {
    let mut value = payload();
    value["issues"][0]["type"] = json!("Exaggeration");
    value["complianceIssues"][0]["type"] = json!("Trademark");

    let result = AnalysisResult::from_json(&value.to_string()).unwrap();
    assert_eq!(result.issues[0].issue_type, FactIssueType::Other);
    assert_eq!(result.compliance_issues[0].issue_type, ComplianceType::Other);
}

#[test]
fn test_scores_are_validated() {
    let mut value = payload();
    value["score"] = json!(140);
    let err = AnalysisResult::from_json(&value.to_string()).unwrap_err();
    assert!(matches!(
        err,
        ReviewError::ScoreOutOfRange {
            field: "score",
            value: 140
        }
    ));

    let mut value = payload();
    value["strategyReport"]["adherenceScore"] = json!(-1);
    let err = AnalysisResult::from_json(&value.to_string()).unwrap_err();
    assert!(matches!(
        err,
        ReviewError::ScoreOutOfRange {
            field: "adherenceScore",
            ..
        }
    ));
}

#[test]
fn test_malformed_payload() {
    let err = AnalysisResult::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ReviewError::InvalidPayload(_)));

    let err = AnalysisResult::from_json(r#"{ "score": 50 }"#).unwrap_err();
    assert!(matches!(err, ReviewError::InvalidPayload(_)));
}

#[test]
fn test_merge_optimization_keeps_audit() {
    let mut result = AnalysisResult::from_json(&payload().to_string()).unwrap();
    let optimization: OptimizationResult = serde_json::from_value(json!({
        "optimizedPrompt": "Describe the pain point, then the product.",
        "promptSuggestions": ["Name the pain point", "Drop the price"]
    }))
    .unwrap();

    result.merge_optimization(optimization);

    assert!(result.is_optimized());
    assert_eq!(
        result.optimized_prompt.as_deref(),
        Some("Describe the pain point, then the product.")
    );
    assert_eq!(result.prompt_suggestions.as_ref().map(Vec::len), Some(2));
    assert_eq!(result.score, 64);
    assert_eq!(result.issue_count(), 4);

    let round_trip = serde_json::to_value(&result).unwrap();
    assert_eq!(round_trip["optimizedPrompt"], json!("Describe the pain point, then the product."));
    assert_eq!(round_trip["rootCause"], json!("Ambiguous instructions about pricing."));
}

#[test]
fn test_merge_optimization_strips_code_fence() {
    let mut result = AnalysisResult::from_json(&payload().to_string()).unwrap();
    let optimization: OptimizationResult = serde_json::from_value(json!({
        "optimizedPrompt": "```markdown\nWrite a story.\n```",
        "promptSuggestions": []
    }))
    .unwrap();

    result.merge_optimization(optimization);
    assert_eq!(result.optimized_prompt.as_deref(), Some("Write a story."));

    let optimized = result.optimized_prompt.as_deref().unwrap();
    assert!(review_core::diff("Write a story.", optimized).is_unchanged());
}

#[test]
fn test_score_bands() {
    let result = AnalysisResult::from_json(&payload().to_string()).unwrap();
    assert_eq!(ReliabilityBand::from_score(result.score), ReliabilityBand::Medium);
    assert_eq!(
        AdherenceBand::from_score(result.strategy_report.adherence_score),
        AdherenceBand::Strong
    );
}

#[test]
fn test_review_config_defaults() {
    let config = ReviewConfig::from_json(r#"{ "diff": {} }"#).unwrap();
    assert_eq!(config.diff.lookahead, review_core::DEFAULT_LOOKAHEAD);
    assert!(matches!(
        ReviewConfig::from_json(r#"{ "diff": { "lookahead": "many" } }"#),
        Err(ReviewError::InvalidPayload(_))
    ));
}

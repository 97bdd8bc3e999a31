use review_core::{
    AnalysisResult, FixEdit, ReviewError, annotate, apply_fix, apply_issue_fix, locate_fix,
};

const PAYLOAD: &str = r#"{
    "hasHallucination": true,
    "score": 55,
    "summary": "Two fabricated numbers.",
    "rootCause": "The prompt never lists the allowed figures.",
    "strategyReport": {
        "metaStrategy": "Lead with benefits",
        "adherenceScore": 70,
        "issues": [{
            "rule": "No absolute claims",
            "quote": "the best phone ever",
            "source": "output",
            "violation": "Absolute claim",
            "promptImprovement": "Forbid superlatives"
        }]
    },
    "issues": [
        {
            "quote": "the best phone ever",
            "source": "output",
            "type": "Fabrication",
            "reason": "Unsupported",
            "suggestion": "Tone it down",
            "replacement": "a well-reviewed phone"
        },
        {
            "quote": "48 hours",
            "source": "output",
            "type": "Contradiction",
            "reason": "Facts say 24 hours",
            "suggestion": "Use the documented figure",
            "replacement": "24 hours"
        },
        {
            "quote": "battery",
            "type": "Omission",
            "reason": "Battery size missing",
            "suggestion": "Mention capacity",
            "replacement": ""
        }
    ]
}"#;

const OUTPUT: &str = "It is the best phone ever, with a 48 hours battery. Truly the best phone ever.";

#[test]
fn test_apply_fix_replaces_first_occurrence_only() {
    assert_eq!(
        apply_fix(OUTPUT, "the best phone ever", "a good phone"),
        "It is a good phone, with a 48 hours battery. Truly the best phone ever."
    );
}

#[test]
fn test_apply_fix_absent_quote_leaves_document() {
    assert_eq!(apply_fix(OUTPUT, "72 hours", "24 hours"), OUTPUT);
    assert_eq!(locate_fix(OUTPUT, "72 hours", "24 hours"), None);
}

#[test]
fn test_apply_fix_is_idempotent_when_replacement_lacks_quote() {
    let once = apply_fix("a 48 hours battery", "48 hours", "24 hours");
    let twice = apply_fix(&once, "48 hours", "24 hours");
    assert_eq!(once, "a 24 hours battery");
    assert_eq!(twice, once);
}

#[test]
fn test_locate_fix_describes_edit() {
    let edit = locate_fix(OUTPUT, "48 hours", "24 hours").unwrap();
    assert_eq!(
        edit,
        FixEdit {
            start: 34,
            deleted_text: "48 hours".to_string(),
            inserted_text: "24 hours".to_string(),
        }
    );
    assert_eq!(edit.end(), 42);
}

#[test]
fn test_apply_issue_fix_removes_findings_quoting_the_replaced_text() {
    let mut result = AnalysisResult::from_json(PAYLOAD).unwrap();
    assert_eq!(result.issue_count(), 4);

    let applied = apply_issue_fix(&mut result, OUTPUT, "fact-0").unwrap();
    assert_eq!(
        applied.document,
        "It is a well-reviewed phone, with a 48 hours battery. Truly the best phone ever."
    );
    assert_eq!(applied.edit.as_ref().map(|e| e.start), Some(6));

    // The fact issue and the strategy issue both quoted the replaced text.
    assert_eq!(applied.removed_issues, 2);
    assert_eq!(result.issue_count(), 2);
    assert!(result.strategy_report.issues.is_empty());

    // Ids are renumbered from the remaining findings.
    let ids: Vec<String> = result.unified_issues().into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["fact-0", "fact-1"]);
}

#[test]
fn test_apply_issue_fix_then_reannotate() {
    let mut result = AnalysisResult::from_json(PAYLOAD).unwrap();
    let applied = apply_issue_fix(&mut result, OUTPUT, "fact-1").unwrap();

    let issues = result.unified_issues();
    let segments = annotate(&applied.document, &issues);
    assert!(segments.iter().all(|s| s.text != "48 hours"));
    let rebuilt: String = segments.iter().map(|s| s.text).collect();
    assert_eq!(rebuilt, applied.document);
}

#[test]
fn test_apply_issue_fix_errors() {
    let mut result = AnalysisResult::from_json(PAYLOAD).unwrap();

    let err = apply_issue_fix(&mut result, OUTPUT, "fact-9").unwrap_err();
    assert!(matches!(err, ReviewError::UnknownIssue(ref id) if id == "fact-9"));

    // An empty replacement means there is nothing to apply.
    let err = apply_issue_fix(&mut result, OUTPUT, "fact-2").unwrap_err();
    assert!(matches!(err, ReviewError::NoReplacement(_)));

    // Strategy findings never carry a replacement.
    let err = apply_issue_fix(&mut result, OUTPUT, "strat-0").unwrap_err();
    assert!(matches!(err, ReviewError::NoReplacement(_)));

    assert_eq!(result.issue_count(), 4);
}

#[test]
fn test_apply_issue_fix_with_stale_quote_still_drops_findings() {
    let mut result = AnalysisResult::from_json(PAYLOAD).unwrap();
    let applied = apply_issue_fix(&mut result, "unrelated text", "fact-1").unwrap();
    assert_eq!(applied.document, "unrelated text");
    assert_eq!(applied.edit, None);
    assert_eq!(applied.removed_issues, 1);
}

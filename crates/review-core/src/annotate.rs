//! Quote-to-span annotation overlay.
//!
//! Given a document and the issues quoting it, this module locates every occurrence of every quote
//! and linearizes them into [`AnnotatedSegment`]s: plain text interleaved with matched spans, so a
//! renderer can make each matched span clickable and jump to the issue it belongs to.
//!
//! Conflicts are resolved first-registered-wins: issues are registered in list order (and each
//! issue's occurrences left to right), and a candidate that collides with an already accepted
//! match is dropped. An issue earlier in the list therefore claims an overlapping region.
//!
//! A quote that does not occur in the document is silently skipped; quotes produced by an
//! analysis service are frequently paraphrased and not character-exact.

use crate::issue::{Issue, IssueCategory};
use crate::range::{CharIndex, TextRange};
use crate::search;
use serde::Serialize;

/// One located occurrence of an issue's quote, in character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
    /// Id of the issue this occurrence belongs to.
    pub issue_id: String,
    /// Category of that issue.
    pub category: IssueCategory,
}

impl Match {
    /// The matched character range.
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }
}

/// A contiguous slice of a document, either plain or covered by a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedSegment<'a> {
    /// The segment text, borrowed from the document.
    pub text: &'a str,
    /// The match covering this segment, or `None` for plain text.
    pub matched: Option<Match>,
}

impl<'a> AnnotatedSegment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            matched: None,
        }
    }
}

/// Locate, deduplicate and sort the matches of `issues` in `document`.
///
/// The returned matches are non-overlapping and ordered by `start`.
pub fn find_matches<'i, I>(document: &str, issues: I) -> Vec<Match>
where
    I: IntoIterator<Item = &'i Issue>,
{
    let mut accepted: Vec<Match> = Vec::new();

    for issue in issues {
        if issue.quote.is_empty() {
            continue;
        }

        let occurrences = match search::find_all(document, &issue.quote) {
            Ok(occurrences) => occurrences,
            Err(err) => {
                tracing::warn!(issue = %issue.id, error = %err, "skipping unsearchable quote");
                continue;
            }
        };

        if occurrences.is_empty() {
            tracing::debug!(issue = %issue.id, "quote not found in document");
        }

        for range in occurrences {
            if accepted.iter().any(|m| m.range().overlaps(&range)) {
                tracing::trace!(
                    issue = %issue.id,
                    start = range.start,
                    end = range.end,
                    "dropping overlapping match"
                );
                continue;
            }
            accepted.push(Match {
                start: range.start,
                end: range.end,
                issue_id: issue.id.clone(),
                category: issue.category,
            });
        }
    }

    accepted.sort_by_key(|m| m.start);
    accepted
}

/// Split `document` into plain and matched segments for `issues`.
///
/// The segments cover the whole document with no gaps and no overlaps, so their texts concatenate
/// back to `document`.
///
/// ```
/// use review_core::{annotate, Issue, IssueCategory};
///
/// let issues = vec![Issue::new("x1", IssueCategory::Fact, "green")];
/// let segments = annotate("The sky is green.", &issues);
/// let texts: Vec<&str> = segments.iter().map(|s| s.text).collect();
/// assert_eq!(texts, vec!["The sky is ", "green", "."]);
/// assert_eq!(segments[1].matched.as_ref().map(|m| m.issue_id.as_str()), Some("x1"));
/// ```
pub fn annotate<'a, 'i, I>(document: &'a str, issues: I) -> Vec<AnnotatedSegment<'a>>
where
    I: IntoIterator<Item = &'i Issue>,
{
    let matches = find_matches(document, issues);
    let index = CharIndex::new(document);

    let mut segments = Vec::with_capacity(matches.len() * 2 + 1);
    let mut cursor = 0;

    for m in matches {
        if m.start > cursor {
            segments.push(AnnotatedSegment::plain(
                index.slice(document, TextRange::new(cursor, m.start)),
            ));
        }
        let text = index.slice(document, m.range());
        cursor = m.end;
        segments.push(AnnotatedSegment {
            text,
            matched: Some(m),
        });
    }

    if cursor < index.char_count() {
        segments.push(AnnotatedSegment::plain(
            index.slice(document, TextRange::new(cursor, index.char_count())),
        ));
    }

    segments
}

/// The match covering character `offset`, if any.
///
/// `matches` must be sorted and non-overlapping, as returned by [`find_matches`].
pub fn match_at(matches: &[Match], offset: usize) -> Option<&Match> {
    let idx = matches.partition_point(|m| m.end <= offset);
    matches.get(idx).filter(|m| m.range().contains(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(id: &str, quote: &str) -> Issue {
        Issue::new(id, IssueCategory::Fact, quote)
    }

    #[test]
    fn test_earlier_issue_wins_even_when_later_in_document() {
        // "is green" is registered first and claims 4..12; "sky is" (0..6) runs into it.
        let issues = vec![fact("a", "is green"), fact("b", "sky is")];
        let matches = find_matches("sky is green", &issues);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].issue_id, "a");
        assert_eq!(matches[0].range(), TextRange::new(4, 12));
    }

    #[test]
    fn test_match_at() {
        let issues = vec![fact("a", "sky"), fact("b", "green")];
        let matches = find_matches("sky is green", &issues);
        assert_eq!(match_at(&matches, 0).map(|m| m.issue_id.as_str()), Some("a"));
        assert_eq!(match_at(&matches, 2).map(|m| m.issue_id.as_str()), Some("a"));
        assert_eq!(match_at(&matches, 3), None);
        assert_eq!(match_at(&matches, 11).map(|m| m.issue_id.as_str()), Some("b"));
        assert_eq!(match_at(&matches, 12), None);
    }
}

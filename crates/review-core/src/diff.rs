//! Token-level diff between an original and a revised passage.
//!
//! The engine walks both token sequences once, left to right. On a mismatch it looks a bounded
//! number of tokens ahead for a point where the two sides line up again; if there is none, the
//! pair is treated as a one-for-one substitution. The result is not a minimal edit script, but it
//! is deterministic, `O(n * lookahead)`, and stable while a reviewer types into the revised side.
//!
//! Every [`TextDiff`] covers both inputs losslessly:
//! - `Equal` + `Deleted` parts, in order, concatenate to the original text
//! - `Equal` + `Inserted` parts, in order, concatenate to the revised text

use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Default number of tokens scanned ahead when the two sides disagree.
pub const DEFAULT_LOOKAHEAD: usize = 15;

/// Options that control how the diff is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Lookahead window, in tokens. Sync offsets `1..lookahead` are tried on a mismatch; `0` or
    /// `1` turns every mismatch into a substitution.
    pub lookahead: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
        }
    }
}

/// How a part relates the two texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present in both texts.
    Equal,
    /// Present only in the revised text.
    Inserted,
    /// Present only in the original text.
    Deleted,
}

/// One tagged chunk of the alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffPart<'a> {
    /// Relation of this chunk to the two texts.
    pub kind: DiffKind,
    /// Chunk text. Borrowed from the inputs for token-level parts.
    pub text: Cow<'a, str>,
}

impl<'a> DiffPart<'a> {
    fn borrowed(kind: DiffKind, text: &'a str) -> Self {
        Self {
            kind,
            text: Cow::Borrowed(text),
        }
    }
}

/// Token counts per part kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    /// Parts present on both sides.
    pub equal: usize,
    /// Parts present only on the revised side.
    pub inserted: usize,
    /// Parts present only on the original side.
    pub deleted: usize,
}

impl DiffStats {
    /// Number of inserted plus deleted parts.
    pub fn changed(&self) -> usize {
        self.inserted + self.deleted
    }
}

/// An ordered sequence of [`DiffPart`]s covering both inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextDiff<'a> {
    parts: Vec<DiffPart<'a>>,
}

impl<'a> TextDiff<'a> {
    /// All parts, in order.
    pub fn parts(&self) -> &[DiffPart<'a>] {
        &self.parts
    }

    /// Consume the diff and return its parts.
    pub fn into_parts(self) -> Vec<DiffPart<'a>> {
        self.parts
    }

    /// Returns `true` if no part was inserted or deleted.
    pub fn is_unchanged(&self) -> bool {
        self.parts.iter().all(|part| part.kind == DiffKind::Equal)
    }

    /// Parts shown on the original side of a side-by-side view (`Equal` and `Deleted`).
    pub fn old_side(&self) -> impl Iterator<Item = &DiffPart<'a>> + '_ {
        self.parts
            .iter()
            .filter(|part| part.kind != DiffKind::Inserted)
    }

    /// Parts shown on the revised side of a side-by-side view (`Equal` and `Inserted`).
    pub fn new_side(&self) -> impl Iterator<Item = &DiffPart<'a>> + '_ {
        self.parts.iter().filter(|part| part.kind != DiffKind::Deleted)
    }

    /// Rebuild the original text.
    pub fn old_text(&self) -> String {
        self.old_side().map(|part| part.text.as_ref()).collect()
    }

    /// Rebuild the revised text.
    pub fn new_text(&self) -> String {
        self.new_side().map(|part| part.text.as_ref()).collect()
    }

    /// Count parts by kind.
    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for part in &self.parts {
            match part.kind {
                DiffKind::Equal => stats.equal += 1,
                DiffKind::Inserted => stats.inserted += 1,
                DiffKind::Deleted => stats.deleted += 1,
            }
        }
        stats
    }

    /// Merge runs of adjacent parts that share a kind.
    ///
    /// Useful for rendering: `"big", " "` inserted back to back becomes a single `"big "` part.
    pub fn coalesced(&self) -> TextDiff<'a> {
        let mut parts: Vec<DiffPart<'a>> = Vec::with_capacity(self.parts.len());
        for part in &self.parts {
            match parts.last_mut() {
                Some(last) if last.kind == part.kind => last.text.to_mut().push_str(&part.text),
                _ => parts.push(part.clone()),
            }
        }
        TextDiff { parts }
    }
}

/// Compute the token diff between `old` and `new` with default options.
///
/// ```
/// use review_core::{diff, DiffKind};
///
/// let result = diff("the cat sat", "the big cat sat");
/// assert_eq!(result.old_text(), "the cat sat");
/// assert_eq!(result.new_text(), "the big cat sat");
/// assert_eq!(result.stats().inserted, 2);
/// assert!(result.parts().iter().all(|p| p.kind != DiffKind::Deleted));
/// ```
pub fn diff<'a>(old: &'a str, new: &'a str) -> TextDiff<'a> {
    diff_with_options(old, new, DiffOptions::default())
}

/// Compute the token diff between `old` and `new`.
pub fn diff_with_options<'a>(old: &'a str, new: &'a str, options: DiffOptions) -> TextDiff<'a> {
    let old_tokens = tokenize(old);
    let new_tokens = tokenize(new);
    let parts = align(&old_tokens, &new_tokens, options.lookahead);

    tracing::debug!(
        old_tokens = old_tokens.len(),
        new_tokens = new_tokens.len(),
        parts = parts.len(),
        "computed token diff"
    );

    TextDiff { parts }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resync {
    /// Skipping this many original tokens lines the sides up again.
    Delete(usize),
    /// Skipping this many revised tokens lines the sides up again.
    Insert(usize),
}

/// Smallest offset at which the sides line up again; deletion wins a tie.
///
/// Offsets past the end of both token lists can never match, so the window is capped at the
/// longer remainder. Requires `i < old.len()` and `j < new.len()`.
fn find_resync(old: &[&str], new: &[&str], i: usize, j: usize, lookahead: usize) -> Option<Resync> {
    let window = lookahead.min((old.len() - i).max(new.len() - j));
    (1..window).find_map(|k| {
        if old.get(i + k) == Some(&new[j]) {
            Some(Resync::Delete(k))
        } else if new.get(j + k) == Some(&old[i]) {
            Some(Resync::Insert(k))
        } else {
            None
        }
    })
}

fn align<'a>(old: &[&'a str], new: &[&'a str], lookahead: usize) -> Vec<DiffPart<'a>> {
    let mut parts = Vec::with_capacity(old.len().max(new.len()));
    let mut i = 0;
    let mut j = 0;

    while i < old.len() || j < new.len() {
        if i >= old.len() {
            parts.push(DiffPart::borrowed(DiffKind::Inserted, new[j]));
            j += 1;
        } else if j >= new.len() {
            parts.push(DiffPart::borrowed(DiffKind::Deleted, old[i]));
            i += 1;
        } else if old[i] == new[j] {
            parts.push(DiffPart::borrowed(DiffKind::Equal, old[i]));
            i += 1;
            j += 1;
        } else {
            match find_resync(old, new, i, j, lookahead) {
                Some(Resync::Delete(k)) => {
                    parts.extend(
                        old[i..i + k]
                            .iter()
                            .map(|&token| DiffPart::borrowed(DiffKind::Deleted, token)),
                    );
                    i += k;
                }
                Some(Resync::Insert(k)) => {
                    parts.extend(
                        new[j..j + k]
                            .iter()
                            .map(|&token| DiffPart::borrowed(DiffKind::Inserted, token)),
                    );
                    j += k;
                }
                None => {
                    parts.push(DiffPart::borrowed(DiffKind::Deleted, old[i]));
                    parts.push(DiffPart::borrowed(DiffKind::Inserted, new[j]));
                    i += 1;
                    j += 1;
                }
            }
        }
    }

    parts
}

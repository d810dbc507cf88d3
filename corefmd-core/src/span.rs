//! Token-index spans and span sets.
//!
//! A [`Span`] is a half-open interval `[start, end)` over 0-based token
//! positions within one sentence. Construction is checked: an empty or
//! inverted interval is not a span, so extractors that compute
//! `start >= end` (a tagging artifact, not a document failure) simply get
//! `None` back and drop the candidate.
//!
//! ```text
//! tokens:   The  American  policy  was  criticized
//! index:     0      1        2      3       4
//!                 └──[1, 3)──┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

/// Half-open token interval `[start, end)` within one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a span; `None` unless `start < end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Span of a single token.
    #[must_use]
    pub const fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index + 1,
        }
    }

    /// First token position (inclusive).
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// One past the last token position.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of tokens covered. Always at least one.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Spans are never empty; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Token range, for slicing a sentence.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// True when `index` falls inside the span.
    #[must_use]
    pub const fn contains_index(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// Non-strict containment: `self` lies within `outer` (equal spans included).
    #[must_use]
    pub const fn is_within(&self, outer: &Span) -> bool {
        outer.start <= self.start && self.end <= outer.end
    }

    /// Strict containment: within `outer` and not equal to it.
    #[must_use]
    pub fn is_strictly_within(&self, outer: &Span) -> bool {
        self.is_within(outer) && self != outer
    }

    /// True when the two spans share at least one token.
    #[must_use]
    pub const fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when the span fits inside a sentence of `len` tokens.
    #[must_use]
    pub const fn fits(&self, len: usize) -> bool {
        self.end <= len
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl TryFrom<Range<usize>> for Span {
    type Error = crate::Error;

    fn try_from(range: Range<usize>) -> crate::Result<Self> {
        Span::new(range.start, range.end).ok_or_else(|| {
            crate::Error::invalid_input(format!(
                "span [{}, {}) is empty or inverted",
                range.start, range.end
            ))
        })
    }
}

/// A set of spans belonging to one sentence.
///
/// Used twice per sentence during extraction: once as the dedup set of
/// every filed span, once as the set of spans recognized as named
/// entities. Both are discarded when extraction ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanSet {
    spans: HashSet<Span>,
}

impl SpanSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a span. Returns `false` if it was already present.
    pub fn insert(&mut self, span: Span) -> bool {
        self.spans.insert(span)
    }

    /// Exact membership.
    #[must_use]
    pub fn contains(&self, span: &Span) -> bool {
        self.spans.contains(span)
    }

    /// True when some member covers `span` (non-strict containment).
    #[must_use]
    pub fn covers(&self, span: &Span) -> bool {
        self.spans.iter().any(|outer| span.is_within(outer))
    }

    /// Number of spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// True when no span has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Iterate in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter()
    }

    /// Spans in `(start, end)` order.
    #[must_use]
    pub fn sorted(&self) -> Vec<Span> {
        let mut spans: Vec<Span> = self.spans.iter().copied().collect();
        spans.sort_unstable();
        spans
    }
}

impl FromIterator<Span> for SpanSet {
    fn from_iter<I: IntoIterator<Item = Span>>(iter: I) -> Self {
        Self {
            spans: iter.into_iter().collect(),
        }
    }
}

impl Extend<Span> for SpanSet {
    fn extend<I: IntoIterator<Item = Span>>(&mut self, iter: I) {
        self.spans.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize) -> Span {
        Span::new(start, end).unwrap()
    }

    #[test]
    fn test_rejects_empty_and_inverted() {
        assert!(Span::new(3, 3).is_none());
        assert!(Span::new(4, 2).is_none());
        assert!(Span::try_from(2..2).is_err());
        assert_eq!(Span::try_from(1..3).unwrap(), span(1, 3));
    }

    #[test]
    fn test_containment() {
        let outer = span(1, 5);
        assert!(span(1, 5).is_within(&outer));
        assert!(!span(1, 5).is_strictly_within(&outer));
        assert!(span(2, 4).is_strictly_within(&outer));
        assert!(!span(0, 2).is_within(&outer));
        assert!(span(0, 2).overlaps(&outer));
        assert!(!span(5, 6).overlaps(&outer));
    }

    #[test]
    fn test_span_set_insert_is_idempotent() {
        let mut set = SpanSet::new();
        assert!(set.insert(span(0, 2)));
        assert!(!set.insert(span(0, 2)));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&span(0, 2)));
        assert!(!set.contains(&span(0, 1)));
    }

    #[test]
    fn test_span_set_covers() {
        let set: SpanSet = [span(0, 3), span(5, 6)].into_iter().collect();
        assert!(set.covers(&span(1, 2)));
        assert!(set.covers(&span(0, 3)));
        assert!(set.covers(&span(5, 6)));
        assert!(!set.covers(&span(2, 4)));
        assert!(!SpanSet::new().covers(&span(0, 1)));
    }

    #[test]
    fn test_sorted_order() {
        let set: SpanSet = [span(2, 3), span(0, 4), span(0, 1)].into_iter().collect();
        assert_eq!(set.sorted(), vec![span(0, 1), span(0, 4), span(2, 3)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(span(1, 3).to_string(), "[1, 3)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn new_accepts_exactly_nonempty(start in 0usize..50, end in 0usize..50) {
            prop_assert_eq!(Span::new(start, end).is_some(), start < end);
        }

        #[test]
        fn covers_agrees_with_linear_scan(
            members in prop::collection::vec((0usize..20, 1usize..6), 0..8),
            probe in (0usize..20, 1usize..6),
        ) {
            let spans: Vec<Span> = members
                .iter()
                .filter_map(|&(s, l)| Span::new(s, s + l))
                .collect();
            let set: SpanSet = spans.iter().copied().collect();
            let probe = Span::new(probe.0, probe.0 + probe.1).unwrap();
            let expected = spans.iter().any(|o| o.start() <= probe.start() && probe.end() <= o.end());
            prop_assert_eq!(set.covers(&probe), expected);
        }
    }
}

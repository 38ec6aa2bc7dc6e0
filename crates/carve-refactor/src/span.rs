//! Span predicates.
//!
//! Pure functions over a request span (caret or selection) and the extent
//! of a node, token, or pair of sub-extents. Extent ends are inclusive for
//! carets: a caret right after the last character of a token still counts
//! as "on" the token.

use carve_core::TextRange;

/// The span is a caret inside `extent`, ends included.
pub fn is_empty_and_contained_in(span: TextRange, extent: TextRange) -> bool {
    span.is_empty() && extent.start() <= span.start() && span.start() <= extent.end()
}

pub fn is_contained_in(span: TextRange, extent: TextRange) -> bool {
    extent.start() <= span.start() && span.end() <= extent.end()
}

/// The span lies in the gap between two sub-extents of a construct, e.g.
/// inside the body delimited by a keyword and a closing token, touching
/// neither.
pub fn is_between(span: TextRange, first: TextRange, last: TextRange) -> bool {
    first.end() <= span.start() && span.end() <= last.start()
}

/// Caret on either sub-extent, or a span between them.
pub fn is_empty_and_contained_in_or_between(
    span: TextRange,
    first: TextRange,
    last: TextRange,
) -> bool {
    is_empty_and_contained_in(span, first)
        || is_empty_and_contained_in(span, last)
        || is_between(span, first, last)
}

/// The span exactly selects `extent`.
pub fn is_selection_of(span: TextRange, extent: TextRange) -> bool {
    !span.is_empty() && span == extent
}

/// Extent from the start of `first` to the end of `last`.
pub fn cover(first: TextRange, last: TextRange) -> TextRange {
    first.cover(last)
}

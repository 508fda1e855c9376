//! Source locations.
//!
//! A [`SourcePoint`] is a single position in a source file; a [`Span`] is a
//! half-open `[start, end)` byte range between two points. Every token and
//! every tree node carries a span so later phases can map back to source text.

use std::fmt;

/// A single position in a source file.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SourcePoint {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column, counted in Unicode scalar values (not bytes).
    pub column: u32,
    /// 0-indexed byte offset from the start of the file.
    pub byte_offset: u32,
}

impl SourcePoint {
    #[must_use]
    pub fn new(line: u32, column: u32, byte_offset: u32) -> Self {
        SourcePoint { line, column, byte_offset }
    }

    #[must_use]
    pub fn start() -> Self {
        SourcePoint { line: 1, column: 1, byte_offset: 0 }
    }
}

impl fmt::Display for SourcePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open source range `[start, end)`.
///
/// Spans strictly nest: a child node's span is always contained within its
/// parent's span, and within a token stream, consecutive tokens' spans are
/// strictly increasing and never overlap.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub start: SourcePoint,
    pub end: SourcePoint,
}

impl Span {
    #[must_use]
    pub fn new(start: SourcePoint, end: SourcePoint) -> Self {
        debug_assert!(end.byte_offset >= start.byte_offset, "span must not be inverted");
        Span { start, end }
    }

    /// Build a span that covers both `self` and `other`.
    #[must_use]
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start, other.end)
    }

    #[must_use]
    pub fn len(&self) -> u32 {
        self.end.byte_offset.saturating_sub(self.start.byte_offset)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, other: Span) -> bool {
        self.start.byte_offset <= other.start.byte_offset
            && other.end.byte_offset <= self.end.byte_offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

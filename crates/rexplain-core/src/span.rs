//! Half-open codepoint intervals over the source pattern.

use serde::Serialize;

/// Immutable half-open interval `[start, end)` in codepoint offsets.
///
/// A zero-width span (`start == end`) denotes "nothing" and is filtered from
/// all externally visible output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        assert!(start <= end, "illegal span range [{start},{end})");
        Self { start, end }
    }

    /// Zero-width span at `pos`.
    pub fn empty(pos: u32) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `true` if the two spans share at least one codepoint.
    /// Exactly adjacent spans do not overlap, and a zero-width span
    /// overlaps nothing.
    pub fn overlaps(&self, other: Span) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start < other.end
            && self.end > other.start
    }

    /// `true` if `other` lies entirely within `self`.
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest span covering both.
    pub fn union(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

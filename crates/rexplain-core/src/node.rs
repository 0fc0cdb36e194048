//! The narrow vocabulary the parser shares with the engine.
//!
//! The parser describes each syntax-tree node to the engine through
//! [`NodeSummary`]; the engine never sees the tree itself.

/// Operator tag of a syntax-tree node.
///
/// This is the canonical enumeration of node shapes the description
/// generator knows how to phrase. The match over it is exhaustive, so an
/// operator without a template cannot reach the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// One codepoint, or a run of codepoints merged into a "string".
    Literal,
    /// Bracketed character class, or a class-valued shorthand.
    CharClass,
    /// `.` with dot-matches-newline set.
    AnyChar,
    /// `.` without dot-matches-newline.
    AnyCharNotNl,
    /// `^`
    BeginLine,
    /// `$`
    EndLine,
    /// `\A`
    BeginText,
    /// `\z`
    EndText,
    /// `\b`
    WordBoundary,
    /// `\B`
    NoWordBoundary,
    /// `(...)` or `(?P<name>...)`
    Capture,
    /// `(?:...)` and scoped-flag groups; semantically transparent.
    Group,
    /// `x*`
    Star,
    /// `x+`
    Plus,
    /// `x?`
    Quest,
    /// `x{min,max}`
    Repeat,
    /// Two or more units in sequence.
    Concat,
    /// `x|y`
    Alternate,
    /// Matches the empty string (empty branch, bare modifier group).
    EmptyMatch,
    /// Matches nothing; produced only by simplification, never by parsing.
    NoMatch,
}

/// Flags active at a node, matching the inline modifier letters `i m s U`
/// plus the per-quantifier non-greedy marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags(u8);

impl Flags {
    pub const CASE_INSENSITIVE: Flags = Flags(1 << 0);
    pub const MULTI_LINE: Flags = Flags(1 << 1);
    pub const DOT_MATCHES_NL: Flags = Flags(1 << 2);
    pub const UNGREEDY: Flags = Flags(1 << 3);
    pub const NON_GREEDY: Flags = Flags(1 << 4);

    pub fn empty() -> Flags {
        Flags(0)
    }

    pub fn contains(&self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Flags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Flags) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

/// Everything the description generator needs to know about one node:
/// its operator, active flags, and the literal data the templates consume.
#[derive(Debug, Clone, Copy)]
pub struct NodeSummary<'a> {
    pub op: Op,
    pub flags: Flags,
    /// Literal codepoints; only read for `Op::Literal`.
    pub runes: &'a [char],
    /// Bounded-repeat minimum; `None` means unset.
    pub min: Option<u32>,
    /// Bounded-repeat maximum; `None` means unset.
    pub max: Option<u32>,
    /// Capture-group name.
    pub name: Option<&'a str>,
}

impl<'a> NodeSummary<'a> {
    pub fn new(op: Op, flags: Flags) -> Self {
        Self {
            op,
            flags,
            runes: &[],
            min: None,
            max: None,
            name: None,
        }
    }

    pub fn with_runes(mut self, runes: &'a [char]) -> Self {
        self.runes = runes;
        self
    }

    pub fn with_bounds(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_name(mut self, name: Option<&'a str>) -> Self {
        self.name = name;
        self
    }
}

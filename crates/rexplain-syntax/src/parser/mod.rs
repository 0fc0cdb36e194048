//! Recursive-descent pattern parser.
//!
//! The parser walks the pattern once, codepoint by codepoint, building one
//! [`Expr`] per syntactic unit. Each production records the tokens it
//! consumes into the node's track set and composes them into the node's
//! covering track, so annotation happens during parsing rather than as a
//! separate walk.

mod grammar;

#[cfg(test)]
mod errors_tests;
#[cfg(test)]
mod grammar_tests;

use rexplain_core::{Flags, Span, Track, TrackSet, track_order};

use crate::ast::{Ast, Expr, ExprId};
use crate::{Error, Result};

/// Parse a pattern with no flags preset.
pub fn parse(pattern: &str) -> Result<Ast> {
    parse_with_flags(pattern, Flags::empty())
}

/// Parse a pattern with initial modifier flags, as if it started with the
/// matching `(?...)` sequence.
pub fn parse_with_flags(pattern: &str, flags: Flags) -> Result<Ast> {
    Parser::new(pattern, flags).run()
}

pub(crate) struct Parser {
    chars: Vec<char>,
    pos: usize,
    flags: Flags,
    nodes: Vec<Expr>,
    capture_names: Vec<String>,
    /// Tracks of a bare `(?flags)` sequence, waiting to join the next unit.
    pending_mods: Option<TrackSet>,
}

impl Parser {
    fn new(pattern: &str, flags: Flags) -> Self {
        Self {
            chars: pattern.chars().collect(),
            pos: 0,
            flags,
            nodes: Vec::new(),
            capture_names: Vec::new(),
            pending_mods: None,
        }
    }

    fn run(mut self) -> Result<Ast> {
        let width = self.chars.len() as u32;
        let root = self.alternation()?;
        if !self.at_end() {
            return Err(match self.peek() {
                Some(')') => Error::UnexpectedCloseParen,
                _ => Error::UnsupportedGroup,
            });
        }
        // the root cover must span the whole pattern
        let _ = self.nodes[root.index()]
            .tracks
            .finalize_top(Span::new(0, width));
        Ok(Ast::new(self.nodes, root, width))
    }

    pub(super) fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub(super) fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub(super) fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    pub(super) fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// Current position as a codepoint offset.
    pub(super) fn offset(&self) -> u32 {
        self.pos as u32
    }

    pub(super) fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.offset())
    }

    pub(super) fn push(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.nodes.len());
        self.nodes.push(expr);
        id
    }

    pub(super) fn node(&self, id: ExprId) -> &Expr {
        &self.nodes[id.index()]
    }

    pub(super) fn node_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.nodes[id.index()]
    }

    /// The track covering a finished unit in full. Every production leaves
    /// its node with one, so a miss is a parser bug.
    pub(super) fn cover_of(&self, id: ExprId) -> Track {
        match self.node(id).tracks.cover() {
            Some(track) => track,
            None => panic!("expression {} has no covering track", id.index()),
        }
    }

    /// Tracks of a pending bare `(?flags)` sequence; the next unit absorbs
    /// them into its own set.
    pub(super) fn seeded_tracks(&mut self) -> TrackSet {
        self.pending_mods.take().unwrap_or_default()
    }

    /// Source order for composition part lists.
    pub(super) fn sort_parts(parts: &mut [Track]) {
        parts.sort_by(track_order);
    }
}

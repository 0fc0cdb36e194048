//! Arena-backed syntax tree with per-node track sets.

use rexplain_core::{Annotation, Flags, Op, Span, Track, TrackSet, track_order};

/// Index of an [`Expr`] in its [`Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(u32);

impl ExprId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One syntax-tree node. Children are arena indices; every track the node
/// contributed to the output lives in its own `tracks` set.
#[derive(Debug, Clone)]
pub struct Expr {
    pub op: Op,
    pub flags: Flags,
    pub children: Vec<ExprId>,
    pub runes: Vec<char>,
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub name: Option<String>,
    pub tracks: TrackSet,
}

impl Expr {
    pub(crate) fn new(op: Op, flags: Flags) -> Self {
        Self {
            op,
            flags,
            children: Vec::new(),
            runes: Vec::new(),
            min: None,
            max: None,
            name: None,
            tracks: TrackSet::new(),
        }
    }
}

/// The parsed pattern: an expression arena, its root, and the pattern
/// width in codepoints.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Expr>,
    root: ExprId,
    width: u32,
}

impl Ast {
    pub(crate) fn new(nodes: Vec<Expr>, root: ExprId, width: u32) -> Self {
        Self { nodes, root, width }
    }

    pub fn root(&self) -> ExprId {
        self.root
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.nodes[id.index()]
    }

    pub fn exprs(&self) -> impl Iterator<Item = &Expr> {
        self.nodes.iter()
    }

    /// Pattern length in codepoints; all annotation offsets fall in
    /// `[0, width]`.
    pub fn width(&self) -> u32 {
        self.width
    }

    fn collect<'a, F, I>(&'a self, pick: F) -> Vec<Annotation>
    where
        F: Fn(&'a Expr) -> I,
        I: Iterator<Item = &'a Track>,
    {
        let mut tracks: Vec<&Track> = self
            .nodes
            .iter()
            .flat_map(|expr| pick(expr))
            .filter(|t| !t.span().is_empty())
            .collect();
        tracks.sort_by(|a, b| track_order(a, b));
        tracks.into_iter().map(|t| t.annotation()).collect()
    }

    /// Every annotation of the pattern, zero-width entries dropped,
    /// ordered by start offset with wider spans first on ties.
    pub fn annotations(&self) -> Vec<Annotation> {
        self.collect(|expr| expr.tracks.all_tracks())
    }

    /// Only the elementary token annotations. These tile the pattern
    /// without gaps or overlaps.
    pub fn elementary(&self) -> Vec<Annotation> {
        self.collect(|expr| expr.tracks.elementary().iter())
    }

    /// The single annotation covering the whole pattern.
    pub fn topmost(&self) -> Annotation {
        self.nodes[self.root.index()]
            .tracks
            .finalize_top(Span::new(0, self.width))
            .annotation()
    }
}

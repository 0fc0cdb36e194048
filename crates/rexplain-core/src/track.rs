//! Tracks: spans frozen together with their descriptions.

use serde::Serialize;

use crate::span::Span;

/// A span whose description has not been generated yet.
///
/// Freezing consumes the pending track, so a span can be described at most
/// once; a frozen [`Track`] is immutable from then on.
#[derive(Debug, Clone)]
pub struct PendingTrack {
    span: Span,
}

impl PendingTrack {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Freeze with a plain description.
    pub fn freeze(self, description: String) -> Track {
        Track {
            span: self.span,
            description,
            omit_in_composed: false,
            negated: false,
            join_text: None,
        }
    }

    /// Freeze a structural token. Omitted tracks never appear in the
    /// bracketed part list of a composed description.
    pub fn freeze_token(self, description: String, negated: bool) -> Track {
        Track {
            span: self.span,
            description,
            omit_in_composed: true,
            negated,
            join_text: None,
        }
    }

    /// Freeze with a distinct phrase for composed part lists. Used for
    /// POSIX classes, whose own description carries a `POSIX class:` prefix
    /// that the enclosing class description drops.
    pub fn freeze_with_join(self, description: String, join_text: String) -> Track {
        Track {
            span: self.span,
            description,
            omit_in_composed: false,
            negated: false,
            join_text: Some(join_text),
        }
    }
}

/// An immutable annotated range of the source pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    span: Span,
    description: String,
    omit_in_composed: bool,
    negated: bool,
    join_text: Option<String>,
}

impl Track {
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Structural tokens are skipped when joining part descriptions.
    pub fn omitted_in_composed(&self) -> bool {
        self.omit_in_composed
    }

    /// Set for the `[^` opener; propagates negation to the class phrase.
    pub fn negated(&self) -> bool {
        self.negated
    }

    /// Phrase contributed to an enclosing composed description.
    pub fn join_text(&self) -> &str {
        self.join_text.as_deref().unwrap_or(&self.description)
    }

    /// Copy of this track narrowed or shifted to `span`. The inserter uses
    /// this to build remainders when composed tracks collide.
    pub fn with_span(&self, span: Span) -> Track {
        Track {
            span,
            description: self.description.clone(),
            omit_in_composed: self.omit_in_composed,
            negated: self.negated,
            join_text: self.join_text.clone(),
        }
    }

    pub fn annotation(&self) -> Annotation {
        Annotation {
            start: self.span.start(),
            end: self.span.end(),
            description: self.description.clone(),
        }
    }
}

/// The externally visible form of a track: plain offsets plus description,
/// serializable as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub start: u32,
    pub end: u32,
    pub description: String,
}

//! Core data structures for regex source annotation.
//!
//! The engine records, for every syntactic unit of a pattern, the exact
//! codepoint range it occupies and a human-readable description of what that
//! unit means, then composes those elementary spans into higher-level spans
//! without ever producing overlaps within one composition level.
//!
//! Layers, leaves first:
//! - [`Span`]: half-open `[start, end)` codepoint interval
//! - [`Track`]: a span plus its frozen description ([`PendingTrack`] is the
//!   not-yet-described precursor)
//! - [`TrackSet`]: per-AST-node container exposing the construction protocol
//!   the external parser drives (`record_*`, `compose`, `concat`,
//!   `finalize_top`)
//!
//! This crate has no grammar knowledge. The parser hands it an operator tag,
//! flags, and node data through [`NodeSummary`]; token order, reduction
//! order, and nesting stay the parser's business.

mod describe;
mod node;
mod phrases;
mod span;
mod track;
mod track_set;


pub use node::{Flags, NodeSummary, Op};
pub use phrases::posix_phrase;
pub use span::Span;
pub use track::{Annotation, PendingTrack, Track};
pub use track_set::{TrackSet, track_order};

//! Per-node track containers and the overlap-resolving composed inserter.

use std::cmp::Ordering;

use crate::describe::describe;
use crate::node::NodeSummary;
use crate::phrases::{
    display_rune, posix_phrase, repeat_phrase, MOD_PHRASES, PERL_PHRASES, TOKEN_PHRASES,
};
use crate::span::Span;
use crate::track::{PendingTrack, Track};

/// Global presentation order: start ascending, wider spans first on ties.
/// The single definition of track order; sorted part lists and flattened
/// annotation output both go through it.
pub fn track_order(a: &Track, b: &Track) -> Ordering {
    a.span()
        .start()
        .cmp(&b.span().start())
        .then(b.span().width().cmp(&a.span().width()))
}

/// The tracks of one syntax-tree node.
///
/// `elementary` tracks tile the node's own tokens and never overlap.
/// `composed` holds covering tracks of absorbed sub-structure, kept
/// mutually disjoint by [`TrackSet::insert_composed`]. `topmost`, when
/// present, is the single track covering the node in full.
///
/// The driving parser records tokens left to right, composes once per
/// reduction, and concatenates sets only when fusing adjacent literal
/// units into one node.
#[derive(Debug, Clone, Default)]
pub struct TrackSet {
    elementary: Vec<Track>,
    composed: Vec<Track>,
    topmost: Option<Track>,
}

impl TrackSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elementary(&self) -> &[Track] {
        &self.elementary
    }

    pub fn composed(&self) -> &[Track] {
        &self.composed
    }

    pub fn topmost(&self) -> Option<&Track> {
        self.topmost.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.elementary.is_empty() && self.composed.is_empty() && self.topmost.is_none()
    }

    /// Every track of this set: topmost, composed, then elementary.
    /// Callers sort after flattening across sets.
    pub fn all_tracks(&self) -> impl Iterator<Item = &Track> {
        self.topmost
            .iter()
            .chain(self.composed.iter())
            .chain(self.elementary.iter())
    }

    /// Smallest span covering every track in the set.
    pub fn range(&self) -> Option<Span> {
        let mut tracks = self.all_tracks();
        let first = tracks.next()?.span();
        Some(tracks.fold(first, |acc, t| acc.union(t.span())))
    }

    /// The single track covering this node in full, if one exists: the
    /// topmost composed track, or a lone elementary track.
    pub fn cover(&self) -> Option<Track> {
        if let Some(top) = &self.topmost {
            return Some(top.clone());
        }
        if self.composed.is_empty() && self.elementary.len() == 1 {
            return Some(self.elementary[0].clone());
        }
        None
    }

    fn push_elementary(&mut self, track: Track) {
        let at = self
            .elementary
            .partition_point(|t| track_order(t, &track) != Ordering::Greater);
        self.elementary.insert(at, track);
    }

    /// Record a metacharacter, shorthand, or POSIX class token. `key` is
    /// the raw token text, with flag-sensitive tokens suffixed `:flag` by
    /// the caller. Unrecognized keys fall back to a literal description.
    pub fn record_token(&mut self, span: Span, key: &str) {
        assert!(!key.is_empty(), "recording a track for an empty token");
        assert!(
            !span.is_empty(),
            "zero-width span for token {key:?} at {}",
            span.start()
        );
        if let Some(name) = key.strip_prefix("[:").and_then(|k| k.strip_suffix(":]")) {
            let phrase = match posix_phrase(name) {
                Some(p) => p,
                None => panic!("unknown POSIX class name {name:?}"),
            };
            let track =
                PendingTrack::new(span).freeze_with_join(format!("POSIX class:{phrase}"), phrase);
            self.push_elementary(track);
            return;
        }
        if let Some(phrase) = PERL_PHRASES.get(key) {
            self.push_elementary(PendingTrack::new(span).freeze((*phrase).to_string()));
            return;
        }
        if let Some(entry) = TOKEN_PHRASES.get(key) {
            let pending = PendingTrack::new(span);
            let track = if entry.omit {
                pending.freeze_token(entry.text.to_string(), entry.negated)
            } else {
                pending.freeze(entry.text.to_string())
            };
            self.push_elementary(track);
            return;
        }
        let runes: Vec<char> = key.chars().collect();
        self.record_literal(span, &runes);
    }

    /// Record literal codepoints occupying `span`.
    pub fn record_literal(&mut self, span: Span, runes: &[char]) {
        assert!(
            !span.is_empty(),
            "zero-width span for literal at {}",
            span.start()
        );
        let description = if runes.len() == 1 {
            format!("literal '{}'", display_rune(runes[0]))
        } else {
            let text: String = runes.iter().map(|&c| display_rune(c)).collect();
            format!("string \"{text}\"")
        };
        self.push_elementary(PendingTrack::new(span).freeze(description));
    }

    /// Record a `{min,max}` bounded-repeat token.
    pub fn record_repeat(&mut self, span: Span, min: Option<u32>, max: Option<u32>) {
        assert!(
            !span.is_empty(),
            "zero-width span for repeat at {}",
            span.start()
        );
        let description = format!("quantifier: {}", repeat_phrase(min, max));
        self.push_elementary(PendingTrack::new(span).freeze_token(description, false));
    }

    /// Record the `?` suffix that makes the preceding quantifier lazy.
    pub fn record_non_greedy(&mut self, span: Span) {
        let track = PendingTrack::new(span).freeze_token("quantifier: non-greedy".to_string(), false);
        self.push_elementary(track);
    }

    /// Record a `lo-hi` range inside a character class.
    pub fn record_range(&mut self, span: Span, lo: char, hi: char) {
        let description = format!("range {} to {}", display_rune(lo), display_rune(hi));
        self.push_elementary(PendingTrack::new(span).freeze(description));
    }

    /// Record one inline modifier letter. Modifiers inside a scoped group
    /// are structural and pass `omit`; a bare `(?flags)` sequence keeps its
    /// letters visible so they join the next composed description.
    pub fn record_mod(&mut self, span: Span, letter: char, omit: bool) {
        let phrase = match MOD_PHRASES.get(&letter) {
            Some(p) => *p,
            None => panic!("unknown modifier letter {letter:?}"),
        };
        let pending = PendingTrack::new(span);
        let track = if omit {
            pending.freeze_token(phrase.to_string(), false)
        } else {
            pending.freeze(phrase.to_string())
        };
        self.push_elementary(track);
    }

    /// Record a zero-width empty-string match at `pos`. The only track
    /// allowed to be zero-width; output filtering drops it.
    pub fn record_empty_match(&mut self, pos: u32) {
        let track = PendingTrack::new(Span::empty(pos)).freeze("empty string".to_string());
        self.push_elementary(track);
    }

    /// Build and install the covering track of this node from its part
    /// tracks. A previous topmost is demoted into the composed list. A
    /// single-part composition is the identity and installs nothing.
    pub fn compose(&mut self, parts: &[Track], node: &NodeSummary) -> Track {
        assert!(!parts.is_empty(), "composing an empty part list");
        if let Some(old) = self.topmost.take() {
            self.insert_composed(old);
        }
        if parts.len() == 1 {
            return parts[0].clone();
        }
        let span = parts
            .iter()
            .skip(1)
            .fold(parts[0].span(), |acc, t| acc.union(t.span()));
        let track = PendingTrack::new(span).freeze(describe(node, parts));
        self.topmost = Some(track.clone());
        track
    }

    /// Absorb `other`, which must sit immediately to the right of this set.
    /// Both covering tracks are demoted; the caller composes a new one.
    pub fn concat(&mut self, mut other: TrackSet) {
        if let (Some(a), Some(b)) = (self.range(), other.range()) {
            assert!(
                a.end() == b.start(),
                "concatenating non-adjacent track sets [{},{}) and [{},{})",
                a.start(),
                a.end(),
                b.start(),
                b.end()
            );
        }
        if let Some(top) = self.topmost.take() {
            self.insert_composed(top);
        }
        if let Some(top) = other.topmost.take() {
            self.insert_composed(top);
        }
        for track in other.composed.drain(..) {
            self.insert_composed(track);
        }
        for track in other.elementary.drain(..) {
            self.push_elementary(track);
        }
    }

    /// Insert a composed track, resolving overlaps so the composed list
    /// stays mutually disjoint.
    ///
    /// Same span, same description is a no-op. Same span with a different
    /// description is an internal error. Otherwise existing tracks fully
    /// inside the new one are dropped, an existing track strictly
    /// containing the new one is split around it, and partial overlaps
    /// truncate the existing track to its non-overlapped part. Remainders
    /// inherit the existing track's description.
    pub fn insert_composed(&mut self, track: Track) {
        if let Some(existing) = self.composed.iter().find(|t| t.span() == track.span()) {
            if existing.description() == track.description() {
                return;
            }
            panic!(
                "conflicting composed tracks at [{},{}): {:?} vs {:?}",
                track.span().start(),
                track.span().end(),
                existing.description(),
                track.description()
            );
        }
        let mut resolved = Vec::with_capacity(self.composed.len() + 1);
        for existing in self.composed.drain(..) {
            if !existing.span().overlaps(track.span()) {
                resolved.push(existing);
                continue;
            }
            if track.span().contains(existing.span()) {
                continue;
            }
            if existing.span().contains(track.span()) {
                let left = Span::new(existing.span().start(), track.span().start());
                let right = Span::new(track.span().end(), existing.span().end());
                if !left.is_empty() {
                    resolved.push(existing.with_span(left));
                }
                if !right.is_empty() {
                    resolved.push(existing.with_span(right));
                }
                continue;
            }
            let remainder = if existing.span().start() < track.span().start() {
                Span::new(existing.span().start(), track.span().start())
            } else {
                Span::new(track.span().end(), existing.span().end())
            };
            resolved.push(existing.with_span(remainder));
        }
        resolved.push(track);
        resolved.sort_by(track_order);
        self.composed = resolved;
    }

    /// Resolve the single track covering the whole node, which must span
    /// exactly `expected`. Panics when the set has no such cover; that
    /// means a reduction step was skipped.
    pub fn finalize_top(&self, expected: Span) -> Track {
        let top = match self.cover() {
            Some(t) => t,
            None => panic!(
                "no covering track for [{},{})",
                expected.start(),
                expected.end()
            ),
        };
        assert!(
            top.span() == expected,
            "covering track [{},{}) does not span [{},{})",
            top.span().start(),
            top.span().end(),
            expected.start(),
            expected.end()
        );
        top
    }
}

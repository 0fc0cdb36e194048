//! Grammar productions.
//!
//! One method per production. Each consumes its tokens, records them into
//! the node's track set, and composes the node's covering track before
//! returning, so the parent can clone that cover into its own part list.

use rexplain_core::{Flags, NodeSummary, Op, Span, Track, TrackSet, posix_phrase};

use super::Parser;
use crate::ast::{Expr, ExprId};
use crate::{Error, Result};

fn quant_op(c: char) -> Op {
    match c {
        '*' => Op::Star,
        '+' => Op::Plus,
        _ => Op::Quest,
    }
}

impl Parser {
    /// alternation := branch ('|' branch)*
    pub(super) fn alternation(&mut self) -> Result<ExprId> {
        let mut branches = vec![self.branch()?];
        let mut bars: Vec<Span> = Vec::new();
        while self.peek() == Some('|') {
            let s = self.offset();
            self.bump();
            bars.push(Span::new(s, s + 1));
            branches.push(self.branch()?);
        }
        if bars.is_empty() {
            return Ok(branches[0]);
        }
        let mut set = TrackSet::new();
        for &bar in &bars {
            set.record_token(bar, "|");
        }
        let mut parts = set.elementary().to_vec();
        for &b in &branches {
            parts.push(self.cover_of(b));
        }
        Self::sort_parts(&mut parts);
        let summary = NodeSummary::new(Op::Alternate, self.flags);
        set.compose(&parts, &summary);
        let mut node = Expr::new(Op::Alternate, self.flags);
        node.tracks = set;
        node.children = branches;
        Ok(self.push(node))
    }

    /// branch := unit* — a possibly empty run of quantified units.
    fn branch(&mut self) -> Result<ExprId> {
        let mut units: Vec<ExprId> = Vec::new();
        loop {
            match self.peek() {
                None | Some('|') | Some(')') => break,
                _ => {}
            }
            if let Some(unit) = self.unit()? {
                let unit = self.quantify(unit)?;
                units.push(unit);
            }
        }
        // bare modifiers with nothing after them match the empty string
        if let Some(mods) = self.pending_mods.take() {
            let trailing = self.empty_with_mods(mods);
            units.push(trailing);
        }
        self.merge_literal_runs(&mut units);
        match units.len() {
            0 => Ok(self.empty_node(self.offset())),
            1 => Ok(units[0]),
            _ => {
                let parts: Vec<Track> = units.iter().map(|&u| self.cover_of(u)).collect();
                let mut node = Expr::new(Op::Concat, self.flags);
                let summary = NodeSummary::new(Op::Concat, self.flags);
                node.tracks.compose(&parts, &summary);
                node.children = units;
                Ok(self.push(node))
            }
        }
    }

    /// One grammar unit. `None` means a bare `(?flags)` sequence was
    /// consumed and its tracks are pending for the next unit.
    fn unit(&mut self) -> Result<Option<ExprId>> {
        match self.peek() {
            Some('(') => self.group(),
            Some('[') => self.class().map(Some),
            Some('\\') => self.escape().map(Some),
            Some('.') => {
                let start = self.offset();
                self.bump();
                let (key, op) = if self.flags.contains(Flags::DOT_MATCHES_NL) {
                    (".:s", Op::AnyChar)
                } else {
                    (".", Op::AnyCharNotNl)
                };
                Ok(Some(self.token_unit(start, key, op)))
            }
            Some('^') => {
                let start = self.offset();
                self.bump();
                let key = if self.flags.contains(Flags::MULTI_LINE) {
                    "^:m"
                } else {
                    "^"
                };
                Ok(Some(self.token_unit(start, key, Op::BeginLine)))
            }
            Some('$') => {
                let start = self.offset();
                self.bump();
                let key = if self.flags.contains(Flags::MULTI_LINE) {
                    "$:m"
                } else {
                    "$"
                };
                Ok(Some(self.token_unit(start, key, Op::EndLine)))
            }
            Some('*' | '+' | '?') => Err(Error::MissingRepeatArgument),
            Some('{') => {
                if self.scan_repeat().is_some() {
                    Err(Error::MissingRepeatArgument)
                } else {
                    // not a repetition, so the brace is an ordinary literal
                    let start = self.offset();
                    self.bump();
                    Ok(Some(self.literal_unit(start, '{')))
                }
            }
            Some(c) => {
                let start = self.offset();
                self.bump();
                Ok(Some(self.literal_unit(start, c)))
            }
            None => panic!("unit called at end of pattern"),
        }
    }

    fn literal_unit(&mut self, start: u32, c: char) -> ExprId {
        let mut set = self.seeded_tracks();
        let seeded = !set.is_empty();
        set.record_literal(self.span_from(start), &[c]);
        let runes = vec![c];
        if seeded {
            let parts = set.elementary().to_vec();
            let summary = NodeSummary::new(Op::Literal, self.flags).with_runes(&runes);
            set.compose(&parts, &summary);
        }
        let mut node = Expr::new(Op::Literal, self.flags);
        node.runes = runes;
        node.tracks = set;
        self.push(node)
    }

    /// A unit made of one recorded token: dot, anchor, or class shorthand.
    fn token_unit(&mut self, start: u32, key: &str, op: Op) -> ExprId {
        let mut set = self.seeded_tracks();
        let seeded = !set.is_empty();
        set.record_token(self.span_from(start), key);
        if seeded {
            let parts = set.elementary().to_vec();
            let summary = NodeSummary::new(op, self.flags);
            set.compose(&parts, &summary);
        }
        let mut node = Expr::new(op, self.flags);
        node.tracks = set;
        self.push(node)
    }

    fn empty_node(&mut self, pos: u32) -> ExprId {
        let mut node = Expr::new(Op::EmptyMatch, self.flags);
        node.tracks.record_empty_match(pos);
        self.push(node)
    }

    /// Bare modifiers at the end of a branch compose with an explicit
    /// empty match so their tracks still have a covering parent.
    fn empty_with_mods(&mut self, mut set: TrackSet) -> ExprId {
        set.record_empty_match(self.offset());
        let parts = set.elementary().to_vec();
        let summary = NodeSummary::new(Op::EmptyMatch, self.flags);
        set.compose(&parts, &summary);
        let mut node = Expr::new(Op::EmptyMatch, self.flags);
        node.tracks = set;
        self.push(node)
    }

    /// Wrap `child` in quantifier nodes. At most one quantifier may apply;
    /// `a**` is rejected while `a*?` reads the `?` as the laziness marker.
    fn quantify(&mut self, child: ExprId) -> Result<ExprId> {
        let mut current = child;
        let mut wrapped = false;
        loop {
            let next = match self.peek() {
                Some(c @ ('*' | '+' | '?')) => Some((quant_op(c), None, 1usize)),
                Some('{') => self
                    .scan_repeat()
                    .map(|(min, max, len)| (Op::Repeat, Some((min, max)), len)),
                _ => None,
            };
            let Some((op, bounds, len)) = next else { break };
            if wrapped {
                return Err(Error::NestedRepetition);
            }
            let qstart = self.offset();
            for _ in 0..len {
                self.bump();
            }
            let mut set = TrackSet::new();
            let (min, max) = match bounds {
                Some((min, max)) => {
                    if min > 1000 || max.unwrap_or(0) > 1000 {
                        return Err(Error::InvalidRepeatSize);
                    }
                    if let Some(m) = max {
                        if m < min {
                            return Err(Error::InvalidRepeatSize);
                        }
                    }
                    let min = Some(min as u32);
                    let max = max.map(|m| m as u32);
                    set.record_repeat(self.span_from(qstart), min, max);
                    (min, max)
                }
                None => {
                    let key = match op {
                        Op::Star => "*",
                        Op::Plus => "+",
                        _ => "?",
                    };
                    set.record_token(self.span_from(qstart), key);
                    (None, None)
                }
            };
            let mut suffix = false;
            if self.peek() == Some('?') {
                let p = self.offset();
                self.bump();
                set.record_non_greedy(Span::new(p, p + 1));
                suffix = true;
            }
            // the U flag flips what the suffix means
            let mut node_flags = self.flags;
            node_flags.remove(Flags::NON_GREEDY);
            if suffix != self.flags.contains(Flags::UNGREEDY) {
                node_flags.insert(Flags::NON_GREEDY);
            }
            let mut parts = set.elementary().to_vec();
            parts.push(self.cover_of(current));
            Self::sort_parts(&mut parts);
            let summary = NodeSummary::new(op, node_flags).with_bounds(min, max);
            set.compose(&parts, &summary);
            let mut node = Expr::new(op, node_flags);
            node.min = min;
            node.max = max;
            node.tracks = set;
            node.children = vec![current];
            current = self.push(node);
            wrapped = true;
        }
        Ok(current)
    }

    /// Lookahead for `{n}`, `{n,}`, `{n,m}`. Returns bounds and the token
    /// length without consuming; a malformed brace is not a repetition.
    fn scan_repeat(&self) -> Option<(u64, Option<u64>, usize)> {
        let mut i = 1;
        let mut min: u64 = 0;
        let mut digits = 0;
        while let Some(d) = self.peek_at(i).and_then(|c| c.to_digit(10)) {
            min = min.saturating_mul(10).saturating_add(d as u64);
            digits += 1;
            i += 1;
        }
        if digits == 0 {
            return None;
        }
        match self.peek_at(i) {
            Some('}') => Some((min, Some(min), i + 1)),
            Some(',') => {
                i += 1;
                let mut max: u64 = 0;
                let mut mdigits = 0;
                while let Some(d) = self.peek_at(i).and_then(|c| c.to_digit(10)) {
                    max = max.saturating_mul(10).saturating_add(d as u64);
                    mdigits += 1;
                    i += 1;
                }
                match self.peek_at(i) {
                    Some('}') if mdigits > 0 => Some((min, Some(max), i + 1)),
                    Some('}') => Some((min, None, i + 1)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Fuse adjacent literal units into one node so `ab` reads as the
    /// string "ab". Runs only merge across identical flags, and a
    /// quantified unit is no longer a literal, so `ab*` keeps `a` apart.
    fn merge_literal_runs(&mut self, units: &mut Vec<ExprId>) {
        let mut out: Vec<ExprId> = Vec::new();
        let mut run: Vec<ExprId> = Vec::new();
        for &unit in units.iter() {
            if self.node(unit).op != Op::Literal {
                self.flush_run(&mut run, &mut out);
                out.push(unit);
                continue;
            }
            if let Some(&prev) = run.last() {
                if self.node(prev).flags != self.node(unit).flags {
                    self.flush_run(&mut run, &mut out);
                }
            }
            run.push(unit);
        }
        self.flush_run(&mut run, &mut out);
        *units = out;
    }

    fn flush_run(&mut self, run: &mut Vec<ExprId>, out: &mut Vec<ExprId>) {
        match run.len() {
            0 => {}
            1 => out.push(run[0]),
            _ => {
                let merged = self.merge_run(run);
                out.push(merged);
            }
        }
        run.clear();
    }

    fn merge_run(&mut self, run: &[ExprId]) -> ExprId {
        let flags = self.node(run[0]).flags;
        let mut runes: Vec<char> = Vec::new();
        for &id in run {
            runes.extend(self.node(id).runes.iter().copied());
        }
        // a member is plain if its set is a single elementary track
        let plain = run.iter().all(|&id| {
            let t = &self.node(id).tracks;
            t.topmost().is_none() && t.composed().is_empty() && t.elementary().len() == 1
        });
        let mut node = Expr::new(Op::Literal, flags);
        node.runes = runes.clone();
        if plain {
            // replace the member tracks with one fused literal track
            let mut span: Option<Span> = None;
            for &id in run {
                let set = std::mem::take(&mut self.node_mut(id).tracks);
                if let Some(r) = set.range() {
                    span = Some(span.map_or(r, |s| s.union(r)));
                }
            }
            let span = match span {
                Some(s) => s,
                None => panic!("merging a literal run without tracks"),
            };
            node.tracks.record_literal(span, &runes);
        } else {
            // escapes and quoted literals keep their inner tracks; the run
            // composes over the member covers instead
            let covers: Vec<Track> = run.iter().map(|&id| self.cover_of(id)).collect();
            let mut set = std::mem::take(&mut self.node_mut(run[0]).tracks);
            for &id in &run[1..] {
                let other = std::mem::take(&mut self.node_mut(id).tracks);
                set.concat(other);
            }
            let summary = NodeSummary::new(Op::Literal, flags).with_runes(&runes);
            set.compose(&covers, &summary);
            node.tracks = set;
        }
        node.children = run.to_vec();
        self.push(node)
    }

    /// group := '(' alternation ')' and every `(?...)` form.
    fn group(&mut self) -> Result<Option<ExprId>> {
        let start = self.offset();
        self.bump(); // '('
        if self.peek() != Some('?') {
            let opener = Span::new(start, start + 1);
            return self.finish_capture(opener, None).map(Some);
        }
        self.bump(); // '?'
        match self.peek() {
            Some('P') => {
                self.bump();
                let name = self.capture_name()?;
                let opener = self.span_from(start);
                self.finish_capture(opener, Some(name)).map(Some)
            }
            Some('<') => {
                if matches!(self.peek_at(1), Some('=') | Some('!')) {
                    return Err(Error::UnsupportedGroup);
                }
                let name = self.capture_name()?;
                let opener = self.span_from(start);
                self.finish_capture(opener, Some(name)).map(Some)
            }
            Some('=') | Some('!') | Some('>') | Some('\'') => Err(Error::UnsupportedGroup),
            _ => self.flag_group(start),
        }
    }

    /// `<name>` of a named capture, validated and registered.
    fn capture_name(&mut self) -> Result<String> {
        if self.peek() != Some('<') {
            return Err(Error::InvalidNamedCapture);
        }
        self.bump();
        let mut name = String::new();
        loop {
            match self.peek() {
                Some('>') => {
                    self.bump();
                    break;
                }
                Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
                    name.push(c);
                    self.bump();
                }
                _ => return Err(Error::InvalidNamedCapture),
            }
        }
        if name.is_empty() {
            return Err(Error::InvalidNamedCapture);
        }
        if self.capture_names.iter().any(|n| n == &name) {
            return Err(Error::DuplicateCaptureName(name));
        }
        self.capture_names.push(name.clone());
        Ok(name)
    }

    /// Body and closer of a capturing group. The whole opener, named or
    /// not, is one elementary track.
    fn finish_capture(&mut self, opener: Span, name: Option<String>) -> Result<ExprId> {
        let saved = self.flags;
        let mut set = self.seeded_tracks();
        set.record_token(opener, "(");
        let child = self.alternation()?;
        if self.peek() != Some(')') {
            return Err(Error::MissingCloseParen);
        }
        let s = self.offset();
        self.bump();
        set.record_token(Span::new(s, s + 1), ")");
        self.flags = saved;
        let mut parts = set.elementary().to_vec();
        parts.push(self.cover_of(child));
        Self::sort_parts(&mut parts);
        let summary = NodeSummary::new(Op::Capture, self.flags).with_name(name.as_deref());
        set.compose(&parts, &summary);
        let mut node = Expr::new(Op::Capture, self.flags);
        node.name = name;
        node.tracks = set;
        node.children = vec![child];
        Ok(self.push(node))
    }

    /// Everything after `(?` that is not a named capture: modifier
    /// letters, then `:` for a scoped group or `)` for bare flags.
    fn flag_group(&mut self, start: u32) -> Result<Option<ExprId>> {
        let mut letters: Vec<(u32, char)> = Vec::new();
        let mut add = Flags::empty();
        let mut remove = Flags::empty();
        let mut negating = false;
        loop {
            match self.peek() {
                Some(c @ ('i' | 'm' | 's' | 'U')) => {
                    letters.push((self.offset(), c));
                    let flag = match c {
                        'i' => Flags::CASE_INSENSITIVE,
                        'm' => Flags::MULTI_LINE,
                        's' => Flags::DOT_MATCHES_NL,
                        _ => Flags::UNGREEDY,
                    };
                    if negating {
                        remove.insert(flag);
                    } else {
                        add.insert(flag);
                    }
                    self.bump();
                }
                Some('-') if !negating => {
                    letters.push((self.offset(), '-'));
                    negating = true;
                    self.bump();
                }
                Some(':') => return self.scoped_group(start, &letters, add, remove).map(Some),
                Some(')') => {
                    if letters.is_empty() {
                        return Err(Error::UnsupportedGroup);
                    }
                    self.bare_flags(start, &letters, add, remove);
                    return Ok(None);
                }
                Some(c) => return Err(Error::InvalidFlag(c)),
                None => return Err(Error::MissingCloseParen),
            }
        }
    }

    /// `(?flags:...)`. Modifier letters are structural here, so they stay
    /// out of the composed description.
    fn scoped_group(
        &mut self,
        start: u32,
        letters: &[(u32, char)],
        add: Flags,
        remove: Flags,
    ) -> Result<ExprId> {
        let saved = self.flags;
        self.flags.insert(add);
        self.flags.remove(remove);
        let mut set = self.seeded_tracks();
        set.record_token(Span::new(start, start + 2), "(?");
        for &(pos, c) in letters {
            set.record_mod(Span::new(pos, pos + 1), c, true);
        }
        let s = self.offset();
        self.bump(); // ':'
        set.record_token(Span::new(s, s + 1), ":");
        let child = self.alternation()?;
        if self.peek() != Some(')') {
            self.flags = saved;
            return Err(Error::MissingCloseParen);
        }
        let cs = self.offset();
        self.bump();
        set.record_token(Span::new(cs, cs + 1), ")");
        self.flags = saved;
        let mut parts = set.elementary().to_vec();
        parts.push(self.cover_of(child));
        Self::sort_parts(&mut parts);
        let summary = NodeSummary::new(Op::Group, self.flags);
        set.compose(&parts, &summary);
        let mut node = Expr::new(Op::Group, self.flags);
        node.tracks = set;
        node.children = vec![child];
        Ok(self.push(node))
    }

    /// `(?flags)`. Changes the flags in place for the rest of the scope;
    /// the tracks wait for the next unit. Letters stay visible so they
    /// join that unit's composed description.
    fn bare_flags(&mut self, start: u32, letters: &[(u32, char)], add: Flags, remove: Flags) {
        self.flags.insert(add);
        self.flags.remove(remove);
        let mut set = self.seeded_tracks();
        set.record_token(Span::new(start, start + 2), "(?");
        for &(pos, c) in letters {
            set.record_mod(Span::new(pos, pos + 1), c, false);
        }
        let s = self.offset();
        self.bump(); // ')'
        set.record_token(Span::new(s, s + 1), ")");
        self.pending_mods = Some(set);
    }

    /// class := '[' '^'? item+ ']'
    fn class(&mut self) -> Result<ExprId> {
        let start = self.offset();
        self.bump(); // '['
        let mut set = self.seeded_tracks();
        let negated = self.peek() == Some('^');
        if negated {
            self.bump();
            set.record_token(Span::new(start, start + 2), "[^");
        } else {
            set.record_token(Span::new(start, start + 1), "[");
        }
        let mut items = 0usize;
        let mut only_literal: Option<char> = None;
        loop {
            match self.peek() {
                None => return Err(Error::MissingCloseBracket),
                Some(']') => {
                    if items == 0 {
                        return Err(Error::MissingCloseBracket);
                    }
                    let s = self.offset();
                    self.bump();
                    set.record_token(Span::new(s, s + 1), "]");
                    break;
                }
                Some('\\')
                    if matches!(self.peek_at(1), Some('d' | 'D' | 's' | 'S' | 'w' | 'W')) =>
                {
                    let s = self.offset();
                    self.bump();
                    let key = match self.bump() {
                        Some('d') => "\\d",
                        Some('D') => "\\D",
                        Some('s') => "\\s",
                        Some('S') => "\\S",
                        Some('w') => "\\w",
                        _ => "\\W",
                    };
                    set.record_token(Span::new(s, s + 2), key);
                    items += 1;
                    only_literal = None;
                }
                Some('[') if self.scan_posix().is_some() => {
                    self.posix_item(&mut set)?;
                    items += 1;
                    only_literal = None;
                }
                _ => {
                    let s = self.offset();
                    let lo = self.class_atom()?;
                    if self.peek() == Some('-')
                        && !matches!(self.peek_at(1), None | Some(']'))
                    {
                        self.bump(); // '-'
                        let hi = self.class_atom()?;
                        if lo > hi {
                            return Err(Error::InvalidCharRange);
                        }
                        set.record_range(self.span_from(s), lo, hi);
                        only_literal = None;
                    } else {
                        set.record_literal(self.span_from(s), &[lo]);
                        only_literal = if items == 0 { Some(lo) } else { None };
                    }
                    items += 1;
                }
            }
        }
        // a class holding one plain character is just that character
        let collapse = match only_literal {
            Some(c) if items == 1 && !negated => Some(c),
            _ => None,
        };
        let parts = set.elementary().to_vec();
        let (op, runes) = match collapse {
            Some(c) => (Op::Literal, vec![c]),
            None => (Op::CharClass, Vec::new()),
        };
        let summary = NodeSummary::new(op, self.flags).with_runes(&runes);
        set.compose(&parts, &summary);
        let mut node = Expr::new(op, self.flags);
        node.runes = runes;
        node.tracks = set;
        Ok(self.push(node))
    }

    /// Lookahead for `[:name:]` or `[:^name:]` at the cursor.
    fn scan_posix(&self) -> Option<(String, usize)> {
        if self.peek_at(1) != Some(':') {
            return None;
        }
        let mut i = 2;
        let mut name = String::new();
        if self.peek_at(i) == Some('^') {
            name.push('^');
            i += 1;
        }
        while let Some(c) = self.peek_at(i) {
            if c.is_ascii_lowercase() {
                name.push(c);
                i += 1;
            } else {
                break;
            }
        }
        if name.trim_start_matches('^').is_empty() {
            return None;
        }
        if self.peek_at(i) == Some(':') && self.peek_at(i + 1) == Some(']') {
            Some((name, i + 2))
        } else {
            None
        }
    }

    fn posix_item(&mut self, set: &mut TrackSet) -> Result<()> {
        let (name, len) = match self.scan_posix() {
            Some(found) => found,
            None => panic!("posix_item called without a POSIX class ahead"),
        };
        if posix_phrase(&name).is_none() {
            return Err(Error::InvalidPosixClass(name));
        }
        let s = self.offset();
        for _ in 0..len {
            self.bump();
        }
        set.record_token(Span::new(s, s + len as u32), &format!("[:{name}:]"));
        Ok(())
    }

    /// One class member character, possibly escaped.
    fn class_atom(&mut self) -> Result<char> {
        match self.bump() {
            None => Err(Error::MissingCloseBracket),
            Some('\\') => {
                let c = match self.peek() {
                    Some(c) => c,
                    None => return Err(Error::TrailingBackslash),
                };
                self.escape_char(c)
            }
            Some(c) => Ok(c),
        }
    }

    /// escape := '\' ... outside a character class.
    fn escape(&mut self) -> Result<ExprId> {
        let start = self.offset();
        self.bump(); // backslash
        let c = match self.peek() {
            Some(c) => c,
            None => return Err(Error::TrailingBackslash),
        };
        let class_key = match c {
            'd' => Some("\\d"),
            'D' => Some("\\D"),
            's' => Some("\\s"),
            'S' => Some("\\S"),
            'w' => Some("\\w"),
            'W' => Some("\\W"),
            _ => None,
        };
        if let Some(key) = class_key {
            self.bump();
            return Ok(self.token_unit(start, key, Op::CharClass));
        }
        let anchor = match c {
            'b' => Some(("\\b", Op::WordBoundary)),
            'B' => Some(("\\B", Op::NoWordBoundary)),
            'A' => Some(("\\A", Op::BeginText)),
            'z' => Some(("\\z", Op::EndText)),
            _ => None,
        };
        if let Some((key, op)) = anchor {
            self.bump();
            return Ok(self.token_unit(start, key, op));
        }
        if c == 'Q' {
            return self.quoted_literal(start);
        }
        self.escaped_literal(start, c)
    }

    /// An escaped character: the backslash and the decoded character are
    /// separate elementary tracks under one literal cover.
    fn escaped_literal(&mut self, start: u32, c: char) -> Result<ExprId> {
        let decoded = self.escape_char(c)?;
        let mut set = self.seeded_tracks();
        set.record_token(Span::new(start, start + 1), "\\");
        set.record_literal(self.span_from(start + 1), &[decoded]);
        let runes = vec![decoded];
        let parts = set.elementary().to_vec();
        let summary = NodeSummary::new(Op::Literal, self.flags).with_runes(&runes);
        set.compose(&parts, &summary);
        let mut node = Expr::new(Op::Literal, self.flags);
        node.runes = runes;
        node.tracks = set;
        Ok(self.push(node))
    }

    /// `\Q...\E`: everything between the markers is literal text. A
    /// missing `\E` quotes to the end of the pattern.
    fn quoted_literal(&mut self, start: u32) -> Result<ExprId> {
        self.bump(); // 'Q'
        let mut set = self.seeded_tracks();
        set.record_token(Span::new(start, start + 2), "\\Q");
        let content_start = self.offset();
        let mut runes: Vec<char> = Vec::new();
        let mut closer: Option<Span> = None;
        while let Some(c) = self.peek() {
            if c == '\\' && self.peek_at(1) == Some('E') {
                let s = self.offset();
                self.bump();
                self.bump();
                closer = Some(Span::new(s, s + 2));
                break;
            }
            runes.push(c);
            self.bump();
        }
        if runes.is_empty() {
            set.record_empty_match(content_start);
        } else {
            let span = Span::new(content_start, content_start + runes.len() as u32);
            set.record_literal(span, &runes);
        }
        if let Some(span) = closer {
            set.record_token(span, "\\E");
        }
        let op = if runes.is_empty() {
            Op::EmptyMatch
        } else {
            Op::Literal
        };
        let parts = set.elementary().to_vec();
        let summary = NodeSummary::new(op, self.flags).with_runes(&runes);
        set.compose(&parts, &summary);
        let mut node = Expr::new(op, self.flags);
        node.runes = runes;
        node.tracks = set;
        Ok(self.push(node))
    }

    /// Decode the character after a backslash; `c` is peeked, unconsumed.
    fn escape_char(&mut self, c: char) -> Result<char> {
        match c {
            'n' => {
                self.bump();
                Ok('\n')
            }
            't' => {
                self.bump();
                Ok('\t')
            }
            'r' => {
                self.bump();
                Ok('\r')
            }
            'f' => {
                self.bump();
                Ok('\x0c')
            }
            'v' => {
                self.bump();
                Ok('\x0b')
            }
            'a' => {
                self.bump();
                Ok('\x07')
            }
            'x' => {
                self.bump();
                self.hex_escape()
            }
            '0' => {
                self.bump();
                self.octal_escape()
            }
            '1'..='9' => Err(Error::InvalidEscape(c)),
            c if c.is_alphanumeric() => Err(Error::InvalidEscape(c)),
            _ => {
                self.bump();
                Ok(c)
            }
        }
    }

    /// `\xhh` or `\x{hex}` after the `x` is consumed.
    fn hex_escape(&mut self) -> Result<char> {
        if self.peek() == Some('{') {
            self.bump();
            let mut value: u32 = 0;
            let mut digits = 0;
            while let Some(d) = self.peek().and_then(|c| c.to_digit(16)) {
                value = value.saturating_mul(16).saturating_add(d);
                digits += 1;
                self.bump();
            }
            if digits == 0 || self.peek() != Some('}') {
                return Err(Error::InvalidEscape('x'));
            }
            self.bump();
            return char::from_u32(value).ok_or(Error::InvalidEscape('x'));
        }
        let mut value: u32 = 0;
        for _ in 0..2 {
            let d = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or(Error::InvalidEscape('x'))?;
            value = value * 16 + d;
            self.bump();
        }
        char::from_u32(value).ok_or(Error::InvalidEscape('x'))
    }

    /// `\0`, optionally followed by up to two more octal digits.
    fn octal_escape(&mut self) -> Result<char> {
        let mut value: u32 = 0;
        for _ in 0..2 {
            match self.peek().and_then(|c| c.to_digit(8)) {
                Some(d) => {
                    value = value * 8 + d;
                    self.bump();
                }
                None => break,
            }
        }
        char::from_u32(value).ok_or(Error::InvalidEscape('0'))
    }
}

//! Composed-description templates, one per operator.

use crate::node::{Flags, NodeSummary, Op};
use crate::phrases::{display_rune, display_runes, repeat_phrase, rune_folds};
use crate::track::Track;

/// Comma-joined part phrases, structural tokens skipped.
fn join_parts(parts: &[Track]) -> String {
    parts
        .iter()
        .filter(|t| !t.omitted_in_composed())
        .map(|t| t.join_text().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Like [`join_parts`] but collapsing repeated phrases, keeping first
/// occurrence order. Alternation uses this so `|x|` reads
/// `alternation of [empty string,literal 'x']`.
fn join_unique_parts(parts: &[Track]) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for t in parts {
        if t.omitted_in_composed() {
            continue;
        }
        let text = t.join_text();
        if !seen.contains(&text) {
            seen.push(text);
        }
    }
    seen.join(",")
}

fn literal_phrase(node: &NodeSummary) -> String {
    let body = if node.runes.len() == 1 {
        format!("literal '{}'", display_rune(node.runes[0]))
    } else {
        format!("string \"{}\"", display_runes(node.runes))
    };
    let folds = node.runes.iter().any(|&c| rune_folds(c));
    if node.flags.contains(Flags::CASE_INSENSITIVE) && folds {
        format!("case insensitive {body}")
    } else {
        body
    }
}

fn quantified_phrase(node: &NodeSummary, parts: &[Track], repetition: &str) -> String {
    let mut text = format!("{} {repetition}", join_parts(parts));
    if node.flags.contains(Flags::NON_GREEDY) {
        text.push_str(" (non-greedy)");
    }
    text
}

/// Generate the composed description for one node from its operator,
/// flags, and already-frozen part tracks.
pub(crate) fn describe(node: &NodeSummary, parts: &[Track]) -> String {
    match node.op {
        Op::Literal => literal_phrase(node),
        Op::CharClass => {
            let negated = parts.iter().any(|t| t.negated());
            let prefix = if negated { "negated " } else { "" };
            format!("{prefix}character class of [{}]", join_parts(parts))
        }
        Op::AnyChar => "any characters including \"\\n\"".to_string(),
        Op::AnyCharNotNl => "any characters excluding \"\\n\"".to_string(),
        Op::BeginLine => "line start".to_string(),
        Op::EndLine => "line end".to_string(),
        Op::BeginText => "text start".to_string(),
        Op::EndText => "text end".to_string(),
        Op::WordBoundary => "word boundary".to_string(),
        Op::NoWordBoundary => "non-word boundary".to_string(),
        Op::Capture => match node.name {
            Some(name) => format!("capturing group {name} of [{}]", join_parts(parts)),
            None => format!("capturing group of [{}]", join_parts(parts)),
        },
        Op::Group => format!("group of [{}]", join_parts(parts)),
        Op::Star => quantified_phrase(node, parts, "repeated zero or many times"),
        Op::Plus => quantified_phrase(node, parts, "repeated once or many times"),
        Op::Quest => quantified_phrase(node, parts, "repeated zero or once"),
        Op::Repeat => {
            let repetition = repeat_phrase(node.min, node.max);
            quantified_phrase(node, parts, &repetition)
        }
        Op::Concat => format!("sequence of [{}]", join_parts(parts)),
        Op::Alternate => format!("alternation of [{}]", join_unique_parts(parts)),
        Op::EmptyMatch => "empty string".to_string(),
        Op::NoMatch => "no match".to_string(),
    }
}

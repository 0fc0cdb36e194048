//! Static phrase tables and formatting helpers for descriptions.
//!
//! Every fixed piece of English the engine emits lives here. Entries carry
//! the omit flag (structural tokens that never join a composed part list)
//! and the negation flag (only the `[^` opener sets it).

use std::collections::HashMap;
use std::sync::LazyLock;

/// A phrase plus the composition behavior of the track it describes.
pub struct TokenPhrase {
    pub text: &'static str,
    pub omit: bool,
    pub negated: bool,
}

const fn plain(text: &'static str) -> TokenPhrase {
    TokenPhrase {
        text,
        omit: false,
        negated: false,
    }
}

const fn omitted(text: &'static str) -> TokenPhrase {
    TokenPhrase {
        text,
        omit: true,
        negated: false,
    }
}

/// Punctuation and metacharacter phrases, keyed by the raw token text.
/// Flag-sensitive tokens have a second entry keyed `token:flag`.
pub static TOKEN_PHRASES: LazyLock<HashMap<&'static str, TokenPhrase>> = LazyLock::new(|| {
    HashMap::from([
        ("(", omitted("capturing group")),
        (")", omitted("capturing group end")),
        ("(?", omitted("non-capturing group start")),
        (":", omitted("mod modifier end")),
        ("|", omitted("alternation")),
        ("[", omitted("character class")),
        (
            "[^",
            TokenPhrase {
                text: "negated character class",
                omit: true,
                negated: true,
            },
        ),
        ("]", omitted("character class end")),
        ("*", omitted("quantifier: repeated zero or many times")),
        ("+", omitted("quantifier: repeated once or many times")),
        ("?", omitted("quantifier: repeated zero or once")),
        ("\\", omitted("escape")),
        ("\\Q", omitted("quoted literal start")),
        ("\\E", omitted("quoted literal end")),
        (".", plain("any characters excluding \"\\n\"")),
        (".:s", plain("any characters including \"\\n\"")),
        ("^", plain("line start")),
        ("^:m", plain("line start")),
        ("$", plain("line end")),
        ("$:m", plain("line end")),
        ("\\b", plain("word boundary")),
        ("\\B", plain("non-word boundary")),
        ("\\A", plain("text start")),
        ("\\z", plain("text end")),
    ])
});

/// Perl class shorthands, keyed by the two-character escape.
pub static PERL_PHRASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("\\d", "digits shorthand"),
        ("\\D", "non-digits shorthand"),
        ("\\s", "whitespace shorthand"),
        ("\\S", "non-whitespace shorthand"),
        ("\\w", "word character shorthand"),
        ("\\W", "non-word character shorthand"),
    ])
});

/// POSIX class phrases, keyed by the bare name. Negated forms are derived
/// by [`posix_phrase`].
pub static POSIX_PHRASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("alnum", "alphanumeric characters"),
        ("alpha", "alphabetic characters"),
        ("ascii", "ASCII characters"),
        ("blank", "space and tab"),
        ("cntrl", "control characters"),
        ("digit", "digits"),
        ("graph", "visible characters"),
        ("lower", "lowercase letters"),
        ("print", "visible characters and spaces"),
        ("punct", "punctuation"),
        ("space", "whitespace characters, including line breaks"),
        ("upper", "uppercase letters"),
        ("word", "word characters"),
        ("xdigit", "hexadecimal digits"),
    ])
});

/// Inline modifier letter phrases.
pub static MOD_PHRASES: LazyLock<HashMap<char, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ('i', "case insensitive"),
        ('m', "multi-line: '^' and '$' match at the start and end of each line"),
        ('s', "single-line: dot also matches line breaks"),
        ('U', "ungreedy quantifiers"),
        ('-', "negated"),
    ])
});

/// Phrase for a POSIX class name, `None` if the name is unknown.
/// A `^` prefix on the name yields the negated phrase.
pub fn posix_phrase(name: &str) -> Option<String> {
    if let Some(bare) = name.strip_prefix('^') {
        POSIX_PHRASES.get(bare).map(|p| format!("negated {p}"))
    } else {
        POSIX_PHRASES.get(name).map(|p| (*p).to_string())
    }
}

/// English count: "once", "twice", "{n} times".
pub fn frequency(n: u32) -> String {
    match n {
        1 => "once".to_string(),
        2 => "twice".to_string(),
        _ => format!("{n} times"),
    }
}

/// Repetition phrase for a bounded repeat or a shorthand quantifier.
pub fn repeat_phrase(min: Option<u32>, max: Option<u32>) -> String {
    match (min, max) {
        (Some(min), Some(max)) if min == max => format!("repeated {}", frequency(min)),
        (Some(min), Some(max)) => {
            format!("repeated {} to {}", frequency(min), frequency(max))
        }
        (Some(min), None) => format!("repeated at least {}", frequency(min)),
        (None, Some(max)) => format!("repeated at most {}", frequency(max)),
        (None, None) => "repeated".to_string(),
    }
}

/// Printable rendering of one codepoint for quoting inside a description.
pub fn display_rune(c: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\x0c' => "\\f".to_string(),
        '\x0b' => "\\v".to_string(),
        '\0' => "\\0".to_string(),
        c => c.to_string(),
    }
}

/// Printable rendering of a run of codepoints.
pub fn display_runes(runes: &[char]) -> String {
    runes.iter().map(|&c| display_rune(c)).collect()
}

/// `true` if the codepoint has a distinct simple case fold, which makes the
/// "case insensitive" prefix worth emitting.
pub fn rune_folds(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase()
}

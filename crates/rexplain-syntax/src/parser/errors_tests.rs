use crate::{Error, parse};

fn fails_with(pattern: &str, want: Error) {
    assert_eq!(parse(pattern).unwrap_err(), want, "pattern {pattern:?}");
}

#[test]
fn unbalanced_parens() {
    fails_with("(", Error::MissingCloseParen);
    fails_with("(a", Error::MissingCloseParen);
    fails_with("(a|b", Error::MissingCloseParen);
    fails_with(")", Error::UnexpectedCloseParen);
    fails_with("a)", Error::UnexpectedCloseParen);
}

#[test]
fn unbalanced_brackets() {
    fails_with("[a", Error::MissingCloseBracket);
    fails_with("[a-", Error::MissingCloseBracket);
    fails_with("[]", Error::MissingCloseBracket);
}

#[test]
fn quantifier_without_argument() {
    fails_with("*", Error::MissingRepeatArgument);
    fails_with("+a", Error::MissingRepeatArgument);
    fails_with("?", Error::MissingRepeatArgument);
    fails_with("{2}", Error::MissingRepeatArgument);
    fails_with("(?i)*", Error::MissingRepeatArgument);
}

#[test]
fn stacked_quantifiers() {
    fails_with("a**", Error::NestedRepetition);
    fails_with("a*+", Error::NestedRepetition);
    fails_with("a??*", Error::NestedRepetition);
    fails_with("a{2}{3}", Error::NestedRepetition);
}

#[test]
fn repeat_count_limits() {
    fails_with("x{1001}", Error::InvalidRepeatSize);
    fails_with("x{0,1001}", Error::InvalidRepeatSize);
    fails_with("x{3,2}", Error::InvalidRepeatSize);
}

#[test]
fn inverted_class_range() {
    fails_with("[z-a]", Error::InvalidCharRange);
}

#[test]
fn unknown_posix_class() {
    fails_with("[[:foo:]]", Error::InvalidPosixClass("foo".to_string()));
    fails_with("[[:^foo:]]", Error::InvalidPosixClass("^foo".to_string()));
}

#[test]
fn bad_escapes() {
    fails_with("\\", Error::TrailingBackslash);
    fails_with("\\g", Error::InvalidEscape('g'));
    fails_with("\\1", Error::InvalidEscape('1'));
    fails_with("\\xzz", Error::InvalidEscape('x'));
    fails_with("\\x{}", Error::InvalidEscape('x'));
}

#[test]
fn bad_named_captures() {
    fails_with("(?P<>a)", Error::InvalidNamedCapture);
    fails_with("(?P<na me>a)", Error::InvalidNamedCapture);
    fails_with("(?Pa)", Error::InvalidNamedCapture);
    fails_with(
        "(?P<n>a)(?P<n>b)",
        Error::DuplicateCaptureName("n".to_string()),
    );
}

#[test]
fn unsupported_group_forms() {
    fails_with("(?=a)", Error::UnsupportedGroup);
    fails_with("(?!a)", Error::UnsupportedGroup);
    fails_with("(?<=a)", Error::UnsupportedGroup);
    fails_with("(?<!a)", Error::UnsupportedGroup);
    fails_with("(?)", Error::UnsupportedGroup);
}

#[test]
fn unknown_flag_letter() {
    fails_with("(?q)", Error::InvalidFlag('q'));
    fails_with("(?i-q:a)", Error::InvalidFlag('q'));
}

#[test]
fn error_messages_read_well() {
    assert_eq!(parse("(").unwrap_err().to_string(), "missing closing )");
    assert_eq!(
        parse("x{1001}").unwrap_err().to_string(),
        "invalid repeat count"
    );
    assert_eq!(
        parse("\\g").unwrap_err().to_string(),
        "invalid escape sequence \\g"
    );
}

use crate::parse;

fn annotations(pattern: &str) -> Vec<(u32, u32, String)> {
    let ast = parse(pattern).unwrap();
    ast.annotations()
        .into_iter()
        .map(|a| (a.start, a.end, a.description))
        .collect()
}

fn expect(pattern: &str, want: &[(u32, u32, &str)]) {
    let got = annotations(pattern);
    let want: Vec<(u32, u32, String)> = want
        .iter()
        .map(|&(s, e, d)| (s, e, d.to_string()))
        .collect();
    assert_eq!(got, want, "pattern {pattern:?}");
}

#[test]
fn single_literal() {
    expect("a", &[(0, 1, "literal 'a'")]);
}

#[test]
fn literal_run_fuses_into_string() {
    expect("ab", &[(0, 2, "string \"ab\"")]);
}

#[test]
fn sequence_with_dot() {
    expect(
        "a.b",
        &[
            (
                0,
                3,
                "sequence of [literal 'a',any characters excluding \"\\n\",literal 'b']",
            ),
            (0, 1, "literal 'a'"),
            (1, 2, "any characters excluding \"\\n\""),
            (2, 3, "literal 'b'"),
        ],
    );
}

#[test]
fn star_quantifier() {
    expect(
        "a*",
        &[
            (0, 2, "literal 'a' repeated zero or many times"),
            (0, 1, "literal 'a'"),
            (1, 2, "quantifier: repeated zero or many times"),
        ],
    );
}

#[test]
fn plus_and_quest_quantifiers() {
    expect(
        "a+",
        &[
            (0, 2, "literal 'a' repeated once or many times"),
            (0, 1, "literal 'a'"),
            (1, 2, "quantifier: repeated once or many times"),
        ],
    );
    expect(
        "a?",
        &[
            (0, 2, "literal 'a' repeated zero or once"),
            (0, 1, "literal 'a'"),
            (1, 2, "quantifier: repeated zero or once"),
        ],
    );
}

#[test]
fn non_greedy_star() {
    expect(
        "a*?",
        &[
            (0, 3, "literal 'a' repeated zero or many times (non-greedy)"),
            (0, 1, "literal 'a'"),
            (1, 2, "quantifier: repeated zero or many times"),
            (2, 3, "quantifier: non-greedy"),
        ],
    );
}

#[test]
fn quantifier_binds_last_unit_of_a_run() {
    expect(
        "ab*",
        &[
            (
                0,
                3,
                "sequence of [literal 'a',literal 'b' repeated zero or many times]",
            ),
            (0, 1, "literal 'a'"),
            (1, 3, "literal 'b' repeated zero or many times"),
            (1, 2, "literal 'b'"),
            (2, 3, "quantifier: repeated zero or many times"),
        ],
    );
}

#[test]
fn bounded_repeats() {
    expect(
        "a{2}",
        &[
            (0, 4, "literal 'a' repeated twice"),
            (0, 1, "literal 'a'"),
            (1, 4, "quantifier: repeated twice"),
        ],
    );
    expect(
        "a{2,}",
        &[
            (0, 5, "literal 'a' repeated at least twice"),
            (0, 1, "literal 'a'"),
            (1, 5, "quantifier: repeated at least twice"),
        ],
    );
    expect(
        "a{1,3}",
        &[
            (0, 6, "literal 'a' repeated once to 3 times"),
            (0, 1, "literal 'a'"),
            (1, 6, "quantifier: repeated once to 3 times"),
        ],
    );
}

#[test]
fn capturing_group() {
    expect(
        "(a)",
        &[
            (0, 3, "capturing group of [literal 'a']"),
            (0, 1, "capturing group"),
            (1, 2, "literal 'a'"),
            (2, 3, "capturing group end"),
        ],
    );
}

#[test]
fn named_capturing_group() {
    expect(
        "(?P<year>a)",
        &[
            (0, 11, "capturing group year of [literal 'a']"),
            (0, 9, "capturing group"),
            (9, 10, "literal 'a'"),
            (10, 11, "capturing group end"),
        ],
    );
}

#[test]
fn named_capture_short_form() {
    expect(
        "(?<y>a)",
        &[
            (0, 7, "capturing group y of [literal 'a']"),
            (0, 5, "capturing group"),
            (5, 6, "literal 'a'"),
            (6, 7, "capturing group end"),
        ],
    );
}

#[test]
fn non_capturing_group() {
    expect(
        "(?:a)",
        &[
            (0, 5, "group of [literal 'a']"),
            (0, 2, "non-capturing group start"),
            (2, 3, "mod modifier end"),
            (3, 4, "literal 'a'"),
            (4, 5, "capturing group end"),
        ],
    );
}

#[test]
fn quantified_group_keeps_inner_cover() {
    expect(
        "(?:ab)*",
        &[
            (0, 7, "group of [string \"ab\"] repeated zero or many times"),
            (0, 6, "group of [string \"ab\"]"),
            (0, 2, "non-capturing group start"),
            (2, 3, "mod modifier end"),
            (3, 5, "string \"ab\""),
            (5, 6, "capturing group end"),
            (6, 7, "quantifier: repeated zero or many times"),
        ],
    );
}

#[test]
fn character_class_with_range() {
    expect(
        "[a-z]",
        &[
            (0, 5, "character class of [range a to z]"),
            (0, 1, "character class"),
            (1, 4, "range a to z"),
            (4, 5, "character class end"),
        ],
    );
}

#[test]
fn character_class_multiple_items() {
    expect(
        "[a-c1-3]",
        &[
            (0, 8, "character class of [range a to c,range 1 to 3]"),
            (0, 1, "character class"),
            (1, 4, "range a to c"),
            (4, 7, "range 1 to 3"),
            (7, 8, "character class end"),
        ],
    );
}

#[test]
fn negated_character_class() {
    expect(
        "[^a]",
        &[
            (0, 4, "negated character class of [literal 'a']"),
            (0, 2, "negated character class"),
            (2, 3, "literal 'a'"),
            (3, 4, "character class end"),
        ],
    );
}

#[test]
fn single_literal_class_collapses() {
    expect(
        "[a]",
        &[
            (0, 3, "literal 'a'"),
            (0, 1, "character class"),
            (1, 2, "literal 'a'"),
            (2, 3, "character class end"),
        ],
    );
}

#[test]
fn posix_class() {
    expect(
        "[[:lower:]]",
        &[
            (0, 11, "character class of [lowercase letters]"),
            (0, 1, "character class"),
            (1, 10, "POSIX class:lowercase letters"),
            (10, 11, "character class end"),
        ],
    );
}

#[test]
fn negated_posix_class_name() {
    expect(
        "[[:^digit:]]",
        &[
            (0, 12, "character class of [negated digits]"),
            (0, 1, "character class"),
            (1, 11, "POSIX class:negated digits"),
            (11, 12, "character class end"),
        ],
    );
}

#[test]
fn perl_shorthand_inside_class() {
    expect(
        "[\\d]",
        &[
            (0, 4, "character class of [digits shorthand]"),
            (0, 1, "character class"),
            (1, 3, "digits shorthand"),
            (3, 4, "character class end"),
        ],
    );
}

#[test]
fn perl_shorthand_standalone() {
    expect("\\d", &[(0, 2, "digits shorthand")]);
    expect("\\S", &[(0, 2, "non-whitespace shorthand")]);
}

#[test]
fn escaped_metacharacter() {
    expect(
        "\\|",
        &[
            (0, 2, "literal '|'"),
            (0, 1, "escape"),
            (1, 2, "literal '|'"),
        ],
    );
}

#[test]
fn escaped_control_character() {
    expect(
        "\\n",
        &[
            (0, 2, "literal '\\n'"),
            (0, 1, "escape"),
            (1, 2, "literal '\\n'"),
        ],
    );
}

#[test]
fn hex_escape() {
    expect(
        "\\x41",
        &[
            (0, 4, "literal 'A'"),
            (0, 1, "escape"),
            (1, 4, "literal 'A'"),
        ],
    );
}

#[test]
fn anchors() {
    expect(
        "^a$",
        &[
            (0, 3, "sequence of [line start,literal 'a',line end]"),
            (0, 1, "line start"),
            (1, 2, "literal 'a'"),
            (2, 3, "line end"),
        ],
    );
}

#[test]
fn word_boundary_and_text_anchors() {
    expect("\\b", &[(0, 2, "word boundary")]);
    expect("\\B", &[(0, 2, "non-word boundary")]);
    expect("\\A", &[(0, 2, "text start")]);
    expect("\\z", &[(0, 2, "text end")]);
}

#[test]
fn alternation() {
    expect(
        "a|b",
        &[
            (0, 3, "alternation of [literal 'a',literal 'b']"),
            (0, 1, "literal 'a'"),
            (1, 2, "alternation"),
            (2, 3, "literal 'b'"),
        ],
    );
}

#[test]
fn alternation_with_empty_branches() {
    expect(
        "|x|",
        &[
            (0, 3, "alternation of [empty string,literal 'x']"),
            (0, 1, "alternation"),
            (1, 2, "literal 'x'"),
            (2, 3, "alternation"),
        ],
    );
}

#[test]
fn bare_flags_join_next_unit() {
    expect(
        "(?i)a",
        &[
            (0, 5, "case insensitive literal 'a'"),
            (0, 2, "non-capturing group start"),
            (2, 3, "case insensitive"),
            (3, 4, "capturing group end"),
            (4, 5, "literal 'a'"),
        ],
    );
}

#[test]
fn bare_flags_before_class() {
    expect(
        "(?i)[a-z]",
        &[
            (0, 9, "character class of [case insensitive,range a to z]"),
            (0, 2, "non-capturing group start"),
            (2, 3, "case insensitive"),
            (3, 4, "capturing group end"),
            (4, 5, "character class"),
            (5, 8, "range a to z"),
            (8, 9, "character class end"),
        ],
    );
}

#[test]
fn trailing_bare_flags_match_empty_string() {
    expect(
        "(?i)",
        &[
            (0, 4, "empty string"),
            (0, 2, "non-capturing group start"),
            (2, 3, "case insensitive"),
            (3, 4, "capturing group end"),
        ],
    );
}

#[test]
fn case_insensitive_prefix_skips_unfoldable() {
    expect(
        "(?i)7",
        &[
            (0, 5, "literal '7'"),
            (0, 2, "non-capturing group start"),
            (2, 3, "case insensitive"),
            (3, 4, "capturing group end"),
            (4, 5, "literal '7'"),
        ],
    );
}

#[test]
fn scoped_flags_are_structural() {
    expect(
        "(?i:a)",
        &[
            (0, 6, "group of [literal 'a']"),
            (0, 2, "non-capturing group start"),
            (2, 3, "case insensitive"),
            (3, 4, "mod modifier end"),
            (4, 5, "literal 'a'"),
            (5, 6, "capturing group end"),
        ],
    );
}

#[test]
fn dot_under_single_line_flag() {
    expect(
        "(?s:.)",
        &[
            (0, 6, "group of [any characters including \"\\n\"]"),
            (0, 2, "non-capturing group start"),
            (2, 3, "single-line: dot also matches line breaks"),
            (3, 4, "mod modifier end"),
            (4, 5, "any characters including \"\\n\""),
            (5, 6, "capturing group end"),
        ],
    );
}

#[test]
fn quoted_literal() {
    expect(
        "\\Qa+b\\E",
        &[
            (0, 7, "string \"a+b\""),
            (0, 2, "quoted literal start"),
            (2, 5, "string \"a+b\""),
            (5, 7, "quoted literal end"),
        ],
    );
}

#[test]
fn quantifier_applies_to_whole_quoted_literal() {
    expect(
        "\\Qab\\E*",
        &[
            (0, 7, "string \"ab\" repeated zero or many times"),
            (0, 6, "string \"ab\""),
            (0, 2, "quoted literal start"),
            (2, 4, "string \"ab\""),
            (4, 6, "quoted literal end"),
            (6, 7, "quantifier: repeated zero or many times"),
        ],
    );
}

#[test]
fn malformed_repeat_reads_as_literal_text() {
    expect("x{1001", &[(0, 6, "string \"x{1001\"")]);
}

#[test]
fn brace_after_quantifier_is_a_literal() {
    expect(
        "a*{",
        &[
            (
                0,
                3,
                "sequence of [literal 'a' repeated zero or many times,literal '{']",
            ),
            (0, 2, "literal 'a' repeated zero or many times"),
            (0, 1, "literal 'a'"),
            (1, 2, "quantifier: repeated zero or many times"),
            (2, 3, "literal '{'"),
        ],
    );
}

#[test]
fn offsets_count_codepoints_not_bytes() {
    expect(
        "[α-ε☺]",
        &[
            (0, 6, "character class of [range α to ε,literal '☺']"),
            (0, 1, "character class"),
            (1, 4, "range α to ε"),
            (4, 5, "literal '☺'"),
            (5, 6, "character class end"),
        ],
    );
}

#[test]
fn empty_pattern_has_no_annotations() {
    assert!(annotations("").is_empty());
}

#[test]
fn ungreedy_flag_flips_suffix_meaning() {
    use rexplain_core::Flags;
    let ast = crate::parse_with_flags("a*", Flags::UNGREEDY).unwrap();
    assert_eq!(
        ast.annotations()[0].description,
        "literal 'a' repeated zero or many times (non-greedy)"
    );

    let ast = crate::parse_with_flags("a*?", Flags::UNGREEDY).unwrap();
    assert_eq!(
        ast.annotations()[0].description,
        "literal 'a' repeated zero or many times"
    );
}

#[test]
fn preset_multi_line_changes_anchor_keys() {
    use rexplain_core::Flags;
    let ast = crate::parse_with_flags("^a", Flags::MULTI_LINE).unwrap();
    let all = ast.annotations();
    assert_eq!(all[0].description, "sequence of [line start,literal 'a']");
    assert_eq!(all[1].description, "line start");
}

#[test]
fn preset_flags_combine() {
    use rexplain_core::Flags;
    let ast =
        crate::parse_with_flags("^.", Flags::MULTI_LINE | Flags::DOT_MATCHES_NL).unwrap();
    assert_eq!(
        ast.annotations()[0].description,
        "sequence of [line start,any characters including \"\\n\"]"
    );
}

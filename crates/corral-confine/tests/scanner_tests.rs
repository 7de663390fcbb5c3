//! Integration tests for the scanner primitives.

use corral_confine::scanner::{
    PreludeEnd, consume_comment, consume_string, find_prelude_end, match_balanced_block,
    read_at_rule_name, skip_whitespace,
};

/// Helper to turn a literal into the char-slice form the primitives scan.
fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[test]
fn test_skip_whitespace_run() {
    let input = chars("  \t\n  x");
    assert_eq!(skip_whitespace(&input, 0), 6);
    assert_eq!(input[6], 'x');
}

#[test]
fn test_skip_whitespace_at_non_whitespace() {
    let input = chars("x  ");
    assert_eq!(skip_whitespace(&input, 0), 0);
}

#[test]
fn test_skip_whitespace_at_end() {
    let input = chars("   ");
    assert_eq!(skip_whitespace(&input, 0), 3);
}

#[test]
fn test_consume_comment() {
    let input = chars("/* hello */x");
    assert_eq!(consume_comment(&input, 0), 11);
    assert_eq!(input[11], 'x');
}

#[test]
fn test_consume_comment_unterminated_resolves_to_eof() {
    // "...or up to an EOF code point" - must not loop.
    let input = chars("/* never closed");
    assert_eq!(consume_comment(&input, 0), input.len());
}

#[test]
fn test_consume_comment_with_stars_inside() {
    let input = chars("/* a * b ** c */x");
    assert_eq!(consume_comment(&input, 0), 16);
}

#[test]
fn test_consume_string_simple() {
    let input = chars("\"abc\" rest");
    assert_eq!(consume_string(&input, 0), 5);
}

#[test]
fn test_consume_string_escaped_quote() {
    let input = chars(r#""a\"b" rest"#);
    assert_eq!(consume_string(&input, 0), 6);
}

#[test]
fn test_balanced_block_flat() {
    // pos is just after the open brace of "a{bc}d"
    let input = chars("a{bc}d");
    let span = match_balanced_block(&input, 2).unwrap();
    assert_eq!(span.content_end, 4);
    assert_eq!(span.end, 5);
    assert_eq!(input[span.content_end], '}');
}

#[test]
fn test_balanced_block_nested() {
    let input = chars("{ a { b } c } tail");
    let span = match_balanced_block(&input, 1).unwrap();
    assert_eq!(span.content_end, 12);
    assert_eq!(span.end, 13);
}

#[test]
fn test_balanced_block_unbalanced_returns_none() {
    let input = chars("{ never closed { inner }");
    assert!(match_balanced_block(&input, 1).is_none());
}

#[test]
fn test_balanced_block_ignores_braces_in_comments() {
    let input = chars("{ /* } */ x }");
    let span = match_balanced_block(&input, 1).unwrap();
    assert_eq!(span.content_end, 12);
}

#[test]
fn test_balanced_block_ignores_braces_in_strings() {
    let input = chars("{ content: \"}\"; }");
    let span = match_balanced_block(&input, 1).unwrap();
    assert_eq!(span.content_end, 16);
}

#[test]
fn test_read_at_rule_name() {
    let input = chars("@media screen");
    let (name, end) = read_at_rule_name(&input, 1);
    assert_eq!(name, "media");
    assert_eq!(end, 6);
}

#[test]
fn test_read_at_rule_name_with_hyphen() {
    let input = chars("@-moz-document url(x)");
    let (name, end) = read_at_rule_name(&input, 1);
    assert_eq!(name, "-moz-document");
    assert_eq!(end, 14);
}

#[test]
fn test_read_at_rule_name_lowercases() {
    let input = chars("@MEDIA x");
    let (name, _) = read_at_rule_name(&input, 1);
    assert_eq!(name, "media");
}

#[test]
fn test_prelude_end_semicolon() {
    let input = chars("@import url(a.css); x");
    assert!(matches!(
        find_prelude_end(&input, 1),
        PreludeEnd::Semicolon(18)
    ));
}

#[test]
fn test_prelude_end_open_brace() {
    let input = chars("@media screen { }");
    assert!(matches!(
        find_prelude_end(&input, 1),
        PreludeEnd::OpenBrace(14)
    ));
}

#[test]
fn test_prelude_end_skips_string_contents() {
    // The `;` and `{` inside the attribute string are not boundaries.
    let input = chars("a[href=\";{\"] { }");
    assert!(matches!(
        find_prelude_end(&input, 0),
        PreludeEnd::OpenBrace(13)
    ));
}

#[test]
fn test_prelude_end_eof() {
    let input = chars("div.unclosed");
    assert!(matches!(find_prelude_end(&input, 0), PreludeEnd::Eof));
}

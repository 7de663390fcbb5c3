//! Scanner primitives shared by every confinement pass.
//!
//! These cursor operations are the single source of truth for offsets, so
//! the scope transformer, the layout stripper, and the background extractor
//! all agree on where a comment, a block, or an at-rule name ends.
//!
//! Each primitive is pure and O(n) in the remaining input. This is the
//! deliberate replacement for regex matching: adversarial nested patterns
//! can drive a backtracking regex engine superlinear, while a cursor that
//! only ever moves forward cannot be made to loop.
//!
//! Character classes follow
//! [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#tokenizer-definitions).

/// The extent of a balanced `{ ... }` block.
///
/// [§ 5.4.8 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    /// Offset of the closing `}` (one past the last content character).
    pub content_end: usize,
    /// Offset one past the closing `}`.
    pub end: usize,
}

/// [§ 4.2 Definitions - whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
///
/// "A newline, U+0009 CHARACTER TABULATION, or U+0020 SPACE."
#[must_use]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions - ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
///
/// "A letter, a non-ASCII code point, or U+005F LOW LINE (_)."
#[must_use]
pub fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// "An ident-start code point, a digit, or U+002D HYPHEN-MINUS (-)."
#[must_use]
pub fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}

/// Advance `pos` over a run of whitespace and return the new offset.
///
/// Whitespace is never classified by the confinement passes; callers
/// relocate the skipped run verbatim into their output.
#[must_use]
pub fn skip_whitespace(input: &[char], pos: usize) -> usize {
    let mut i = pos;
    while i < input.len() && is_whitespace(input[i]) {
        i += 1;
    }
    i
}

/// Whether the input at `pos` starts a comment (`/*`).
#[must_use]
pub fn at_comment_start(input: &[char], pos: usize) -> bool {
    input.get(pos) == Some(&'/') && input.get(pos + 1) == Some(&'*')
}

/// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
///
/// From the `/*` at `pos`, return the offset one past the matching `*/`.
///
/// "...or up to an EOF code point" - an unterminated comment resolves to
/// the end of the input rather than looping.
#[must_use]
pub fn consume_comment(input: &[char], pos: usize) -> usize {
    debug_assert!(at_comment_start(input, pos));
    let mut i = pos + 2;
    while i < input.len() {
        if input[i] == '*' && input.get(i + 1) == Some(&'/') {
            return i + 2;
        }
        i += 1;
    }
    input.len()
}

/// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
///
/// From the opening quote at `pos`, return the offset one past the closing
/// quote. An escaped quote (`\"`) does not terminate the string. Per the
/// tokenizer spec an unescaped newline ends the (bad) string; EOF resolves
/// to the end of the input.
#[must_use]
pub fn consume_string(input: &[char], pos: usize) -> usize {
    let quote = input[pos];
    let mut i = pos + 1;
    while i < input.len() {
        match input[i] {
            c if c == quote => return i + 1,
            // "If the next input code point is EOF, do nothing." - a lone
            // trailing backslash consumes nothing extra.
            '\\' => i += 2,
            '\n' => return i,
            _ => i += 1,
        }
    }
    input.len()
}

/// [§ 5.4.8 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
///
/// Scan nested `{`/`}` pairs starting just after an opening brace until the
/// depth returns to zero. Braces inside comments and quoted strings do not
/// count toward the depth, so a `}` in a `content` value cannot truncate
/// the block.
///
/// Returns `None` when the input ends before the block closes; the caller
/// is expected to fail open and copy the remainder verbatim. The cursor
/// advances on every iteration, so malformed input cannot cause a loop.
#[must_use]
pub fn match_balanced_block(input: &[char], pos_after_open_brace: usize) -> Option<BlockSpan> {
    let mut depth = 1usize;
    let mut i = pos_after_open_brace;
    while i < input.len() {
        match input[i] {
            '/' if at_comment_start(input, i) => i = consume_comment(input, i),
            '"' | '\'' => i = consume_string(input, i),
            '{' => {
                depth += 1;
                i += 1;
            }
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(BlockSpan {
                        content_end: i,
                        end: i + 1,
                    });
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}

/// Where a rule's prelude ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreludeEnd {
    /// A `;` at offset - statement form (e.g. `@import ...;`).
    Semicolon(usize),
    /// A `{` at offset - block form.
    OpenBrace(usize),
    /// The input ended first; the caller fails open.
    Eof,
}

/// Scan from `pos` for the first `;` or `{` at the current nesting level.
///
/// Comments, quoted strings, and the contents of parentheses and brackets
/// are skipped, so `@supports (display: grid)` and `a[href=";{"]` preludes
/// resolve to the correct boundary.
#[must_use]
pub fn find_prelude_end(input: &[char], pos: usize) -> PreludeEnd {
    let mut parens = 0usize;
    let mut brackets = 0usize;
    let mut i = pos;
    while i < input.len() {
        match input[i] {
            '/' if at_comment_start(input, i) => i = consume_comment(input, i),
            '"' | '\'' => i = consume_string(input, i),
            '(' => {
                parens += 1;
                i += 1;
            }
            ')' => {
                parens = parens.saturating_sub(1);
                i += 1;
            }
            '[' => {
                brackets += 1;
                i += 1;
            }
            ']' => {
                brackets = brackets.saturating_sub(1);
                i += 1;
            }
            ';' if parens == 0 && brackets == 0 => return PreludeEnd::Semicolon(i),
            '{' if parens == 0 && brackets == 0 => return PreludeEnd::OpenBrace(i),
            _ => i += 1,
        }
    }
    PreludeEnd::Eof
}

/// [§ 4.3.1 Consume a token - U+0040 COMMERCIAL AT](https://www.w3.org/TR/css-syntax-3/#consume-token)
///
/// Consume the run of ASCII letters and hyphens naming an at-rule, starting
/// just after the `@`. Returns the (possibly empty) lowercased name and the
/// offset past it.
///
/// Only letters and hyphens are taken: the grouping-kind decision keys off
/// names like `media` and `-moz-document`, and nothing else matters here.
#[must_use]
pub fn read_at_rule_name(input: &[char], pos_after_at: usize) -> (String, usize) {
    let mut name = String::new();
    let mut i = pos_after_at;
    while i < input.len() && (input[i].is_ascii_alphabetic() || input[i] == '-') {
        name.push(input[i].to_ascii_lowercase());
        i += 1;
    }
    (name, i)
}

//! Print-rule policy pass.
//!
//! Whether `@media print` blocks from a loaded theme should survive is a
//! host decision, not an engine one: stripping them preserves on-screen
//! colors when the user prints the preview, keeping them preserves the
//! theme's print-specific page-break rules. The requirement has flipped
//! in both directions historically, so it is an explicit policy flag
//! rather than hardcoded behavior.

use serde::{Deserialize, Serialize};

use crate::scanner::{
    PreludeEnd, at_comment_start, consume_comment, find_prelude_end, is_whitespace,
    match_balanced_block, read_at_rule_name, skip_whitespace,
};
use crate::scope::is_grouping_at_rule;
use crate::selector::contains_word;

/// Host policy for a loaded theme's `@media print` blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrintRulePolicy {
    /// Keep print rules (page-break hints survive).
    #[default]
    Preserve,
    /// Drop print rules (on-screen colors survive printing).
    Strip,
}

/// Remove every `@media` block whose query mentions the `print` media
/// type, including ones nested inside other grouping at-rules.
///
/// Everything else is copied verbatim; malformed input fails open.
#[must_use]
pub fn strip_print_rules(css: &str, max_depth: usize) -> String {
    let input: Vec<char> = css.chars().collect();
    strip_pass(&input, max_depth, 0)
}

/// One pass over one nesting level.
fn strip_pass(input: &[char], max_depth: usize, depth: usize) -> String {
    let mut output = String::with_capacity(input.len());
    let mut position = 0usize;
    while position < input.len() {
        let c = input[position];
        if is_whitespace(c) {
            let end = skip_whitespace(input, position);
            output.extend(&input[position..end]);
            position = end;
        } else if at_comment_start(input, position) {
            let end = consume_comment(input, position);
            output.extend(&input[position..end]);
            position = end;
        } else if c == '@' {
            position = consume_at_rule(input, position, max_depth, depth, &mut output);
        } else {
            position = consume_other_rule(input, position, &mut output);
        }
    }
    output
}

/// Handle an at-rule: drop print media blocks, recurse into other grouping
/// blocks, copy everything else. Returns the new cursor.
fn consume_at_rule(
    input: &[char],
    position: usize,
    max_depth: usize,
    depth: usize,
    output: &mut String,
) -> usize {
    let (name, after_name) = read_at_rule_name(input, position + 1);
    match find_prelude_end(input, after_name) {
        PreludeEnd::Semicolon(i) => {
            output.extend(&input[position..=i]);
            i + 1
        }
        PreludeEnd::Eof => {
            output.extend(&input[position..]);
            input.len()
        }
        PreludeEnd::OpenBrace(i) => match match_balanced_block(input, i + 1) {
            None => {
                output.extend(&input[position..]);
                input.len()
            }
            Some(span) => {
                let prelude: String = input[after_name..i].iter().collect();
                if name == "media" && mentions_print(&prelude) {
                    // Drop the whole block.
                    return span.end;
                }
                if is_grouping_at_rule(&name) && depth < max_depth {
                    output.extend(&input[position..=i]);
                    let interior = &input[i + 1..span.content_end];
                    output.push_str(&strip_pass(interior, max_depth, depth + 1));
                    output.push('}');
                } else {
                    output.extend(&input[position..span.end]);
                }
                span.end
            }
        },
    }
}

/// Copy a qualified rule (or stray statement) verbatim. Returns the new
/// cursor.
fn consume_other_rule(input: &[char], position: usize, output: &mut String) -> usize {
    match find_prelude_end(input, position) {
        PreludeEnd::Semicolon(i) => {
            output.extend(&input[position..=i]);
            i + 1
        }
        PreludeEnd::Eof => {
            output.extend(&input[position..]);
            input.len()
        }
        PreludeEnd::OpenBrace(i) => match match_balanced_block(input, i + 1) {
            None => {
                output.extend(&input[position..]);
                input.len()
            }
            Some(span) => {
                output.extend(&input[position..span.end]);
                span.end
            }
        },
    }
}

/// Word-boundary test for the `print` media type in a media query list
/// (`print`, `only print`, `screen, print`; not `.printable`).
fn mentions_print(prelude: &str) -> bool {
    contains_word(&prelude.to_ascii_lowercase(), "print")
}

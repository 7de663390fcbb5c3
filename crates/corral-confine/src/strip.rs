//! Layout property stripper.
//!
//! Structurally mirrors the scope transformer (same dispatch, same
//! grouping-at-rule recursion, same depth guard) but acts at the leaf
//! level: a qualified rule whose selector list directly and exclusively
//! targets the confinement root has the host-reserved box-model
//! declarations removed from its body. Descendant rules (`#wrapper h1`)
//! only affect content and are untouched.
//!
//! Must run strictly after the scope transform - before it, selectors are
//! not yet canonicalized to mention the root explicitly.

use corral_common::warning::warn_once;

use crate::policy::LayoutPropertySet;
use crate::scanner::{
    PreludeEnd, at_comment_start, consume_comment, consume_string, find_prelude_end, is_whitespace,
    match_balanced_block, read_at_rule_name, skip_whitespace,
};
use crate::scope::is_grouping_at_rule;
use crate::selector::split_top_level_commas;

/// Remove host-reserved box-model declarations from rules that directly
/// target `root`.
///
/// `#wrapper { max-width: 700px !important; color: red; }` keeps only
/// `color: red` (an `!important` does not save a stripped declaration);
/// `#wrapper h1 { max-width: 700px; }` is untouched. A rule whose filtered
/// body is empty is dropped entirely.
#[must_use]
pub fn strip_layout_properties(
    css: &str,
    root: &str,
    properties: &LayoutPropertySet,
    max_depth: usize,
) -> String {
    let input: Vec<char> = css.chars().collect();
    StripPass {
        input: &input,
        position: 0,
        output: String::with_capacity(css.len()),
        root,
        properties,
        max_depth,
        depth: 0,
    }
    .run()
}

/// One stripping pass over one nesting level of the stylesheet.
struct StripPass<'a> {
    input: &'a [char],
    position: usize,
    output: String,
    root: &'a str,
    properties: &'a LayoutPropertySet,
    max_depth: usize,
    depth: usize,
}

impl StripPass<'_> {
    fn run(mut self) -> String {
        while self.position < self.input.len() {
            let c = self.input[self.position];
            if is_whitespace(c) {
                let end = skip_whitespace(self.input, self.position);
                self.emit_verbatim(end);
            } else if at_comment_start(self.input, self.position) {
                let end = consume_comment(self.input, self.position);
                self.emit_verbatim(end);
            } else if c == '@' {
                self.consume_at_rule();
            } else {
                self.consume_qualified_rule();
            }
        }
        self.output
    }

    fn emit_verbatim(&mut self, end: usize) {
        self.output.extend(&self.input[self.position..end]);
        self.position = end;
    }

    fn emit_remainder(&mut self) {
        let end = self.input.len();
        self.emit_verbatim(end);
    }

    fn consume_at_rule(&mut self) {
        let (name, after_name) = read_at_rule_name(self.input, self.position + 1);
        match find_prelude_end(self.input, after_name) {
            PreludeEnd::Semicolon(i) => self.emit_verbatim(i + 1),
            PreludeEnd::Eof => self.emit_remainder(),
            PreludeEnd::OpenBrace(i) => match match_balanced_block(self.input, i + 1) {
                None => self.emit_remainder(),
                Some(span) => {
                    if !is_grouping_at_rule(&name) {
                        self.emit_verbatim(span.end);
                        return;
                    }
                    // A `@media print { #wrapper { max-width: ... } }`
                    // override is still a dimension grab; recurse.
                    if self.depth >= self.max_depth {
                        warn_once(
                            "Confine",
                            &format!(
                                "grouping at-rule nesting exceeds depth {}; subtree left unstripped",
                                self.max_depth
                            ),
                        );
                        self.emit_verbatim(span.end);
                        return;
                    }
                    self.emit_verbatim(i + 1);
                    let interior = &self.input[i + 1..span.content_end];
                    let inner = StripPass {
                        input: interior,
                        position: 0,
                        output: String::with_capacity(interior.len()),
                        root: self.root,
                        properties: self.properties,
                        max_depth: self.max_depth,
                        depth: self.depth + 1,
                    }
                    .run();
                    self.output.push_str(&inner);
                    self.output.push('}');
                    self.position = span.end;
                }
            },
        }
    }

    fn consume_qualified_rule(&mut self) {
        match find_prelude_end(self.input, self.position) {
            PreludeEnd::Semicolon(i) => self.emit_verbatim(i + 1),
            PreludeEnd::Eof => self.emit_remainder(),
            PreludeEnd::OpenBrace(i) => match match_balanced_block(self.input, i + 1) {
                None => self.emit_remainder(),
                Some(span) => {
                    let prelude: String = self.input[self.position..i].iter().collect();
                    if !targets_root_exclusively(&prelude, self.root) {
                        self.emit_verbatim(span.end);
                        return;
                    }
                    let body: String = self.input[i + 1..span.content_end].iter().collect();
                    match filter_declarations(&body, self.properties) {
                        // Every declaration was host-reserved; the rule
                        // has nothing left to say.
                        None => self.position = span.end,
                        Some(filtered) => {
                            // Original prelude and opening brace.
                            self.emit_verbatim(i + 1);
                            self.output.push_str(&filtered);
                            self.output.push('}');
                            self.position = span.end;
                        }
                    }
                }
            },
        }
    }
}

/// Whether a selector list directly and exclusively targets `root`: every
/// comma-listed member, trimmed, is exactly the root. A descendant match
/// like `#wrapper h1` does not qualify.
fn targets_root_exclusively(selector_list: &str, root: &str) -> bool {
    let mut saw_member = false;
    for member in split_top_level_commas(selector_list) {
        let member = member.trim();
        if member.is_empty() {
            continue;
        }
        if member != root {
            return false;
        }
        saw_member = true;
    }
    saw_member
}

/// Split a declaration body on top-level `;`, drop declarations whose
/// property name (case-insensitive, up to the first `:`) is in the set,
/// and rejoin. Returns `None` when nothing survives.
fn filter_declarations(body: &str, properties: &LayoutPropertySet) -> Option<String> {
    let segments = split_declarations(body);
    let last = segments.len() - 1;
    let mut kept: Vec<&str> = Vec::new();
    let mut tail = "";
    for (idx, segment) in segments.iter().enumerate() {
        if segment.trim().is_empty() {
            // Whitespace after the final `;` is closing formatting, not a
            // declaration; keep it with the body.
            if idx == last {
                tail = segment;
            }
            continue;
        }
        let name = segment
            .split_once(':')
            .map_or(segment.as_str(), |(name, _)| name)
            .trim();
        if properties.contains(name) {
            continue;
        }
        kept.push(segment);
    }
    if kept.is_empty() {
        return None;
    }
    let mut out = kept.join(";");
    out.push(';');
    out.push_str(tail);
    Some(out)
}

/// Split a declaration body on top-level `;`. Semicolons inside comments,
/// quoted strings, and parentheses (`url(data:...;base64,...)`) do not
/// separate declarations.
pub(crate) fn split_declarations(body: &str) -> Vec<String> {
    let chars: Vec<char> = body.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut parens = 0usize;
    let mut i = 0;
    while i < chars.len() {
        if at_comment_start(&chars, i) {
            let end = consume_comment(&chars, i);
            current.extend(&chars[i..end]);
            i = end;
            continue;
        }
        let c = chars[i];
        if c == '"' || c == '\'' {
            let end = consume_string(&chars, i);
            current.extend(&chars[i..end]);
            i = end;
            continue;
        }
        match c {
            '(' => parens += 1,
            ')' => parens = parens.saturating_sub(1),
            ';' if parens == 0 => {
                parts.push(std::mem::take(&mut current));
                i += 1;
                continue;
            }
            _ => {}
        }
        current.push(c);
        i += 1;
    }
    parts.push(current);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusive_root_match_is_not_a_descendant_match() {
        assert!(targets_root_exclusively("#wrapper", "#wrapper"));
        assert!(targets_root_exclusively(" #wrapper , #wrapper ", "#wrapper"));
        assert!(!targets_root_exclusively("#wrapper h1", "#wrapper"));
        assert!(!targets_root_exclusively("#wrapper, .foo", "#wrapper"));
        assert!(!targets_root_exclusively("", "#wrapper"));
    }

    #[test]
    fn declaration_split_ignores_semicolons_in_urls() {
        let parts = split_declarations("background: url(data:image/png;base64,AAA); color: red");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1], " color: red");
    }
}

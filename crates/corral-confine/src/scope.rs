//! Scope transformer: full-stylesheet confinement pass.
//!
//! A single left-to-right pass over the stylesheet text with an output
//! accumulator. Whitespace and comments are relocated verbatim; qualified
//! rules have their selector lists rewritten by [`crate::selector`] while
//! their declaration bodies are copied byte-for-byte; grouping at-rules
//! (`@media`, `@supports`, ...) are recursed into, bounded by the policy's
//! depth ceiling.
//!
//! The output is byte-reconstructable modulo selector rewrites and dropped
//! rules. Declaration values are never parsed and never altered here.

use corral_common::warning::warn_once;

use crate::policy::ConfinePolicy;
use crate::scanner::{
    PreludeEnd, at_comment_start, consume_comment, find_prelude_end, is_whitespace,
    match_balanced_block, read_at_rule_name, skip_whitespace,
};
use crate::selector::rewrite_selector_list;

/// At-rules whose block holds further style rules (not declarations) and
/// therefore requires recursive descent.
///
/// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule);
/// the grouping kinds are the conditional group rules of
/// [CSS Conditional Level 3](https://www.w3.org/TR/css-conditional-3/#contents-of)
/// plus `@document` (and its `-moz-` form) and `@layer`.
const GROUPING_AT_RULES: [&str; 5] = ["media", "supports", "document", "-moz-document", "layer"];

/// Whether `name` (lowercased, without the `@`) is a grouping at-rule.
///
/// Non-grouping block at-rules (`@font-face`, `@keyframes`) are copied
/// whole: their interior is not a selector list.
#[must_use]
pub fn is_grouping_at_rule(name: &str) -> bool {
    GROUPING_AT_RULES.contains(&name)
}

/// Confine a stylesheet to the default root (`#wrapper`).
///
/// `max_depth` bounds nested grouping-at-rule descent; subtrees beyond it
/// are emitted unmodified rather than recursed into.
#[must_use]
pub fn scope_to_root(css: &str, max_depth: usize) -> String {
    let policy = ConfinePolicy {
        max_depth,
        ..ConfinePolicy::default()
    };
    scope_with_policy(css, &policy)
}

/// Confine a stylesheet under the policy's confinement root.
#[must_use]
pub fn scope_with_policy(css: &str, policy: &ConfinePolicy) -> String {
    let input: Vec<char> = css.chars().collect();
    ScopePass::new(&input, policy, 0).run()
}

/// One confinement pass over one nesting level of the stylesheet.
///
/// Owns its accumulator; no state persists across calls, so independent
/// invocations may run concurrently without coordination.
struct ScopePass<'a> {
    /// The text being scanned.
    input: &'a [char],
    /// Current cursor, advanced monotonically.
    position: usize,
    /// Output accumulator.
    output: String,
    /// Read-only confinement configuration.
    policy: &'a ConfinePolicy,
    /// Current grouping-at-rule nesting depth.
    depth: usize,
}

impl<'a> ScopePass<'a> {
    fn new(input: &'a [char], policy: &'a ConfinePolicy, depth: usize) -> Self {
        Self {
            input,
            position: 0,
            // Rewrites add roughly one root prefix per rule.
            output: String::with_capacity(input.len() + 64),
            policy,
            depth,
        }
    }

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

    /// Copy `input[position..end]` to the output unchanged.
    fn emit_verbatim(&mut self, end: usize) {
        self.output.extend(&self.input[self.position..end]);
        self.position = end;
    }

    /// Fail open: copy everything left unchanged.
    ///
    /// A sandbox that crashes on bad input is worse than one that passes
    /// it through unmodified; the loader never treats "returned without
    /// throwing" as proof of correct scoping.
    fn emit_remainder(&mut self) {
        let end = self.input.len();
        self.emit_verbatim(end);
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    fn consume_at_rule(&mut self) {
        let (name, after_name) = read_at_rule_name(self.input, self.position + 1);
        match find_prelude_end(self.input, after_name) {
            // Statement form (`@import url(...);`, `@layer a, b;`): copied
            // unchanged.
            PreludeEnd::Semicolon(i) => self.emit_verbatim(i + 1),
            PreludeEnd::Eof => self.emit_remainder(),
            PreludeEnd::OpenBrace(i) => match match_balanced_block(self.input, i + 1) {
                None => self.emit_remainder(),
                Some(span) => {
                    if is_grouping_at_rule(&name) {
                        self.descend_into_group(i, span.content_end, span.end);
                    } else {
                        // `@font-face`, `@keyframes`: the interior is not
                        // a selector list.
                        self.emit_verbatim(span.end);
                    }
                }
            },
        }
    }

    /// Re-run the full transform on a grouping at-rule's interior at
    /// depth + 1, re-wrapped with the original prelude and braces.
    ///
    /// The depth bound is checked before the descent: past the ceiling the
    /// whole subtree is emitted unmodified - an unscoped-but-bounded
    /// result is preferred to unbounded recursion.
    fn descend_into_group(&mut self, open_brace: usize, content_end: usize, end: usize) {
        if self.depth >= self.policy.max_depth {
            warn_once(
                "Confine",
                &format!(
                    "grouping at-rule nesting exceeds depth {}; subtree left unscoped",
                    self.policy.max_depth
                ),
            );
            self.emit_verbatim(end);
            return;
        }
        // Original prelude and opening brace.
        self.emit_verbatim(open_brace + 1);
        let interior = &self.input[open_brace + 1..content_end];
        let inner = ScopePass::new(interior, self.policy, self.depth + 1).run();
        self.output.push_str(&inner);
        self.output.push('}');
        self.position = end;
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    ///
    /// Read up to the `{`, classify the selector list, copy the declaration
    /// body unchanged. The rule is suppressed entirely when every selector
    /// in the list drops.
    fn consume_qualified_rule(&mut self) {
        match find_prelude_end(self.input, self.position) {
            // A `;` before any `{` is not a qualified rule; relocate the
            // stray statement unchanged.
            PreludeEnd::Semicolon(i) => self.emit_verbatim(i + 1),
            PreludeEnd::Eof => self.emit_remainder(),
            PreludeEnd::OpenBrace(i) => match match_balanced_block(self.input, i + 1) {
                None => self.emit_remainder(),
                Some(span) => {
                    let prelude: String = self.input[self.position..i].iter().collect();
                    if let Some(selectors) = rewrite_selector_list(&prelude, self.policy) {
                        self.output.push_str(&selectors);
                        self.output.push_str(" {");
                        self.output.extend(&self.input[i + 1..span.content_end]);
                        self.output.push('}');
                    }
                    self.position = span.end;
                }
            },
        }
    }
}

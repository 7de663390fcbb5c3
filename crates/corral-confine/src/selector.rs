//! Selector classifier and rewriter.
//!
//! Maps one raw selector to zero-or-one confinement-scoped selectors. This
//! is deliberately not a selector parser per
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/); the classifier
//! only needs to recognize a handful of shapes (the root keywords, the
//! universal selector, the protected-content denylist, an already-rooted
//! selector) and otherwise prefixes the confinement root as an ancestor
//! via the descendant combinator.

use crate::policy::ConfinePolicy;
use crate::scanner::{at_comment_start, consume_comment, consume_string, is_ident_code_point};

/// Selector keywords that address the page root and are remapped onto the
/// confinement root.
///
/// [§ 4.4 :root](https://www.w3.org/TR/selectors-4/#the-root-pseudo)
/// "The :root pseudo-class represents an element that is the root of the
/// document."
const ROOT_KEYWORDS: [&str; 3] = [":root", "body", "html"];

/// Characters that may follow a denylist entry in a protected compound:
/// a combinator, an attribute bracket, or a pseudo colon.
///
/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
const PROTECTED_QUALIFIERS: [char; 7] = [' ', '\t', '\n', '>', '+', '~', '['];

/// Characters that may follow a root keyword in a root-typed compound
/// (`body.dark`, `html[lang]`, `body > p`).
const ROOT_QUALIFIERS: [char; 10] = ['.', '#', '[', ':', ' ', '\t', '\n', '>', '+', '~'];

/// Classify one raw selector, producing its confinement-scoped rewrite.
///
/// Returns `None` when the selector must be dropped entirely. The rules
/// apply in strict precedence order:
///
/// 1. Empty/whitespace-only - drop.
/// 2. Starts with `@` or a comment marker - pass through unchanged.
/// 3. Protected-content denylist match - drop.
/// 4. Already targets the confinement root (word-boundary match) - pass
///    through unchanged.
/// 5. Exactly `:root`, `body`, or `html` - replaced wholesale by the root.
/// 6. Universal selector `*` - becomes `<root> *`.
/// 7. Root-typed compound (`body.dark`) - leading type replaced by the
///    root, qualifier retained.
/// 8. Anything else - prefixed with `<root> ` (descendant combinator).
#[must_use]
pub fn classify_selector(selector: &str, policy: &ConfinePolicy) -> Option<String> {
    let trimmed = selector.trim();

    // 1. Nothing survives of an empty list member.
    if trimmed.is_empty() {
        return None;
    }

    // 2. At-rule text or a comment reaching the classifier means the caller
    // mis-detected a rule boundary; pass it through rather than mangle it.
    if trimmed.starts_with('@') || trimmed.starts_with("/*") {
        return Some(trimmed.to_string());
    }

    // 3. Protected content is never restyled by third-party CSS.
    if is_protected(trimmed, policy) {
        return None;
    }

    // 4. Word-boundary, not substring containment: a class literally named
    // `#wrapper-foo` is not "already rooted", while `#wrapper .x` is.
    // Substring matching under-scopes partially-prefixed stylesheets.
    if contains_word(trimmed, &policy.root) || contains_word(trimmed, &policy.reserved_root) {
        return Some(trimmed.to_string());
    }

    // 5. The page root keywords collapse onto the confinement root.
    if ROOT_KEYWORDS.iter().any(|kw| trimmed.eq_ignore_ascii_case(kw)) {
        return Some(policy.root.clone());
    }

    // 6. [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    // `*` would repaint the whole page; confine it to the root's subtree.
    if trimmed == "*" {
        return Some(format!("{} *", policy.root));
    }

    // 7. `body.dark` means "the page root, when dark" - the condition
    // belongs on the confinement root, not on a descendant named `body`.
    for kw in ROOT_KEYWORDS {
        if let Some(rest) = strip_prefix_ignore_case(trimmed, kw) {
            if rest.starts_with(ROOT_QUALIFIERS) {
                return Some(format!("{}{rest}", policy.root));
            }
        }
    }

    // 8. Everything else nests under the root as a descendant.
    Some(format!("{} {trimmed}", policy.root))
}

/// Rewrite a comma-separated selector list.
///
/// Each member is classified independently; dropped members are discarded
/// and survivors rejoined with `", "`. Returns `None` when every member
/// drops, in which case the caller omits the entire rule.
#[must_use]
pub fn rewrite_selector_list(list: &str, policy: &ConfinePolicy) -> Option<String> {
    let mut survivors = Vec::new();
    for member in split_top_level_commas(list) {
        if let Some(rewritten) = classify_selector(&member, policy) {
            survivors.push(rewritten);
        }
    }
    if survivors.is_empty() {
        None
    } else {
        Some(survivors.join(", "))
    }
}

/// Whether `selector` matches the protected-content denylist: equal to an
/// entry, or an entry followed by a combinator, attribute bracket, or
/// pseudo colon (`pre >`, `code[...]`, `.hljs:hover`).
fn is_protected(selector: &str, policy: &ConfinePolicy) -> bool {
    for entry in &policy.protected {
        if selector == entry {
            return true;
        }
        if let Some(rest) = selector.strip_prefix(entry.as_str()) {
            if rest.starts_with(PROTECTED_QUALIFIERS) || rest.starts_with(':') {
                return true;
            }
        }
    }
    false
}

/// Word-boundary containment test: `needle` occurs in `haystack` with no
/// ident code point on either side.
///
/// This treats `#wrapper` as distinct from `#wrapper-foo` (a hyphen is an
/// ident code point), which is what keeps the scope transform idempotent.
pub(crate) fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    for (start, _) in haystack.match_indices(needle) {
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !is_ident_code_point(c));
        let after_ok = haystack[start + needle.len()..]
            .chars()
            .next()
            .is_none_or(|c| !is_ident_code_point(c));
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

/// ASCII-case-insensitive `strip_prefix`.
///
/// `get` rather than indexing: `prefix.len()` may land inside a multibyte
/// character of `s` (non-ASCII idents are valid type selectors), which is
/// never a match.
fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Split a selector list on top-level commas.
///
/// Commas inside parentheses (`:not(a, b)`), brackets (`[title="a,b"]`),
/// quoted strings, and comments do not separate members.
pub(crate) fn split_top_level_commas(list: &str) -> Vec<String> {
    let chars: Vec<char> = list.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut parens = 0usize;
    let mut brackets = 0usize;
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
            '[' => brackets += 1,
            ']' => brackets = brackets.saturating_sub(1),
            ',' if parens == 0 && brackets == 0 => {
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

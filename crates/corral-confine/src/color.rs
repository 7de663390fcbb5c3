//! Background color extractor.
//!
//! Pulls one validated color value from the confinement root's rule so the
//! host can coordinate its light/dark chrome with the loaded theme -
//! without a general value parser. Only values matching a closed grammar
//! are accepted: hex triplet/sextet, a fixed named-color list, and the
//! `rgb()`/`rgba()`/`hsl()`/`hsla()` functions with numeric arguments.
//!
//! This is a security boundary, not a convenience: the captured string is
//! later assigned into a DOM inline-style context, so "reject anything
//! outside the closed grammar" replaces any need to escape or encode.
//! "No color found" is a normal, common outcome - the caller defaults to
//! a known-light baseline.

use crate::policy::DEFAULT_MAX_DEPTH;
use crate::scanner::{
    PreludeEnd, at_comment_start, consume_comment, find_prelude_end, is_whitespace,
    match_balanced_block, read_at_rule_name, skip_whitespace,
};
use crate::scope::is_grouping_at_rule;
use crate::strip::split_declarations;

/// Extract the root rule's background color, if it passes the closed
/// grammar.
///
/// The first rule block whose selector text exactly equals `root` (at the
/// top level or inside grouping at-rules, depth-bounded) is consulted;
/// within it the last `background`/`background-color` declaration wins.
/// `var(...)`, gradients, `url()`, and multi-layer backgrounds are
/// rejected.
#[must_use]
pub fn extract_background_color(css: &str, root: &str) -> Option<String> {
    let input: Vec<char> = css.chars().collect();
    let body = find_root_block_body(&input, root, 0)?;
    let value = last_background_value(&body)?;
    validate_color(&value)
}

/// Find the declaration body of the first rule whose selector text exactly
/// equals `root`.
fn find_root_block_body(input: &[char], root: &str, depth: usize) -> Option<String> {
    let mut position = 0usize;
    while position < input.len() {
        let c = input[position];
        if is_whitespace(c) {
            position = skip_whitespace(input, position);
            continue;
        }
        if at_comment_start(input, position) {
            position = consume_comment(input, position);
            continue;
        }
        if c == '@' {
            let (name, after_name) = read_at_rule_name(input, position + 1);
            match find_prelude_end(input, after_name) {
                PreludeEnd::Semicolon(i) => position = i + 1,
                PreludeEnd::Eof => return None,
                PreludeEnd::OpenBrace(i) => {
                    let span = match_balanced_block(input, i + 1)?;
                    // Themes sometimes set the root background only inside
                    // `@media (prefers-color-scheme: dark)`.
                    if is_grouping_at_rule(&name) && depth < DEFAULT_MAX_DEPTH {
                        let interior = &input[i + 1..span.content_end];
                        if let Some(body) = find_root_block_body(interior, root, depth + 1) {
                            return Some(body);
                        }
                    }
                    position = span.end;
                }
            }
            continue;
        }
        match find_prelude_end(input, position) {
            PreludeEnd::Semicolon(i) => position = i + 1,
            PreludeEnd::Eof => return None,
            PreludeEnd::OpenBrace(i) => {
                let span = match_balanced_block(input, i + 1)?;
                let prelude: String = input[position..i].iter().collect();
                if prelude.trim() == root {
                    return Some(input[i + 1..span.content_end].iter().collect());
                }
                position = span.end;
            }
        }
    }
    None
}

/// The last `background`/`background-color` value in a declaration body
/// (cascade order: later declarations win), trimmed, `!important` removed.
fn last_background_value(body: &str) -> Option<String> {
    let mut found = None;
    for segment in split_declarations(body) {
        let Some((name, value)) = segment.split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        if name == "background" || name == "background-color" {
            found = Some(strip_important(value.trim()).to_string());
        }
    }
    found
}

/// Remove a trailing `!important` from a captured value.
fn strip_important(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    lower
        .rfind("!important")
        .filter(|&i| lower[i + "!important".len()..].trim().is_empty())
        .map_or(value, |i| value[..i].trim_end())
}

/// Validate a captured value against the closed color grammar.
///
/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax),
/// restricted to the shapes a theme's base background realistically uses.
fn validate_color(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    // [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    if let Some(hex) = value.strip_prefix('#') {
        let ok = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
        return ok.then(|| value.to_string());
    }
    // [§ 4.1 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
    // [§ 4.1 The HSL functions](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
    let lower = value.to_ascii_lowercase();
    for prefix in ["rgb(", "rgba(", "hsl(", "hsla("] {
        if let Some(rest) = lower.strip_prefix(prefix) {
            let Some(args) = rest.strip_suffix(')') else {
                return None;
            };
            let ok = !args.contains('(')
                && args.chars().any(|c| c.is_ascii_digit())
                && args.chars().all(is_color_arg_char);
            return ok.then(|| value.to_string());
        }
    }
    // [§ 6.1 Named colors](https://www.w3.org/TR/css-color-4/#named-colors)
    // A multi-layer value (`url(bg.png) #fff`) contains whitespace and
    // falls through both branches above; a lone ident is only accepted
    // from the fixed table.
    if lower.chars().all(|c| c.is_ascii_alphabetic()) && named_color(&lower).is_some() {
        return Some(value.to_string());
    }
    None
}

/// Characters permitted inside the rgb/hsl functional notations: digits,
/// sign, decimal point, percent, the legacy comma and the modern
/// space/slash separators.
fn is_color_arg_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ',' | '%' | '/' | '+' | '-' | ' ' | '\t' | '\n')
}

/// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
///
/// The fixed named-color table: the basic CSS colors plus the grays and
/// off-whites dark/light themes actually use as page backgrounds. Not the
/// full X11 set - an unknown name is a grammar rejection, by design.
#[must_use]
pub fn named_color(name: &str) -> Option<(u8, u8, u8)> {
    match name.to_ascii_lowercase().as_str() {
        "black" => Some((0, 0, 0)),
        "silver" => Some((192, 192, 192)),
        "gray" | "grey" => Some((128, 128, 128)),
        "white" => Some((255, 255, 255)),
        "maroon" => Some((128, 0, 0)),
        "red" => Some((255, 0, 0)),
        "purple" => Some((128, 0, 128)),
        "fuchsia" | "magenta" => Some((255, 0, 255)),
        "green" => Some((0, 128, 0)),
        "lime" => Some((0, 255, 0)),
        "olive" => Some((128, 128, 0)),
        "yellow" => Some((255, 255, 0)),
        "navy" => Some((0, 0, 128)),
        "blue" => Some((0, 0, 255)),
        "teal" => Some((0, 128, 128)),
        "aqua" | "cyan" => Some((0, 255, 255)),
        "orange" => Some((255, 165, 0)),
        "darkgray" | "darkgrey" => Some((169, 169, 169)),
        "dimgray" | "dimgrey" => Some((105, 105, 105)),
        "lightgray" | "lightgrey" => Some((211, 211, 211)),
        "gainsboro" => Some((220, 220, 220)),
        "whitesmoke" => Some((245, 245, 245)),
        "slategray" | "slategrey" => Some((112, 128, 144)),
        "darkslategray" | "darkslategrey" => Some((47, 79, 79)),
        "lightslategray" | "lightslategrey" => Some((119, 136, 153)),
        "midnightblue" => Some((25, 25, 112)),
        "ivory" => Some((255, 255, 240)),
        "beige" => Some((245, 245, 220)),
        "linen" => Some((250, 240, 230)),
        "snow" => Some((255, 250, 250)),
        "seashell" => Some((255, 245, 238)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn important_is_stripped_from_captured_values() {
        assert_eq!(strip_important("#1e1e1e !important"), "#1e1e1e");
        assert_eq!(strip_important("#1e1e1e"), "#1e1e1e");
    }

    #[test]
    fn closed_grammar_rejects_open_ended_values() {
        assert!(validate_color("var(--bg)").is_none());
        assert!(validate_color("linear-gradient(#fff, #000)").is_none());
        assert!(validate_color("url(bg.png) #fff").is_none());
        assert!(validate_color("rgb(calc(1+1), 0, 0)").is_none());
    }
}

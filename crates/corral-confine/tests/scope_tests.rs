//! Integration tests for the scope transformer.

use corral_confine::policy::ConfinePolicy;
use corral_confine::scope::{scope_to_root, scope_with_policy};

fn scope(css: &str) -> String {
    scope_to_root(css, 10)
}

#[test]
fn test_scenario_body_and_protected_list() {
    let css = "body { color: blue; } .foo, pre { font-size: 1em; }";
    assert_eq!(
        scope(css),
        "#wrapper { color: blue; } #wrapper .foo { font-size: 1em; }"
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(scope(""), "");
}

#[test]
fn test_declaration_bodies_copied_verbatim() {
    // Values are never parsed and never altered by the scope pass.
    let css = "h1 { font: 12px/1.4 \"Fira Sans\", sans-serif; }";
    assert_eq!(
        scope(css),
        "#wrapper h1 { font: 12px/1.4 \"Fira Sans\", sans-serif; }"
    );
}

#[test]
fn test_comments_and_whitespace_relocated_verbatim() {
    let css = "/* theme */\n\np { color: red; }\n";
    assert_eq!(scope(css), "/* theme */\n\n#wrapper p { color: red; }\n");
}

#[test]
fn test_already_scoped_stylesheet_is_fixed_point() {
    let css = "body { color: blue; } * { margin: 0; } .foo, pre { x: y; }";
    let once = scope(css);
    let twice = scope(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_protected_rule_dropped_entirely() {
    // Selector list AND declarations are omitted when every member drops.
    let css = ".hljs { background: red; }";
    assert_eq!(scope(css).trim(), "");
}

#[test]
fn test_protection_applies_to_leading_compound_only() {
    // `pre` and `code span` start with a protected selector and drop;
    // `p pre` does not (the protected element is a descendant there) and
    // is prefixed like any other selector.
    let css = "pre { a: b; } code span { c: d; } p pre { e: f; } .hljs-keyword { g: h; }";
    assert_eq!(
        scope(css),
        "  #wrapper p pre { e: f; } #wrapper .hljs-keyword { g: h; }"
    );
}

#[test]
fn test_at_rule_statement_copied_unchanged() {
    let css = "@import url(\"theme.css\");\np { color: red; }";
    assert_eq!(
        scope(css),
        "@import url(\"theme.css\");\n#wrapper p { color: red; }"
    );
}

#[test]
fn test_charset_statement_copied_unchanged() {
    let css = "@charset \"utf-8\"; body { color: red; }";
    assert_eq!(scope(css), "@charset \"utf-8\"; #wrapper { color: red; }");
}

#[test]
fn test_non_grouping_at_rule_copied_whole() {
    // A keyframes interior is not a selector list; `from`/`to` must not
    // be prefixed.
    let css = "@keyframes spin { from { transform: none; } to { transform: rotate(1turn); } }";
    assert_eq!(scope(css), css);
}

#[test]
fn test_font_face_copied_whole() {
    let css = "@font-face { font-family: X; src: url(x.woff2); }";
    assert_eq!(scope(css), css);
}

#[test]
fn test_media_block_interior_is_scoped() {
    let css = "@media (min-width: 600px) { body { color: red; } }";
    assert_eq!(
        scope(css),
        "@media (min-width: 600px) { #wrapper { color: red; } }"
    );
}

#[test]
fn test_supports_block_interior_is_scoped() {
    let css = "@supports (display: grid) { .grid { display: grid; } }";
    assert_eq!(
        scope(css),
        "@supports (display: grid) { #wrapper .grid { display: grid; } }"
    );
}

#[test]
fn test_nested_grouping_rules_scope_at_each_level() {
    let css = "@media screen { @supports (gap: 0) { p { gap: 0; } } }";
    assert_eq!(
        scope(css),
        "@media screen { @supports (gap: 0) { #wrapper p { gap: 0; } } }"
    );
}

#[test]
fn test_fifty_nested_media_blocks_terminate() {
    let mut css = "body { color: red; }".to_string();
    for _ in 0..50 {
        css = format!("@media screen {{ {css} }}");
    }
    let out = scope_to_root(&css, 10);
    // Within the bound the interiors are scoped; beyond it the offending
    // subtree is emitted unmodified - never a panic, never a loop.
    assert!(out.starts_with("@media screen {"));
    assert!(out.contains("body { color: red; }"));
    assert!(!out.contains("#wrapper"));
}

#[test]
fn test_deeply_nested_within_bound_is_scoped() {
    let mut css = "body { color: red; }".to_string();
    for _ in 0..5 {
        css = format!("@media screen {{ {css} }}");
    }
    let out = scope_to_root(&css, 10);
    assert!(out.contains("#wrapper { color: red; }"));
}

#[test]
fn test_unbalanced_braces_fail_open() {
    // Copy the remainder verbatim from the point malformation was
    // detected; a sandbox that crashes on bad input is worse than one
    // that passes it through unmodified.
    let css = "div { color: red";
    assert_eq!(scope(css), css);
}

#[test]
fn test_unterminated_comment_fails_open() {
    let css = "p { color: red; } /* trailing";
    assert_eq!(scope(css), "#wrapper p { color: red; } /* trailing");
}

#[test]
fn test_non_ascii_selectors_are_confined() {
    let css = "bodé { color: red; } .área { margin: 0; }";
    assert_eq!(
        scope(css),
        "#wrapper bodé { color: red; } #wrapper .área { margin: 0; }"
    );
}

#[test]
fn test_stray_semicolon_relocated() {
    let css = "; p { color: red; }";
    assert_eq!(scope(css), "; #wrapper p { color: red; }");
}

#[test]
fn test_selector_occurrence_preservation() {
    // M surviving members -> exactly M rewritten occurrences.
    let css = "h1, h2, h3 { a: b; } .x { c: d; }";
    let out = scope(css);
    assert_eq!(out.matches("#wrapper ").count(), 4);
}

#[test]
fn test_scope_with_custom_policy() {
    let policy = ConfinePolicy::with_root("#sandbox");
    let out = scope_with_policy("body { color: red; }", &policy);
    assert_eq!(out, "#sandbox { color: red; }");
}

#[test]
fn test_mixed_stylesheet_end_to_end() {
    let css = concat!(
        "/* dark theme */\n",
        "@charset \"utf-8\";\n",
        ":root { --bg: #111; }\n",
        "body { background: #111; }\n",
        "* { box-sizing: border-box; }\n",
        "pre, code { font-family: monospace; }\n",
        "@media print { body { background: white; } }\n",
    );
    let out = scope(css);
    // The dropped `pre, code` rule leaves its surrounding whitespace
    // behind, hence the blank line.
    assert_eq!(
        out,
        concat!(
            "/* dark theme */\n",
            "@charset \"utf-8\";\n",
            "#wrapper { --bg: #111; }\n",
            "#wrapper { background: #111; }\n",
            "#wrapper * { box-sizing: border-box; }\n",
            "\n",
            "@media print { #wrapper { background: white; } }\n",
        )
    );
}

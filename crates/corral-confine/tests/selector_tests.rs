//! Integration tests for selector classification and rewriting.

use corral_confine::policy::ConfinePolicy;
use corral_confine::selector::{classify_selector, rewrite_selector_list};

fn classify(selector: &str) -> Option<String> {
    classify_selector(selector, &ConfinePolicy::default())
}

#[test]
fn test_empty_selector_drops() {
    assert_eq!(classify(""), None);
    assert_eq!(classify("   \t "), None);
}

#[test]
fn test_at_text_passes_through() {
    // A rule boundary mis-detection must not be mangled further.
    assert_eq!(classify("@media screen").as_deref(), Some("@media screen"));
}

#[test]
fn test_protected_bare_selectors_drop() {
    assert_eq!(classify("pre"), None);
    assert_eq!(classify("code"), None);
    assert_eq!(classify(".hljs"), None);
}

#[test]
fn test_protected_compounds_drop() {
    assert_eq!(classify("pre code"), None);
    assert_eq!(classify("code > span"), None);
    assert_eq!(classify(".hljs:hover"), None);
    assert_eq!(classify("pre[data-lang]"), None);
}

#[test]
fn test_protected_lookalikes_are_not_protected() {
    // `precis` and `.hljs-keyword` are different names entirely.
    assert_eq!(classify("precis").as_deref(), Some("#wrapper precis"));
    assert_eq!(
        classify(".hljs-keyword").as_deref(),
        Some("#wrapper .hljs-keyword")
    );
}

#[test]
fn test_already_rooted_passes_through() {
    assert_eq!(classify("#wrapper").as_deref(), Some("#wrapper"));
    assert_eq!(classify("#wrapper h1").as_deref(), Some("#wrapper h1"));
    assert_eq!(classify(".dark #wrapper p").as_deref(), Some(".dark #wrapper p"));
}

#[test]
fn test_reserved_root_passes_through() {
    assert_eq!(classify("#preview .toolbar").as_deref(), Some("#preview .toolbar"));
}

#[test]
fn test_word_boundary_not_substring() {
    // A class literally named `#wrapper-foo` is NOT already rooted; the
    // old substring check under-scoped exactly this case.
    assert_eq!(
        classify("#wrapper-foo").as_deref(),
        Some("#wrapper #wrapper-foo")
    );
}

#[test]
fn test_page_root_keywords_replaced_wholesale() {
    assert_eq!(classify(":root").as_deref(), Some("#wrapper"));
    assert_eq!(classify("body").as_deref(), Some("#wrapper"));
    assert_eq!(classify("html").as_deref(), Some("#wrapper"));
    assert_eq!(classify("BODY").as_deref(), Some("#wrapper"));
}

#[test]
fn test_universal_selector_confined() {
    assert_eq!(classify("*").as_deref(), Some("#wrapper *"));
}

#[test]
fn test_root_typed_compound_keeps_qualifier() {
    assert_eq!(classify("body.dark").as_deref(), Some("#wrapper.dark"));
    assert_eq!(classify("html[lang]").as_deref(), Some("#wrapper[lang]"));
    assert_eq!(classify(":root.theme").as_deref(), Some("#wrapper.theme"));
    assert_eq!(classify("body > p").as_deref(), Some("#wrapper > p"));
}

#[test]
fn test_root_keyword_prefix_of_longer_name_is_not_compound() {
    // `bodyguard` is an ordinary type selector.
    assert_eq!(classify("bodyguard").as_deref(), Some("#wrapper bodyguard"));
}

#[test]
fn test_default_descendant_prefix() {
    assert_eq!(classify("h1").as_deref(), Some("#wrapper h1"));
    assert_eq!(classify(".foo .bar").as_deref(), Some("#wrapper .foo .bar"));
    assert_eq!(classify("a:hover").as_deref(), Some("#wrapper a:hover"));
}

#[test]
fn test_list_rewrites_each_member() {
    let out = rewrite_selector_list("h1, h2", &ConfinePolicy::default());
    assert_eq!(out.as_deref(), Some("#wrapper h1, #wrapper h2"));
}

#[test]
fn test_list_discards_dropped_members() {
    let out = rewrite_selector_list(".foo, pre, .bar", &ConfinePolicy::default());
    assert_eq!(out.as_deref(), Some("#wrapper .foo, #wrapper .bar"));
}

#[test]
fn test_list_with_all_members_dropped() {
    assert_eq!(
        rewrite_selector_list("pre, code, .hljs", &ConfinePolicy::default()),
        None
    );
}

#[test]
fn test_list_comma_inside_functional_notation() {
    let out = rewrite_selector_list(":is(h1, h2), em", &ConfinePolicy::default());
    assert_eq!(
        out.as_deref(),
        Some("#wrapper :is(h1, h2), #wrapper em")
    );
}

#[test]
fn test_non_ascii_type_selectors_are_prefixed() {
    // `bodé` shares its first bytes with `body` but is an ordinary type
    // selector; the root-keyword comparison must respect char boundaries.
    assert_eq!(classify("bodé").as_deref(), Some("#wrapper bodé"));
    assert_eq!(classify("htmlové").as_deref(), Some("#wrapper htmlové"));
    assert_eq!(classify(".área").as_deref(), Some("#wrapper .área"));
}

#[test]
fn test_custom_root_policy() {
    let policy = ConfinePolicy::with_root("#sandbox");
    assert_eq!(
        classify_selector("body", &policy).as_deref(),
        Some("#sandbox")
    );
    assert_eq!(
        classify_selector("#sandbox p", &policy).as_deref(),
        Some("#sandbox p")
    );
}

#[test]
fn test_idempotent_classification() {
    // Re-classifying a rewritten selector is the identity: the rewrite
    // mentions the root at a word boundary, so it passes through.
    for raw in ["body", "*", "h1", ".foo, .bar", "body.dark"] {
        let once = rewrite_selector_list(raw, &ConfinePolicy::default()).unwrap();
        let twice = rewrite_selector_list(&once, &ConfinePolicy::default()).unwrap();
        assert_eq!(once, twice, "selector {raw:?} was not idempotent");
    }
}

//! CSS confinement engine for the Corral markdown previewer.
//!
//! Third-party preview CSS (uploaded files, fetched URLs, repository
//! assets) is absorbed and neutralized so it cannot escape the single
//! preview container, override host-controlled layout, or exploit
//! catastrophic-backtracking patterns.
//!
//! # Scope
//!
//! This crate implements:
//! - **Scanner Primitives** - shared cursor operations (whitespace,
//!   comments, brace matching, at-rule boundaries) per
//!   [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization)
//! - **Selector Classifier & Rewriter** - maps one raw selector to
//!   zero-or-one confinement-scoped selectors
//! - **Scope Transformer** - full-stylesheet confinement pass, recursing
//!   into grouping at-rules
//! - **Layout Property Stripper** - removes host-reserved box-model
//!   declarations from rules that directly target the confinement root
//! - **Background Color Extractor** - pulls one validated color value from
//!   the root rule for theme-mode coordination
//! - **Print-Rule Policy** - host-flagged handling of `@media print`
//!
//! # Explicitly not implemented
//!
//! - A general CSS parser (no value tokenizer, no AST - rules are
//!   classified as transient spans and re-emitted immediately)
//! - Validation of arbitrary CSS correctness (malformed input fails open:
//!   the remainder is copied verbatim, never an error)
//! - Any rewriting of declaration values beyond the layout-property strip
//!   and the background-color capture
//!
//! Every operation is a pure `&str -> String` function over read-only
//! configuration; no instance state persists across calls. Total work is
//! O(n · `max_depth`).

/// Background color extraction with a closed value grammar.
pub mod color;
/// Host-supplied confinement configuration records.
pub mod policy;
/// Host-flagged `@media print` handling.
pub mod print;
/// Shared cursor operations per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod scanner;
/// Full-stylesheet confinement pass.
pub mod scope;
/// Selector classification and rewriting.
pub mod selector;
/// Host-reserved layout property stripping.
pub mod strip;

// Re-exports for convenience
pub use color::{extract_background_color, named_color};
pub use policy::{ConfinePolicy, DEFAULT_MAX_DEPTH, LayoutPropertySet};
pub use print::{PrintRulePolicy, strip_print_rules};
pub use scope::{scope_to_root, scope_with_policy};
pub use selector::{classify_selector, rewrite_selector_list};
pub use strip::strip_layout_properties;

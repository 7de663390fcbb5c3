//! Host-supplied confinement configuration.
//!
//! The engine itself is stateless; everything a pass needs to know - the
//! confinement root, the protected-content denylist, the layout property
//! set, the recursion ceiling - arrives through these records. The host
//! (theme loader, tests, CLI) owns them and may persist them, hence the
//! serde derives.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Default ceiling on nested grouping-at-rule descent.
///
/// Ten levels of `@media`/`@supports` nesting is far beyond anything a
/// real theme ships; deeper nesting is treated as adversarial and left
/// unscoped rather than recursed into.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// The confinement root and the rules governing selector rewriting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfinePolicy {
    /// The container identifier every rewritten rule must nest under
    /// (e.g. `#wrapper`).
    pub root: String,
    /// A second reserved root that also counts as "already confined".
    ///
    /// The previewer renders into `#wrapper` inside `#preview`; theme CSS
    /// that already targets either is passed through unchanged.
    pub reserved_root: String,
    /// Protected-content selectors third-party CSS may never restyle.
    ///
    /// A selector equal to an entry, or starting with an entry followed by
    /// a combinator, attribute bracket, or pseudo colon, is dropped.
    pub protected: Vec<String>,
    /// Ceiling on nested grouping-at-rule descent.
    pub max_depth: usize,
}

impl Default for ConfinePolicy {
    fn default() -> Self {
        Self {
            root: "#wrapper".to_string(),
            reserved_root: "#preview".to_string(),
            // Syntax-highlighted code output: third-party preview CSS must
            // never repaint it.
            protected: vec![
                "pre".to_string(),
                "code".to_string(),
                ".hljs".to_string(),
            ],
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConfinePolicy {
    /// A policy confining to `root` with the default denylist and depth.
    #[must_use]
    pub fn with_root(root: &str) -> Self {
        Self {
            root: root.to_string(),
            ..Self::default()
        }
    }
}

/// The box-model declarations the host reserves for itself on the
/// confinement root.
///
/// The preview container is a user-resizable panel; loaded stylesheets do
/// not get to dictate its dimensions, `!important` or not. Only rules that
/// directly and exclusively target the root are affected - descendant
/// rules style content, not the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPropertySet {
    /// Lowercased property names subject to stripping.
    names: HashSet<String>,
}

impl Default for LayoutPropertySet {
    fn default() -> Self {
        Self::from_names(&[
            "width",
            "min-width",
            "max-width",
            "margin",
            "margin-top",
            "margin-right",
            "margin-bottom",
            "margin-left",
            "padding",
            "padding-top",
            "padding-right",
            "padding-bottom",
            "padding-left",
        ])
    }
}

impl LayoutPropertySet {
    /// Build a set from explicit property names (stored lowercased).
    #[must_use]
    pub fn from_names(names: &[&str]) -> Self {
        let mut set = HashSet::new();
        for name in names {
            let _ = set.insert(name.to_ascii_lowercase());
        }
        Self { names: set }
    }

    /// Whether `property` (matched case-insensitively) is stripped.
    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.names.contains(&property.to_ascii_lowercase())
    }

    /// Number of properties in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set is empty (stripping disabled).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

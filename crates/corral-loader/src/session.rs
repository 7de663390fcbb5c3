//! Theme session state and the load pipeline.
//!
//! The original loader kept its state in module-level globals ("currently
//! loaded style element", "load in progress", loaded-style history). Here
//! that state is an explicit [`ThemeSession`] passed into loader calls;
//! the confinement engine underneath stays a pure, stateless library.
//!
//! The pipeline order is fixed: scope, then the print-rule policy, then
//! the layout strip, then the background extraction. The strip must run
//! after the scope pass - before it, selectors are not yet canonicalized
//! to mention the confinement root explicitly.

use std::fs;

use thiserror::Error;

use corral_common::warning::clear_warnings;
use corral_confine::{
    ConfinePolicy, LayoutPropertySet, PrintRulePolicy, extract_background_color,
    scope_with_policy, strip_layout_properties, strip_print_rules,
};

use crate::fetch::{FetchError, fetch_text};
use crate::mode::ThemeMode;
use crate::source::{StyleSource, ThemeMeta};

/// Default input-size ceiling: 2 MiB of CSS. The engine's passes are
/// O(n · depth), so this bounds total work against pathological uploads.
pub const DEFAULT_MAX_BYTES: usize = 2 * 1024 * 1024;

/// Host configuration for one load.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Confinement root, denylist, and recursion ceiling.
    pub policy: ConfinePolicy,
    /// Host-reserved box-model properties stripped from root rules.
    pub layout_properties: LayoutPropertySet,
    /// What to do with `@media print` blocks.
    pub print_rules: PrintRulePolicy,
    /// Input-size ceiling in bytes; zero means [`DEFAULT_MAX_BYTES`].
    pub max_bytes: usize,
}

impl LoadOptions {
    fn ceiling(&self) -> usize {
        if self.max_bytes == 0 {
            DEFAULT_MAX_BYTES
        } else {
            self.max_bytes
        }
    }
}

/// A theme that went through the pipeline and is ready to attach.
#[derive(Debug, Clone)]
pub struct LoadedTheme {
    /// The catalog entry this theme was loaded from.
    pub meta: ThemeMeta,
    /// The confined CSS text, ready for a `<style>` element.
    pub css: String,
    /// The validated background color, when the theme declares one the
    /// closed grammar accepts.
    pub background: Option<String>,
    /// Chrome mode implied by the background (light baseline otherwise).
    pub mode: ThemeMode,
}

/// Why a load failed. All user-facing messaging belongs to the caller;
/// the confinement passes themselves never fail.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A local style source could not be read.
    #[error("failed to read stylesheet: {0}")]
    Io(#[from] std::io::Error),
    /// A remote style source could not be fetched.
    #[error("failed to fetch stylesheet: {0}")]
    Fetch(#[from] FetchError),
    /// The stylesheet exceeds the input-size ceiling.
    #[error("stylesheet is {size} bytes, over the {ceiling}-byte ceiling")]
    TooLarge {
        /// Size of the fetched stylesheet.
        size: usize,
        /// The configured ceiling.
        ceiling: usize,
    },
}

/// Explicit loader context: the currently loaded theme plus history.
#[derive(Debug, Clone, Default)]
pub struct ThemeSession {
    /// The theme currently attached to the preview, if any.
    current: Option<LoadedTheme>,
    /// Names of every theme loaded this session, in order.
    history: Vec<String>,
}

impl ThemeSession {
    /// An empty session with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently loaded theme.
    #[must_use]
    pub fn current(&self) -> Option<&LoadedTheme> {
        self.current.as_ref()
    }

    /// Names of every theme loaded this session, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Detach the current theme, returning it.
    pub fn unload(&mut self) -> Option<LoadedTheme> {
        self.current.take()
    }

    /// Fetch, confine, and activate a theme.
    ///
    /// Sources marked `needs_scoping = false` skip the confinement passes
    /// but still go through background extraction so the chrome mode
    /// tracks pre-scoped local assets too.
    ///
    /// # Errors
    ///
    /// Fails when the source cannot be read or fetched, or when the
    /// stylesheet exceeds the size ceiling. Malformed CSS is not an
    /// error - the engine fails open and the theme loads as-is.
    pub fn load(
        &mut self,
        meta: ThemeMeta,
        options: &LoadOptions,
    ) -> Result<&LoadedTheme, LoadError> {
        // Stale depth-guard warnings belong to the previous theme.
        clear_warnings();

        let raw = fetch_source(&meta.source)?;
        let ceiling = options.ceiling();
        if raw.len() > ceiling {
            return Err(LoadError::TooLarge {
                size: raw.len(),
                ceiling,
            });
        }

        let css = if meta.needs_scoping {
            confine(&raw, options)
        } else {
            raw
        };

        let background = extract_background_color(&css, &options.policy.root);
        let mode = ThemeMode::from_background(background.as_deref());

        self.history.push(meta.name.clone());
        let theme = LoadedTheme {
            meta,
            css,
            background,
            mode,
        };
        Ok(self.current.insert(theme))
    }
}

/// Run the confinement passes in their required order.
fn confine(raw: &str, options: &LoadOptions) -> String {
    let scoped = scope_with_policy(raw, &options.policy);
    let scoped = match options.print_rules {
        PrintRulePolicy::Preserve => scoped,
        PrintRulePolicy::Strip => strip_print_rules(&scoped, options.policy.max_depth),
    };
    strip_layout_properties(
        &scoped,
        &options.policy.root,
        &options.layout_properties,
        options.policy.max_depth,
    )
}

/// Resolve a style source to its CSS text.
fn fetch_source(source: &StyleSource) -> Result<String, LoadError> {
    match source {
        StyleSource::Local(path) => Ok(fs::read_to_string(path)?),
        StyleSource::Upload { css, .. } => Ok(css.clone()),
        StyleSource::RemoteUrl(url) | StyleSource::Repository { url, .. } => {
            Ok(fetch_text(url)?)
        }
    }
}

//! Theme loading for the Corral markdown previewer.
//!
//! The confinement engine (`corral-confine`) is a pure text-to-text
//! library; this crate is the collaborator that owns everything around it:
//! - **Style sources** - where theme bytes come from (local file,
//!   allow-listed URL, inline upload, repository asset)
//! - **Fetching** - blocking HTTP GET with a size ceiling for pathological
//!   multi-megabyte stylesheets
//! - **Sequencing** - scope, then the print-rule policy, then the layout
//!   strip, then the background extraction, in that order
//! - **Session state** - an explicit context object holding the currently
//!   loaded theme and the load history (no global mutable caches)
//! - **Theme mode** - the light/dark decision derived from the extracted
//!   background color

/// HTTP fetch utilities.
pub mod fetch;
/// Light/dark classification of extracted background colors.
pub mod mode;
/// Theme session state and the load pipeline.
pub mod session;
/// Style source and theme metadata records.
pub mod source;

// Re-exports for convenience
pub use fetch::FetchError;
pub use mode::{ColorValue, ThemeMode};
pub use session::{LoadError, LoadOptions, LoadedTheme, ThemeSession};
pub use source::{StyleSource, ThemeMeta};

//! Style source and theme metadata records.
//!
//! The original loader configured styles through duck-typed records
//! (name/file/source/default); here each kind of origin is a tagged
//! variant so the fetch path is total over the source kind.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where a theme's CSS comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleSource {
    /// A stylesheet shipped with the previewer, read from disk.
    Local(PathBuf),
    /// A stylesheet fetched from an allow-listed URL.
    RemoteUrl(String),
    /// A stylesheet the user pasted or uploaded; the bytes are already
    /// in hand.
    Upload {
        /// Original file name, for display.
        name: String,
        /// The raw CSS text.
        css: String,
    },
    /// A named asset from a theme repository.
    Repository {
        /// Repository-assigned theme name.
        name: String,
        /// Resolved asset URL.
        url: String,
    },
}

/// Display metadata for one theme in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeMeta {
    /// Human-readable theme name.
    pub name: String,
    /// Where the CSS comes from.
    pub source: StyleSource,
    /// Whether the asset needs confinement at all. Local assets authored
    /// against the preview container are already scoped and pass through.
    pub needs_scoping: bool,
}

impl ThemeMeta {
    /// A third-party theme that must be confined before use.
    #[must_use]
    pub fn third_party(name: &str, source: StyleSource) -> Self {
        Self {
            name: name.to_string(),
            source,
            needs_scoping: true,
        }
    }

    /// A pre-scoped local asset that passes through unmodified.
    #[must_use]
    pub fn pre_scoped(name: &str, source: StyleSource) -> Self {
        Self {
            name: name.to_string(),
            source,
            needs_scoping: false,
        }
    }
}

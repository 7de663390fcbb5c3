//! Common utilities for the Corral previewer.
//!
//! This crate provides shared infrastructure used by the confinement
//! engine and the theme loader:
//! - **Warning System** - deduplicated colored terminal output for
//!   degraded-but-recoverable conditions

pub mod warning;

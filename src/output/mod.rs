//! Output writers for charts and chart manifests.
//!
//! This module handles writing data to disk:
//! - PNG charts
//! - JSON manifests describing the plotted series

mod paths;
pub mod manifest;
pub mod png;

// Re-export main types and functions
pub use manifest::{read_manifest, write_manifest, ChartManifest, SeriesEntry};
pub use png::write_png;

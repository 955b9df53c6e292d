//! Discovery of reward trace files.
//!
//! This module handles:
//! - Listing the scan directory (non-recursive)
//! - Deciding which entries are eligible trace files

pub mod scanner;

// Re-export main types and functions
pub use scanner::{eligible_trace_files, scan_directory, TraceFile};

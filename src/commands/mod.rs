//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod plot;

// Re-export main command functions
pub use plot::{
    build_chart, default_scan_dir, execute_plot, validate_args, PlotArgs, PlotReport, ScanStats,
};

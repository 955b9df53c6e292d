//! Chart model and PNG rendering.
//!
//! `Chart` is an explicit handle passed through the run; nothing here
//! keeps global drawing state.

pub mod renderer;
pub mod series;

pub use renderer::render_chart;
pub use series::{Chart, ChartConfig, ChartSeries};

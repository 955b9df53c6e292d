//! Chart handle and series types.
//!
//! The `Chart` is created once per run, collects one `ChartSeries` per
//! plotted trace, and is handed to the renderer at the end.

use crate::parser::RewardSequence;
use crate::utils::config::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_TITLE, DEFAULT_CHART_WIDTH, DEFAULT_MINOR_TICKS,
};

/// Chart configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Minor grid lines between two major grid lines
    pub minor_ticks: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_CHART_TITLE.to_string(),
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            minor_ticks: DEFAULT_MINOR_TICKS,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// One plotted line: a reward sequence and its legend label
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    label: String,
    sequence: RewardSequence,
}

impl ChartSeries {
    pub fn new(label: impl Into<String>, sequence: RewardSequence) -> Self {
        Self {
            label: label.into(),
            sequence,
        }
    }

    /// Legend label, also used as the series identifier
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn sequence(&self) -> &RewardSequence {
        &self.sequence
    }
}

/// Aggregate chart: configuration plus series in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chart {
    config: ChartConfig,
    series: Vec<ChartSeries>,
}

impl Chart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            series: Vec::new(),
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn series(&self) -> &[ChartSeries] {
        &self.series
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Append a line to the chart
    pub fn add_series(&mut self, label: impl Into<String>, sequence: RewardSequence) {
        self.series.push(ChartSeries::new(label, sequence));
    }

    pub fn labels(&self) -> Vec<&str> {
        self.series.iter().map(ChartSeries::label).collect()
    }

    /// Longest series length, masked positions included
    pub fn max_len(&self) -> usize {
        self.series
            .iter()
            .map(|s| s.sequence().len())
            .max()
            .unwrap_or(0)
    }

    /// Smallest and largest present value across every series
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .filter_map(|s| s.sequence().bounds())
            .reduce(|(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)))
    }
}

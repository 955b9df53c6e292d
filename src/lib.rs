//! LCT Reward Plot
//!
//! Aggregates reinforcement-learning reward logs into one labeled
//! line chart.
//!
//! This crate provides the core implementation for the
//! `lct-reward-plot` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! lct-reward-plot path/to/runs            # writes ./LCT_reward.png
//! lct-reward-plot path/to/runs --summary --manifest runs.json
//! ```
//!
//! Every non-empty `*.log` file in the directory is read as comma-separated
//! numbers. Tokens that are not numbers are masked, and traces whose sum is
//! exactly zero are left off the chart.

pub mod chart;
pub mod commands;
pub mod discovery;
pub mod output;
pub mod parser;
pub mod utils;

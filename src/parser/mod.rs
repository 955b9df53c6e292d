//! Reward trace parsing.
//!
//! This module handles:
//! - Reading trace files
//! - Splitting comma-delimited numeric text
//! - Masking tokens that are not numbers

pub mod reward;

// Re-export main types
pub use reward::{parse_reward_file, parse_reward_text, RewardSequence};

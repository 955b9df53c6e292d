//! Reward trace parser.
//!
//! Turns comma-delimited numeric text into a `RewardSequence`. Tokens that
//! do not parse are kept as masked positions instead of failing the read.

use crate::utils::config::{COMMENT_MARKER, FIELD_DELIMITER};
use crate::utils::error::ParseError;
use log::debug;
use std::path::Path;

/// Ordered reward values parsed from one trace file.
///
/// `None` marks a masked position: the token was missing or not a number.
/// `nan` and `inf` are numbers and stay present; they count toward the sum
/// but are never drawn. Order is row-major over the file's data lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardSequence {
    values: Vec<Option<f64>>,
}

impl RewardSequence {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of positions, masked ones included
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn masked_count(&self) -> usize {
        self.len() - self.present_count()
    }

    /// Sum of present values; masked positions are excluded, not zeroed.
    /// A fully masked sequence sums to 0.0.
    pub fn sum(&self) -> f64 {
        self.values.iter().flatten().sum()
    }

    /// Exact-zero sums mark "no signal" placeholder traces
    pub fn is_placeholder(&self) -> bool {
        self.sum() == 0.0
    }

    /// Smallest and largest finite value, if any
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.finite_values().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    fn finite_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().copied().filter(|v| v.is_finite())
    }

    /// Contiguous runs of finite values as `(index, value)` points.
    /// A masked or non-finite position ends the current run.
    pub fn segments(&self) -> Vec<Vec<(usize, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();

        for (index, value) in self.values.iter().enumerate() {
            match value {
                Some(v) if v.is_finite() => current.push((index, *v)),
                _ if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                _ => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }
}

/// Read and parse a reward trace file
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::Io` - the file could not be read
pub fn parse_reward_file(path: impl AsRef<Path>) -> Result<RewardSequence, ParseError> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let sequence = parse_reward_text(&String::from_utf8_lossy(&bytes));
    debug!(
        "Parsed {}: {} values ({} masked)",
        path.display(),
        sequence.len(),
        sequence.masked_count()
    );

    Ok(sequence)
}

/// Parse comma-delimited reward text
///
/// **Public** - infallible; bad tokens become masked positions
///
/// Blank lines and `#` comments are skipped. Lines shorter than the
/// widest line are padded with masked positions.
pub fn parse_reward_text(text: &str) -> RewardSequence {
    let rows: Vec<Vec<Option<f64>>> = text
        .lines()
        .filter_map(strip_comment)
        .map(|line| line.split(FIELD_DELIMITER).map(parse_token).collect())
        .collect();

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);

    let mut values = Vec::with_capacity(rows.len() * columns);
    for mut row in rows {
        row.resize(columns, None);
        values.extend(row);
    }

    RewardSequence::new(values)
}

/// Drop comment text; `None` for lines with no data left
///
/// **Private** - internal helper for parse_reward_text
fn strip_comment(line: &str) -> Option<&str> {
    let data = match line.split_once(COMMENT_MARKER) {
        Some((data, _)) => data,
        None => line,
    };
    let data = data.trim();
    (!data.is_empty()).then_some(data)
}

/// Parse a single token; `None` when it is not a number
///
/// **Private** - internal helper for parse_reward_text
fn parse_token(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token() {
        assert_eq!(parse_token(" 1.5 "), Some(1.5));
        assert_eq!(parse_token("-2e3"), Some(-2000.0));
        assert_eq!(parse_token(""), None);
        assert_eq!(parse_token("x"), None);
        assert!(parse_token("nan").is_some_and(f64::is_nan));
        assert_eq!(parse_token("inf"), Some(f64::INFINITY));
        assert_eq!(parse_token("-infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_nan_is_present_and_not_placeholder() {
        let seq = parse_reward_text("nan,1,-1");
        assert_eq!(seq.masked_count(), 0);
        assert!(seq.sum().is_nan());
        assert!(!seq.is_placeholder());
    }

    #[test]
    fn test_non_finite_values_break_segments_and_skip_bounds() {
        let seq = parse_reward_text("1,2,inf,4,nan");
        assert_eq!(seq.segments(), vec![vec![(0, 1.0), (1, 2.0)], vec![(3, 4.0)]]);
        assert_eq!(seq.bounds(), Some((1.0, 4.0)));
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("1,2 # tail"), Some("1,2"));
        assert_eq!(strip_comment("# header"), None);
        assert_eq!(strip_comment("   "), None);
    }

    #[test]
    fn test_segments_split_on_mask() {
        let seq = RewardSequence::new(vec![Some(1.0), Some(2.0), None, Some(4.0), None]);
        assert_eq!(
            seq.segments(),
            vec![vec![(0, 1.0), (1, 2.0)], vec![(3, 4.0)]]
        );
    }

    #[test]
    fn test_all_masked_sum_is_zero() {
        let seq = parse_reward_text("a,b\nc");
        assert_eq!(seq.present_count(), 0);
        assert_eq!(seq.sum(), 0.0);
        assert!(seq.is_placeholder());
        assert!(seq.bounds().is_none());
    }

    #[test]
    fn test_bounds() {
        let seq = parse_reward_text("3,-1,x,7");
        assert_eq!(seq.bounds(), Some((-1.0, 7.0)));
    }
}

//! JSON manifest of a chart's logical content.
//!
//! The PNG bytes depend on the rendering backend; the manifest records
//! what was plotted (labels, order, point counts, sums) so two runs can
//! be compared directly.

use super::paths::{ensure_parent_dir, file_size, validate_output_path};
use crate::chart::Chart;
use crate::utils::config::MANIFEST_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Top-level manifest structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartManifest {
    /// Schema version for compatibility checking
    pub version: String,

    /// Chart title
    pub title: String,

    /// Timestamp when the manifest was generated
    pub generated_at: String,

    /// Plotted series, in chart order
    pub series: Vec<SeriesEntry>,
}

/// One plotted series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    /// Legend label (source file name)
    pub label: String,

    /// Total positions, masked ones included
    pub points: usize,

    /// Masked positions
    pub masked: usize,

    /// Sum over present values; `None` when it is `nan` or infinite
    pub sum: Option<f64>,
}

impl ChartManifest {
    /// Describe the series currently held by `chart`
    pub fn from_chart(chart: &Chart) -> Self {
        use chrono::Utc;

        let series = chart
            .series()
            .iter()
            .map(|s| SeriesEntry {
                label: s.label().to_string(),
                points: s.sequence().len(),
                masked: s.sequence().masked_count(),
                sum: Some(s.sequence().sum()).filter(|sum| sum.is_finite()),
            })
            .collect();

        Self {
            version: MANIFEST_VERSION.to_string(),
            title: chart.config().title.clone(),
            generated_at: Utc::now().to_rfc3339(),
            series,
        }
    }

    /// Same title and series, ignoring when each was generated
    pub fn same_content(&self, other: &ChartManifest) -> bool {
        self.title == other.title && self.series == other.series
    }
}

/// Write a manifest to a JSON file
///
/// **Public** - main entry point for manifest output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_manifest(
    manifest: &ChartManifest,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing manifest to: {}", output_path.display());

    validate_output_path(output_path, "json")?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, manifest)
        .map_err(OutputError::SerializationFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "Manifest written successfully ({} bytes)",
        file_size(output_path)
    );

    Ok(())
}

/// Read a manifest from a JSON file
///
/// **Public** - useful for comparing runs and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_manifest(input_path: impl AsRef<Path>) -> Result<ChartManifest, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading manifest from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let manifest: ChartManifest =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Manifest loaded: version {}, {} series",
        manifest.version,
        manifest.series.len()
    );

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartConfig;
    use crate::parser::parse_reward_text;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn create_test_chart() -> Chart {
        let mut chart = Chart::new(ChartConfig::default());
        chart.add_series("b.log", parse_reward_text("1,-1,2"));
        chart.add_series("c.log", parse_reward_text("1,x,3"));
        chart
    }

    #[test]
    fn test_from_chart() {
        let manifest = ChartManifest::from_chart(&create_test_chart());

        assert_eq!(manifest.version, MANIFEST_VERSION);
        assert_eq!(manifest.title, "LCT reward");
        assert_eq!(
            manifest.series,
            vec![
                SeriesEntry {
                    label: "b.log".to_string(),
                    points: 3,
                    masked: 0,
                    sum: Some(2.0),
                },
                SeriesEntry {
                    label: "c.log".to_string(),
                    points: 3,
                    masked: 1,
                    sum: Some(4.0),
                },
            ]
        );
    }

    #[test]
    fn test_write_and_read_manifest() {
        let manifest = ChartManifest::from_chart(&create_test_chart());
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_manifest(&manifest, path).unwrap();
        let loaded = read_manifest(path).unwrap();

        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_non_finite_sum_round_trips() {
        let mut chart = Chart::new(ChartConfig::default());
        chart.add_series("n.log", parse_reward_text("nan,1,-1"));
        let manifest = ChartManifest::from_chart(&chart);
        assert_eq!(manifest.series[0].sum, None);

        let temp_file = NamedTempFile::new().unwrap();
        write_manifest(&manifest, temp_file.path()).unwrap();
        let loaded = read_manifest(temp_file.path()).unwrap();

        assert!(loaded.same_content(&manifest));
    }

    #[test]
    fn test_same_content_ignores_timestamp() {
        let mut first = ChartManifest::from_chart(&create_test_chart());
        let second = ChartManifest::from_chart(&create_test_chart());
        first.generated_at = "2024-01-01T00:00:00Z".to_string();

        assert!(first.same_content(&second));
    }

    #[test]
    fn test_write_manifest_rejects_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manifest = ChartManifest::from_chart(&Chart::default());
        assert!(write_manifest(&manifest, temp_dir.path()).is_err());
    }
}

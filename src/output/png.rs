//! PNG chart output writer.

use super::paths::{ensure_parent_dir, file_size, validate_output_path};
use crate::chart::{render_chart, Chart};
use crate::utils::error::OutputError;
use log::info;
use std::path::Path;

/// Render a chart and write it as a PNG file
///
/// **Public** - main entry point for image output
///
/// An existing file at `output_path` is overwritten.
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::Chart` - Rendering or encoding failed
///
/// # Example
/// ```ignore
/// let (chart, _) = build_chart(&scan_dir, ChartConfig::default())?;
/// write_png(&chart, "LCT_reward.png")?;
/// ```
pub fn write_png(chart: &Chart, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing chart to: {}", output_path.display());

    validate_output_path(output_path, "png")?;
    ensure_parent_dir(output_path)?;

    render_chart(chart, output_path)?;

    let size = file_size(output_path);
    info!(
        "Chart written successfully ({} bytes, {:.2} KB)",
        size,
        size as f64 / 1024.0
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartConfig;
    use crate::parser::parse_reward_text;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn small_config() -> ChartConfig {
        ChartConfig::new().with_size(320, 240)
    }

    #[test]
    fn test_write_png_with_series() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("chart.png");

        let mut chart = Chart::new(small_config());
        chart.add_series("b.log", parse_reward_text("1,-1,2"));
        chart.add_series("c.log", parse_reward_text("1,x,3"));

        write_png(&chart, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(PNG_MAGIC));
    }

    #[test]
    fn test_write_png_overflowing_span_finishes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("wide.png");

        let mut chart = Chart::new(small_config());
        chart.add_series("r.log", parse_reward_text("-1e308,1e308,1"));
        chart.add_series("n.log", parse_reward_text("nan,inf,2"));

        let (tx, rx) = std::sync::mpsc::channel();
        let worker_path = path.clone();
        std::thread::spawn(move || {
            let _ = tx.send(write_png(&chart, &worker_path).map_err(|e| e.to_string()));
        });

        let result = rx
            .recv_timeout(std::time::Duration::from_secs(60))
            .expect("rendering did not finish");
        result.unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(PNG_MAGIC));
    }

    #[test]
    fn test_write_png_only_non_finite_values() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nan.png");

        let mut chart = Chart::new(small_config());
        chart.add_series("n.log", parse_reward_text("nan,nan"));

        write_png(&chart, &path).unwrap();

        assert!(std::fs::read(&path).unwrap().starts_with(PNG_MAGIC));
    }

    #[test]
    fn test_write_png_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/chart.png");

        write_png(&Chart::new(small_config()), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_write_png_rejects_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = write_png(&Chart::new(small_config()), temp_dir.path());
        assert!(matches!(result, Err(OutputError::InvalidPath(_))));
    }

    #[test]
    fn test_write_png_rejects_zero_size() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("chart.png");

        let chart = Chart::new(ChartConfig::new().with_size(0, 100));
        let result = write_png(&chart, &path);

        assert!(matches!(result, Err(OutputError::Chart(_))));
        assert!(!path.exists());
    }
}

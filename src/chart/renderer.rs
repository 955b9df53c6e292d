//! PNG chart rendering with plotters.
//!
//! Draws every series of a `Chart` as a line, with a major grid, a dotted
//! minor grid, and a legend. Masked and non-finite positions leave gaps in
//! the line.

use super::series::Chart;
use crate::utils::config::{MAJOR_GRID_LINES, MAX_CHART_DIMENSION};
use crate::utils::error::ChartError;
use log::{debug, info};
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::fmt::Display;
use std::ops::Range;
use std::path::Path;

/// Axis ends stay within this magnitude so the span itself is finite
const AXIS_LIMIT: f64 = f64::MAX / 4.0;

/// Guard against pathological key points
const MAX_MINOR_LINES: f64 = 1_000.0;

/// Pixels per dot period along a minor grid line
const DOT_PERIOD_PX: u32 = 6;

/// Render `chart` into a PNG at `path`
///
/// **Public** - main entry point for rendering
///
/// The drawing backend lives only inside this call: it is flushed with
/// `present` and dropped before returning, also for an empty chart.
///
/// # Errors
/// * `ChartError::InvalidSize` - zero or oversized dimensions
/// * `ChartError::Render` - the backend failed to draw or encode
pub fn render_chart(chart: &Chart, path: &Path) -> Result<(), ChartError> {
    let config = chart.config();
    validate_size(config.width, config.height)?;

    info!(
        "Rendering {} series into {}x{} chart",
        chart.series().len(),
        config.width,
        config.height
    );

    let x_range = x_range(chart.max_len());
    let y_range = y_range(chart.value_bounds());
    debug!("Axis ranges: x={:?} y={:?}", x_range, y_range);

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut plot = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .map_err(render_err)?;

    // plotters draws light mesh lines solid; the dotted minor grid is drawn below
    plot.configure_mesh()
        .x_labels(MAJOR_GRID_LINES)
        .y_labels(MAJOR_GRID_LINES)
        .bold_line_style(&BLACK.mix(0.3))
        .light_line_style(&WHITE)
        .draw()
        .map_err(render_err)?;

    let minor_style = BLACK.mix(0.15).stroke_width(1);
    let x_dots = (config.height / DOT_PERIOD_PX).max(1) as usize;
    let y_dots = (config.width / DOT_PERIOD_PX).max(1) as usize;

    for x in minor_grid_points(&x_range, config.minor_ticks) {
        let dots = dotted_line((x, y_range.start), (x, y_range.end), x_dots);
        plot.draw_series(dots.into_iter().map(|d| PathElement::new(d.to_vec(), minor_style)))
            .map_err(render_err)?;
    }
    for y in minor_grid_points(&y_range, config.minor_ticks) {
        let dots = dotted_line((x_range.start, y), (x_range.end, y), y_dots);
        plot.draw_series(dots.into_iter().map(|d| PathElement::new(d.to_vec(), minor_style)))
            .map_err(render_err)?;
    }

    for (index, series) in chart.series().iter().enumerate() {
        let style = Palette99::pick(index).to_rgba().stroke_width(2);

        let mut segments = series.sequence().segments();
        if segments.is_empty() {
            // nothing drawable (all nan/inf), keep the legend entry
            segments.push(Vec::new());
        }

        for (n, segment) in segments.into_iter().enumerate() {
            let points = segment.into_iter().map(|(i, v)| (i as f64, v));
            let annotation = plot
                .draw_series(LineSeries::new(points, style))
                .map_err(render_err)?;

            // one legend entry per series, not per segment
            if n == 0 {
                annotation
                    .label(series.label())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
            }
        }
    }

    if !chart.is_empty() {
        plot.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

/// Reject dimensions the bitmap backend cannot handle
///
/// **Private** - internal validation
fn validate_size(width: u32, height: u32) -> Result<(), ChartError> {
    if width == 0 || height == 0 || width > MAX_CHART_DIMENSION || height > MAX_CHART_DIMENSION {
        return Err(ChartError::InvalidSize(width, height));
    }
    Ok(())
}

/// X axis covers sample indices `0..len`
///
/// **Private** - internal helper for render_chart
fn x_range(max_len: usize) -> Range<f64> {
    let upper = max_len.saturating_sub(1).max(1);
    0.0..upper as f64
}

/// Y axis covers all finite values with 5% padding
///
/// **Private** - ends are clamped to `AXIS_LIMIT` and flat ranges are
/// widened relative to their magnitude, so the axis is never degenerate
/// and its span never overflows
fn y_range(bounds: Option<(f64, f64)>) -> Range<f64> {
    let Some((lo, hi)) = bounds else {
        return 0.0..1.0;
    };
    let lo = lo.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let hi = hi.clamp(-AXIS_LIMIT, AXIS_LIMIT);

    let pad = if lo == hi {
        (lo.abs() * 0.05).max(1.0)
    } else {
        // scale before subtracting so the span cannot overflow; the floor
        // keeps ticks above float resolution for large, nearly flat values
        let magnitude = lo.abs().max(hi.abs());
        (hi * 0.05 - lo * 0.05).max(magnitude * 1e-6)
    };

    (lo - pad).max(-AXIS_LIMIT)..(hi + pad).min(AXIS_LIMIT)
}

/// Minor grid positions: each interval between the major key points
/// split into `minor_ticks + 1` parts, extended to both axis ends
///
/// **Private** - major points come from plotters so both grids line up
fn minor_grid_points(range: &Range<f64>, minor_ticks: usize) -> Vec<f64> {
    if minor_ticks == 0 {
        return Vec::new();
    }
    let coord: RangedCoordf64 = range.clone().into();
    let majors = coord.key_points(MAJOR_GRID_LINES);
    subdivide(&majors, minor_ticks, range)
}

/// **Private** - pure helper for minor_grid_points
fn subdivide(majors: &[f64], minor_ticks: usize, range: &Range<f64>) -> Vec<f64> {
    let (Some(&first), Some(&second)) = (majors.first(), majors.get(1)) else {
        return Vec::new();
    };
    let step = (second - first) / (minor_ticks + 1) as f64;
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }

    let is_major = |v: f64| majors.iter().any(|m| (m - v).abs() < step * 1e-6);

    // extend back from the first major point to the start of the axis
    let back = ((first - range.start) / step).floor().max(0.0);
    let start = first - back * step;
    let count = ((range.end - start) / step).floor();
    if !count.is_finite() || count < 0.0 || count > MAX_MINOR_LINES {
        return Vec::new();
    }

    (0..=count as usize)
        .map(|i| start + step * i as f64)
        .filter(|v| !is_major(*v))
        .collect()
}

/// Split the line `from -> to` into `dots` periods and keep the first half
/// of each as a short dash
///
/// **Private** - plotters mesh lines have no dash style
fn dotted_line(from: (f64, f64), to: (f64, f64), dots: usize) -> Vec<[(f64, f64); 2]> {
    let lerp = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
    let period = 1.0 / dots as f64;

    (0..dots)
        .map(|k| {
            let t = k as f64 * period;
            [lerp(t), lerp(t + period * 0.5)]
        })
        .collect()
}

fn render_err<E: Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_range() {
        assert_eq!(x_range(0), 0.0..1.0);
        assert_eq!(x_range(1), 0.0..1.0);
        assert_eq!(x_range(10), 0.0..9.0);
    }

    #[test]
    fn test_y_range_empty_and_flat() {
        assert_eq!(y_range(None), 0.0..1.0);
        assert_eq!(y_range(Some((2.0, 2.0))), 1.0..3.0);
    }

    #[test]
    fn test_y_range_padding() {
        let range = y_range(Some((0.0, 10.0)));
        assert_eq!(range, -0.5..10.5);
    }

    #[test]
    fn test_y_range_huge_span_stays_finite() {
        let range = y_range(Some((-1e308, 1e308)));
        assert!(range.start.is_finite() && range.end.is_finite());
        assert!(range.start < range.end);
        assert!((range.end - range.start).is_finite());
    }

    #[test]
    fn test_y_range_flat_large_value() {
        let range = y_range(Some((1e20, 1e20)));
        assert!(range.start < 1e20 && 1e20 < range.end);

        let range = y_range(Some((f64::MAX, f64::MAX)));
        assert!(range.start < range.end);
        assert!((range.end - range.start).is_finite());
    }

    #[test]
    fn test_subdivide() {
        let points = subdivide(&[0.0, 1.0, 2.0], 4, &(-0.5..2.1));
        let expected = [-0.4, -0.2, 0.2, 0.4, 0.6, 0.8, 1.2, 1.4, 1.6, 1.8];
        assert_eq!(points.len(), expected.len());
        for (p, e) in points.iter().zip(expected) {
            assert!((p - e).abs() < 1e-9, "{} != {}", p, e);
        }
    }

    #[test]
    fn test_y_range_nearly_flat_large_values() {
        let range = y_range(Some((1e20, 1e20 + 16384.0)));
        assert!(range.end - range.start >= 2e14);
    }

    #[test]
    fn test_subdivide_needs_two_majors() {
        assert!(subdivide(&[1.0], 4, &(0.0..2.0)).is_empty());
    }

    #[test]
    fn test_minor_grid_points_within_range() {
        let range = 0.0..9.0;
        let points = minor_grid_points(&range, 4);
        assert!(!points.is_empty());
        assert!(points.iter().all(|p| range.contains(p) || *p == range.end));
        assert!(minor_grid_points(&range, 0).is_empty());
    }

    #[test]
    fn test_minor_grid_points_huge_range() {
        let range = y_range(Some((-1e308, 1e308)));
        let points = minor_grid_points(&range, 4);
        assert!(points.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_dotted_line() {
        let dots = dotted_line((0.0, 0.0), (0.0, 10.0), 5);
        assert_eq!(dots.len(), 5);
        assert_eq!(dots[0], [(0.0, 0.0), (0.0, 1.0)]);
        assert_eq!(dots[4], [(0.0, 8.0), (0.0, 9.0)]);
    }

    #[test]
    fn test_validate_size() {
        assert!(validate_size(1400, 1000).is_ok());
        assert!(matches!(validate_size(0, 10), Err(ChartError::InvalidSize(0, 10))));
        assert!(validate_size(10, MAX_CHART_DIMENSION + 1).is_err());
    }
}

//! Plot command implementation.
//!
//! The plot command:
//! 1. Lists the scan directory
//! 2. Parses every eligible `.log` trace
//! 3. Adds each non-placeholder trace to the chart
//! 4. Renders the chart to PNG
//! 5. Writes the optional JSON manifest

use crate::chart::{Chart, ChartConfig};
use crate::discovery::{scan_directory, TraceFile};
use crate::output::{write_manifest, write_png, ChartManifest};
use crate::parser::parse_reward_file;
use crate::utils::config::{DEFAULT_OUTPUT_FILENAME, MAX_CHART_DIMENSION};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the plot command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct PlotArgs {
    /// Directory holding the `.log` traces
    pub scan_dir: PathBuf,

    /// Output path for the PNG chart
    pub output: PathBuf,

    /// Output path for the JSON manifest (optional)
    pub manifest: Option<PathBuf>,

    /// Chart configuration
    pub chart_config: ChartConfig,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for PlotArgs {
    fn default() -> Self {
        Self {
            scan_dir: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT_FILENAME),
            manifest: None,
            chart_config: ChartConfig::default(),
            print_summary: false,
        }
    }
}

/// Counters describing one pass over the scan directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Entries listed in the directory
    pub entries: usize,

    /// Entries that were non-empty `.log` regular files
    pub eligible: usize,

    /// Series added to the chart
    pub plotted: usize,

    /// Eligible traces skipped because their sum is exactly zero
    pub placeholders: usize,
}

/// Outcome of a successful plot run
#[derive(Debug, Clone)]
pub struct PlotReport {
    pub scan_dir: PathBuf,
    pub output: PathBuf,
    pub stats: ScanStats,
    /// Plotted labels, in chart order
    pub labels: Vec<String>,
}

/// Execute the plot command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Scan directory missing or unreadable
/// * Trace file unreadable
/// * Chart or manifest cannot be written
///
/// The first failure aborts the run; no retry.
pub fn execute_plot(args: PlotArgs) -> Result<PlotReport> {
    let start_time = Instant::now();

    info!("Scan directory: {}", args.scan_dir.display());

    // Step 1: List directory
    info!("Step 1/4: Listing trace directory...");
    let files = scan_directory(&args.scan_dir).context("Failed to scan trace directory")?;

    // Step 2: Parse traces into the chart
    info!("Step 2/4: Parsing traces...");
    let mut chart = Chart::new(args.chart_config.clone());
    let stats = collect_series(&mut chart, &files)?;

    info!(
        "{} entries, {} eligible traces, {} plotted, {} placeholders skipped",
        stats.entries, stats.eligible, stats.plotted, stats.placeholders
    );

    // Step 3: Render chart
    info!("Step 3/4: Rendering chart...");
    write_png(&chart, &args.output).context("Failed to write chart PNG")?;
    info!("✓ Chart written to: {}", args.output.display());

    // Step 4: Write manifest (if requested)
    if let Some(manifest_path) = &args.manifest {
        info!("Step 4/4: Writing manifest...");
        let manifest = ChartManifest::from_chart(&chart);
        write_manifest(&manifest, manifest_path).context("Failed to write chart manifest")?;
        info!("✓ Manifest written to: {}", manifest_path.display());
    } else {
        info!("Step 4/4: Skipping manifest (not requested)");
    }

    if args.print_summary {
        print_summary(&chart, &stats, &args.scan_dir);
    }

    let elapsed = start_time.elapsed();
    info!("Plot completed in {:.2}s", elapsed.as_secs_f64());

    Ok(PlotReport {
        scan_dir: args.scan_dir,
        output: args.output,
        stats,
        labels: chart.labels().into_iter().map(String::from).collect(),
    })
}

/// Scan `dir` and build the chart without rendering it
///
/// **Public** - exposes the logical chart for inspection and tests
pub fn build_chart(dir: impl AsRef<Path>, config: ChartConfig) -> Result<(Chart, ScanStats)> {
    let files = scan_directory(dir.as_ref()).context("Failed to scan trace directory")?;

    let mut chart = Chart::new(config);
    let stats = collect_series(&mut chart, &files)?;

    Ok((chart, stats))
}

/// Parse eligible files and add non-placeholder traces to `chart`
///
/// **Private** - series are added in listing order
fn collect_series(chart: &mut Chart, files: &[TraceFile]) -> Result<ScanStats> {
    let mut stats = ScanStats {
        entries: files.len(),
        ..Default::default()
    };

    for file in files {
        if !file.is_eligible() {
            debug!(
                "Skipping {} (file: {}, size: {}, suffix: {:?})",
                file.file_name, file.is_file, file.size, file.suffix
            );
            continue;
        }
        stats.eligible += 1;

        let sequence = parse_reward_file(&file.path)
            .with_context(|| format!("Failed to parse trace {}", file.path.display()))?;

        if sequence.masked_count() > 0 {
            warn!(
                "{}: {} of {} values masked",
                file.file_name,
                sequence.masked_count(),
                sequence.len()
            );
        }

        // exact comparison: only a true zero sum marks a placeholder
        if sequence.is_placeholder() {
            info!("Skipping {} (sum is zero)", file.file_name);
            stats.placeholders += 1;
            continue;
        }

        info!(
            "Plotting {} ({} values, sum {})",
            file.file_name,
            sequence.len(),
            sequence.sum()
        );
        chart.add_series(file.file_name.clone(), sequence);
        stats.plotted += 1;
    }

    Ok(stats)
}

/// Directory containing the running executable
///
/// **Public** - default scan directory for the CLI
pub fn default_scan_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate running executable")?;
    let dir = exe
        .parent()
        .context("Executable path has no parent directory")?;
    dir.canonicalize()
        .with_context(|| format!("Failed to resolve directory {}", dir.display()))
}

/// Validate plot arguments
///
/// **Public** - can be called before execute_plot for early validation
pub fn validate_args(args: &PlotArgs) -> Result<()> {
    if args.scan_dir.as_os_str().is_empty() {
        anyhow::bail!("Scan directory cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.chart_config.title.trim().is_empty() {
        anyhow::bail!("Chart title cannot be empty");
    }

    let (width, height) = (args.chart_config.width, args.chart_config.height);
    if width == 0 || height == 0 {
        anyhow::bail!("Chart width and height must be greater than 0");
    }

    if width > MAX_CHART_DIMENSION || height > MAX_CHART_DIMENSION {
        anyhow::bail!("Chart size is too large (max {} pixels per side)", MAX_CHART_DIMENSION);
    }

    if args.manifest.as_deref() == Some(args.output.as_path()) {
        anyhow::bail!("Manifest and chart cannot share an output path");
    }

    Ok(())
}

/// Print a text summary of the plotted series
///
/// **Private** - internal helper for execute_plot
fn print_summary(chart: &Chart, stats: &ScanStats, scan_dir: &Path) {
    println!("\n{}", "=".repeat(80));
    println!("REWARD PLOT SUMMARY");
    println!("{}", "=".repeat(80));
    println!("Directory:    {}", scan_dir.display());
    println!("Entries:      {}", stats.entries);
    println!("Eligible:     {}", stats.eligible);
    println!("Plotted:      {}", stats.plotted);
    println!("Placeholders: {}", stats.placeholders);
    println!();
    println!("{:<40} {:>8} {:>8} {:>16}", "Series", "Points", "Masked", "Sum");
    for series in chart.series() {
        let seq = series.sequence();
        println!(
            "{:<40} {:>8} {:>8} {:>16.4}",
            series.label(),
            seq.len(),
            seq.masked_count(),
            seq.sum()
        );
    }
    println!("{}", "=".repeat(80));
}

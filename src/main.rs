//! LCT Reward Plot CLI
//!
//! Plots every reward trace in a directory onto one PNG chart.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use lct_reward_plot::chart::ChartConfig;
use lct_reward_plot::commands::{default_scan_dir, execute_plot, validate_args, PlotArgs};
use lct_reward_plot::utils::config::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_TITLE, DEFAULT_CHART_WIDTH, DEFAULT_OUTPUT_FILENAME,
};

/// LCT Reward Plot - chart reward traces from training runs
#[derive(Parser, Debug)]
#[command(name = "lct-reward-plot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the .log traces (defaults to the executable's directory)
    dir: Option<PathBuf>,

    /// Output path for the PNG chart
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILENAME)]
    output: PathBuf,

    /// Output path for a JSON manifest of the plotted series (optional)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Chart title
    #[arg(long, default_value = DEFAULT_CHART_TITLE)]
    title: String,

    /// Chart width in pixels
    #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
    width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = DEFAULT_CHART_HEIGHT)]
    height: u32,

    /// Print text summary to stdout
    #[arg(long)]
    summary: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let scan_dir = match cli.dir {
        Some(dir) => dir
            .canonicalize()
            .with_context(|| format!("Failed to resolve directory {}", dir.display()))?,
        None => default_scan_dir()?,
    };

    let args = PlotArgs {
        scan_dir,
        output: cli.output,
        manifest: cli.manifest,
        chart_config: ChartConfig::new()
            .with_title(cli.title)
            .with_size(cli.width, cli.height),
        print_summary: cli.summary,
    };

    // Validate args first
    validate_args(&args)?;

    execute_plot(args)?;

    Ok(())
}

//! raster - command-line front end for the raster editing engine
//!
//! Every edit reads a PNG, runs one engine operation and writes a new PNG.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "raster")]
#[command(author, version, about = "Raster image editing CLI")]
#[command(long_about = "
Resize, tone-correct, filter and inspect PNG images.

Examples:
  raster info photo.png                         # Dimensions and histogram summary
  raster resize photo.png -w 640 -H 480 -o small.png
  raster resize photo.png --fit 800x600 -o fit.png
  raster curves photo.png --enter 50,0 --exit 200,255 -o contrast.png
  raster filter photo.png -t gaussian -s 5 --sigma 1.5 -o soft.png
  raster histogram photo.png --bars 64
  raster sample photo.png -x 640 -y 360 --container 1280x720
  raster batch 'shots/*.png' -o out --fit 256x256
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image dimensions and histogram summary
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Nearest-neighbor resize
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),

    /// Two-point tone curve
    Curves(CurvesArgs),

    /// Convolution filter
    Filter(FilterArgs),

    /// Per-channel histogram
    #[command(visible_alias = "hist")]
    Histogram(HistogramArgs),

    /// Sample a pixel through a fitted viewport
    Sample(SampleArgs),

    /// Apply fit/curve/filter to every file matching a pattern
    Batch(BatchArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct ResizeArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Target width
    #[arg(short, long)]
    width: Option<u32>,

    /// Target height
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Fit inside WxH keeping aspect ratio
    #[arg(long, value_parser = commands::parse_size)]
    fit: Option<(u32, u32)>,
}

#[derive(Args)]
struct CurvesArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Low control point as IN,OUT
    #[arg(long, default_value = "0,0", value_parser = commands::parse_point)]
    enter: (u8, u8),

    /// High control point as IN,OUT
    #[arg(long, default_value = "255,255", value_parser = commands::parse_point)]
    exit: (u8, u8),
}

#[derive(Args)]
struct FilterArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Filter: box, gaussian, sharpen, edge
    #[arg(short = 't', long = "type", default_value = "gaussian")]
    kind: String,

    /// Kernel size for box/gaussian (rounded up to odd)
    #[arg(short, long, default_value = "3")]
    size: usize,

    /// Gaussian sigma
    #[arg(long, default_value = "1.0")]
    sigma: f32,

    /// Sharpen strength
    #[arg(short, long, default_value = "1.0")]
    amount: f32,
}

#[derive(Args)]
struct HistogramArgs {
    /// Input image
    input: PathBuf,

    /// Print bar heights for a chart of this height instead of counts
    #[arg(long)]
    bars: Option<u32>,

    /// Print only non-empty bins
    #[arg(long)]
    nonzero: bool,
}

#[derive(Args)]
struct SampleArgs {
    /// Input image
    input: PathBuf,

    /// Screen x inside the container
    #[arg(short)]
    x: f64,

    /// Screen y inside the container
    #[arg(short)]
    y: f64,

    /// Viewport container size
    #[arg(long, default_value = "1280x720", value_parser = commands::parse_size)]
    container: (u32, u32),

    /// Display scale in percent (default: fit)
    #[arg(long)]
    scale: Option<u32>,

    /// Directory holding session.ron (default: platform config dir)
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

#[derive(Args)]
struct BatchArgs {
    /// Input glob pattern (e.g., "shots/*.png")
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Fit inside WxH keeping aspect ratio
    #[arg(long, value_parser = commands::parse_size)]
    fit: Option<(u32, u32)>,

    /// Low control point as IN,OUT
    #[arg(long, value_parser = commands::parse_point)]
    enter: Option<(u8, u8)>,

    /// High control point as IN,OUT
    #[arg(long, value_parser = commands::parse_point)]
    exit: Option<(u8, u8)>,

    /// Filter: box, gaussian, sharpen, edge
    #[arg(short = 't', long = "type")]
    kind: Option<String>,

    /// Kernel size for box/gaussian
    #[arg(short, long, default_value = "3")]
    size: usize,

    /// Gaussian sigma
    #[arg(long, default_value = "1.0")]
    sigma: f32,

    /// Sharpen strength
    #[arg(short, long, default_value = "1.0")]
    amount: f32,
}

/// Installs the tracing subscriber. The returned guard flushes the log file
/// on drop and must live until exit.
fn init_logging(
    verbose: u8,
    log_file: Option<&PathBuf>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log_file.as_ref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Resize(args) => commands::resize::run(args, cli.verbose),
        Commands::Curves(args) => commands::curves::run(args, cli.verbose),
        Commands::Filter(args) => commands::filter::run(args, cli.verbose),
        Commands::Histogram(args) => commands::histogram::run(args),
        Commands::Sample(args) => commands::sample::run(args),
        Commands::Batch(args) => commands::batch::run(args, cli.verbose),
    }
}

mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terraprep", about = "Satellite imagery preprocessing for change detection")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show raster dimensions, sample statistics, and georeferencing
    Info(commands::info::InfoArgs),
    /// Find the pixel shift between two rasters and register the target
    Align(commands::align::AlignArgs),
    /// Crop a window out of a raster
    Crop(commands::crop::CropArgs),
    /// Convert to 8-bit, or binarize a prediction mask
    Convert(commands::convert::ConvertArgs),
    /// Histogram equalization
    Equalize(commands::equalize::EqualizeArgs),
    /// Match a target's histogram to a reference, with optional unsharp sweeps
    Match(commands::match_hist::MatchArgs),
    /// Drop small components from a directory of binary masks
    MaskFilter(commands::mask_filter::MaskFilterArgs),
    /// Cut an image pair and its change mask into training tiles
    Split(commands::split::SplitArgs),
    /// Reassemble a grid of tiles into one raster
    Merge(commands::merge::MergeArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Align(args) => commands::align::run(args),
        Commands::Crop(args) => commands::crop::run(args),
        Commands::Convert(args) => commands::convert::run(args),
        Commands::Equalize(args) => commands::equalize::run(args),
        Commands::Match(args) => commands::match_hist::run(args),
        Commands::MaskFilter(args) => commands::mask_filter::run(args),
        Commands::Split(args) => commands::split::run(args),
        Commands::Merge(args) => commands::merge::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}

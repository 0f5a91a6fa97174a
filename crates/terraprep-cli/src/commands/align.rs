use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use terraprep_core::align::{find_best_shift_with_progress, register, SearchParams};
use terraprep_core::config::AlignParams;
use terraprep_core::io::image_io::{load_raster, read_sidecar_metadata, save_raster};
use terraprep_core::io::worldfile::write_world_file;
use terraprep_core::raster::Window;
use std::path::PathBuf;

use crate::summary::print_align_summary;

#[derive(Args)]
pub struct AlignArgs {
    /// Reference raster (the fixed image)
    #[arg(short, long)]
    pub reference: PathBuf,

    /// Target raster to register onto the reference
    #[arg(short, long)]
    pub target: PathBuf,

    /// Output path for the registered target
    #[arg(short, long, default_value = "aligned.tif")]
    pub output: PathBuf,

    /// Comparison window origin X in the reference
    #[arg(long)]
    pub start_x: Option<usize>,

    /// Comparison window origin Y in the reference
    #[arg(long)]
    pub start_y: Option<usize>,

    /// Side of the square comparison window, in pixels
    #[arg(long)]
    pub wsize: Option<usize>,

    /// Maximum shift searched in each direction
    #[arg(long)]
    pub shift: Option<u32>,

    /// TOML config file providing defaults for the search parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report the best shift without writing a registered output
    #[arg(long)]
    pub no_apply: bool,
}

pub fn run(args: &AlignArgs) -> Result<()> {
    let defaults = super::load_tool_config(&args.config)?.align;
    let params = AlignParams {
        start_x: args.start_x.unwrap_or(defaults.start_x),
        start_y: args.start_y.unwrap_or(defaults.start_y),
        window_size: args.wsize.unwrap_or(defaults.window_size),
        shift_range: args.shift.unwrap_or(defaults.shift_range),
    };

    print_align_summary(&args.reference, &args.target, &params);

    let reference = load_raster(&args.reference)
        .with_context(|| format!("Failed to read reference {}", args.reference.display()))?;
    let target = load_raster(&args.target)
        .with_context(|| format!("Failed to read target {}", args.target.display()))?;

    let search = SearchParams {
        window: Window::square(
            params.start_x as i64,
            params.start_y as i64,
            params.window_size,
        ),
        shift_range: params.shift_range,
    };

    let side = 2 * params.shift_range as u64 + 1;
    let pb = ProgressBar::new(side * side);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Searching [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let report = find_best_shift_with_progress(&reference, &target, &search, |done, _, improved| {
        if let Some(c) = improved {
            pb.println(format!(
                "Better shift found: dx={}, dy={}, MSE={:.3}",
                c.shift.dx, c.shift.dy, c.error
            ));
        }
        pb.set_position(done as u64);
    })?;
    pb.finish();

    println!();
    println!(
        "Best shift: dx={}, dy={}, MSE={:.3} ({} candidates evaluated, {} skipped)",
        report.best.shift.dx,
        report.best.shift.dy,
        report.best.error,
        report.evaluated,
        report.skipped
    );

    if args.no_apply {
        return Ok(());
    }

    let aligned = register(&target, report.best.shift);
    save_raster(&aligned, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    // The registered target sits on the reference's pixel grid, so the
    // reference georeferencing carries over unchanged.
    if let Some(meta) = read_sidecar_metadata(&args.reference)? {
        let world = write_world_file(&args.output, &meta.transform)?;
        println!("World file written to {}", world.display());
    }

    println!("Aligned raster saved to {}", args.output.display());
    Ok(())
}

use anyhow::{ensure, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use terraprep_core::io::image_io::{load_raster, save_raster};
use terraprep_core::tiles;
use std::fs;
use std::path::PathBuf;

#[derive(Args)]
pub struct SplitArgs {
    /// Earlier acquisition (A side)
    #[arg(long)]
    pub before: PathBuf,

    /// Later acquisition (B side)
    #[arg(long)]
    pub after: PathBuf,

    /// Change mask aligned with the pair
    #[arg(long)]
    pub label: PathBuf,

    /// Dataset directory; tiles land in A/, B/, and label/ beneath it
    #[arg(short, long)]
    pub output: PathBuf,

    /// Tile side in pixels
    #[arg(long)]
    pub tile_size: Option<usize>,

    /// Horizontal offset applied to every tile origin
    #[arg(long, default_value = "0")]
    pub x_shift: usize,

    /// TOML config file providing the tile size default
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &SplitArgs) -> Result<()> {
    let defaults = super::load_tool_config(&args.config)?.tiles;
    let tile_size = args.tile_size.unwrap_or(defaults.tile_size);

    let before = load_raster(&args.before)
        .with_context(|| format!("Failed to read {}", args.before.display()))?;
    let after = load_raster(&args.after)
        .with_context(|| format!("Failed to read {}", args.after.display()))?;
    let label = load_raster(&args.label)
        .with_context(|| format!("Failed to read {}", args.label.display()))?;

    ensure!(
        before.dimensions() == after.dimensions() && before.dimensions() == label.dimensions(),
        "Inputs must share dimensions: before {:?}, after {:?}, label {:?}",
        before.dimensions(),
        after.dimensions(),
        label.dimensions()
    );

    let (width, height) = before.dimensions();
    let windows = tiles::grid(width, height, tile_size, args.x_shift)?;
    ensure!(
        !windows.is_empty(),
        "No complete {tile_size}px tiles fit in {width}x{height}"
    );

    for side in ["A", "B", "label"] {
        fs::create_dir_all(args.output.join(side))
            .with_context(|| format!("Failed to create {}", args.output.join(side).display()))?;
    }

    let pb = ProgressBar::new(windows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Splitting [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    for (count, window) in windows.iter().enumerate() {
        let name = format!("w{count}.png");
        save_raster(&before.crop(window)?, &args.output.join("A").join(&name))?;
        save_raster(&after.crop(window)?, &args.output.join("B").join(&name))?;
        save_raster(&label.crop(window)?, &args.output.join("label").join(&name))?;
        pb.inc(1);
    }
    pb.finish();

    println!(
        "Wrote {} tile triplets to {}",
        windows.len(),
        args.output.display()
    );
    Ok(())
}

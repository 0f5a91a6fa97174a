use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use terraprep_core::io::image_io::{load_raster, save_raster};
use terraprep_core::raster::Raster;
use terraprep_core::tiles;
use std::path::PathBuf;

#[derive(Args)]
pub struct MergeArgs {
    /// Directory containing the tiles
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output raster
    #[arg(short, long)]
    pub output: PathBuf,

    /// Grid rows
    #[arg(long)]
    pub rows: usize,

    /// Grid columns
    #[arg(long)]
    pub cols: usize,

    /// Tile side in pixels
    #[arg(long)]
    pub tile_size: Option<usize>,

    /// Tile filename suffix; tiles are named <index><suffix>.png
    #[arg(long, default_value = "per")]
    pub suffix: String,

    /// TOML config file providing the tile size default
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &MergeArgs) -> Result<()> {
    let defaults = super::load_tool_config(&args.config)?.tiles;
    let tile_size = args.tile_size.unwrap_or(defaults.tile_size);

    let total = args.rows * args.cols;
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Merging [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    // Row-major: index i is tile (i / cols, i % cols).
    let tiles: Vec<Raster> = (0..total)
        .map(|i| {
            let path = args.input.join(format!("{i}{}.png", args.suffix));
            let tile = load_raster(&path)
                .with_context(|| format!("Failed to read tile {}", path.display()))?;
            pb.inc(1);
            Ok(tile)
        })
        .collect::<Result<_>>()?;
    pb.finish();

    let merged = tiles::merge(&tiles, args.rows, args.cols, tile_size)?;
    save_raster(&merged, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Merged {}x{} tiles into {}",
        args.rows,
        args.cols,
        args.output.display()
    );
    Ok(())
}

use anyhow::{Context, Result};
use clap::Args;
use rand::Rng;
use terraprep_core::io::image_io::{load_raster, read_sidecar_metadata, save_raster};
use terraprep_core::io::worldfile::write_world_file;
use terraprep_core::raster::Window;
use std::path::PathBuf;

#[derive(Args)]
pub struct CropArgs {
    /// Input raster
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output raster
    #[arg(short, long)]
    pub output: PathBuf,

    /// Crop width in pixels
    #[arg(long)]
    pub xsize: usize,

    /// Crop height in pixels
    #[arg(long)]
    pub ysize: usize,

    /// Crop origin X, slid into range when out of bounds
    #[arg(long, default_value = "0", conflicts_with = "randomize")]
    pub xoff: i64,

    /// Crop origin Y, slid into range when out of bounds
    #[arg(long, default_value = "0", conflicts_with = "randomize")]
    pub yoff: i64,

    /// Pick a uniformly random origin instead
    #[arg(long)]
    pub randomize: bool,
}

pub fn run(args: &CropArgs) -> Result<()> {
    let raster = load_raster(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let (width, height) = raster.dimensions();

    // clamped() also rejects windows larger than the raster.
    let window = Window::new(args.xoff, args.yoff, args.xsize, args.ysize)
        .clamped(width, height)?;
    let window = if args.randomize {
        let mut rng = rand::thread_rng();
        Window::new(
            rng.gen_range(0..=(width - args.xsize) as i64),
            rng.gen_range(0..=(height - args.ysize) as i64),
            args.xsize,
            args.ysize,
        )
    } else {
        window
    };

    let cropped = raster.crop(&window)?;
    save_raster(&cropped, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if let Some(meta) = read_sidecar_metadata(&args.input)? {
        let transform = meta.transform.for_window(&window);
        let world = write_world_file(&args.output, &transform)?;
        println!("World file written to {}", world.display());
    }

    println!(
        "Cropped {}x{} at ({}, {}) into {}",
        window.width,
        window.height,
        window.x,
        window.y,
        args.output.display()
    );
    Ok(())
}

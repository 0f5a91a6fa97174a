use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use terraprep_core::io::image_io::{load_raster, read_sidecar_metadata};

#[derive(Args)]
pub struct InfoArgs {
    /// Input raster
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let raster = load_raster(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let mut min = u16::MAX;
    let mut max = 0u16;
    let mut sum = 0u64;
    for &v in raster.data.iter() {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let mean = sum as f64 / raster.data.len() as f64;

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", raster.width(), raster.height());
    println!("Bit depth:   {}", raster.bit_depth);
    println!("Sample min:  {}", min);
    println!("Sample max:  {}", max);
    println!("Sample mean: {:.2}", mean);

    if let Some(meta) = read_sidecar_metadata(&args.file)? {
        let t = meta.transform;
        println!("Origin:      ({}, {})", t.origin_x, t.origin_y);
        println!("Pixel size:  {} x {}", t.pixel_width, t.pixel_height);
        if let Some(epsg) = meta.epsg {
            println!("CRS:         EPSG:{}", epsg);
        }
    }

    Ok(())
}

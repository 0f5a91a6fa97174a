use anyhow::{Context, Result};
use clap::Args;
use terraprep_core::filters::equalize;
use terraprep_core::io::image_io::{load_raster, save_raster};
use std::path::PathBuf;

#[derive(Args)]
pub struct EqualizeArgs {
    /// Input raster
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output raster
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn run(args: &EqualizeArgs) -> Result<()> {
    let raster = load_raster(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let equalized = equalize(&raster);
    save_raster(&equalized, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Equalized raster saved to {}", args.output.display());
    Ok(())
}

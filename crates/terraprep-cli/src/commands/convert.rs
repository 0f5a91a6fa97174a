use anyhow::{Context, Result};
use clap::Args;
use terraprep_core::io::image_io::{load_raster, read_sidecar_metadata, save_raster, to_8bit};
use terraprep_core::io::worldfile::write_world_file;
use terraprep_core::mask::normalize_prediction;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ConvertArgs {
    /// Input raster
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output path (defaults to the input stem with .png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat the input as a model prediction and binarize it
    #[arg(long)]
    pub mask: bool,

    /// Copy georeferencing from this raster into a world file beside the output
    #[arg(long)]
    pub georef: Option<PathBuf>,
}

pub fn run(args: &ConvertArgs) -> Result<()> {
    let raster = load_raster(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    let converted = if args.mask {
        normalize_prediction(&raster)
    } else {
        to_8bit(&raster)
    };
    save_raster(&converted, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if let Some(ref georef) = args.georef {
        match read_sidecar_metadata(georef)? {
            Some(meta) => {
                let world = write_world_file(&output, &meta.transform)?;
                println!("World file written to {}", world.display());
            }
            None => println!("No georeferencing found in {}", georef.display()),
        }
    }

    println!("Saved to {}", output.display());
    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let parent = input.parent().unwrap_or(Path::new("."));
    let path = parent.join(format!("{stem}.png"));
    if path == input {
        // PNG input converting to PNG must not clobber itself.
        parent.join(format!("{stem}_8bit.png"))
    } else {
        path
    }
}

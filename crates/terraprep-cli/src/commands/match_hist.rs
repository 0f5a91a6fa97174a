use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use terraprep_core::filters::{match_histograms, unsharp_mask};
use terraprep_core::io::image_io::{load_raster, save_raster};
use std::path::PathBuf;

#[derive(Args)]
pub struct MatchArgs {
    /// Reference raster whose histogram is the target distribution
    #[arg(short, long)]
    pub reference: PathBuf,

    /// Raster to remap
    #[arg(short, long)]
    pub target: PathBuf,

    /// Output prefix; files are written as <prefix>_histmatched.png and
    /// <prefix>_um<N>.png
    #[arg(short, long)]
    pub output: String,

    /// Unsharp sweep entry as radius,amount (repeatable)
    #[arg(long = "unsharp", value_name = "RADIUS,AMOUNT")]
    pub unsharp: Vec<String>,

    /// Skip writing the plain histogram-matched output
    #[arg(long)]
    pub skip_matched: bool,
}

pub fn run(args: &MatchArgs) -> Result<()> {
    let sweeps = parse_sweeps(&args.unsharp)?;

    let reference = load_raster(&args.reference)
        .with_context(|| format!("Failed to read reference {}", args.reference.display()))?;
    let target = load_raster(&args.target)
        .with_context(|| format!("Failed to read target {}", args.target.display()))?;

    let matched = match_histograms(&target, &reference);

    if !args.skip_matched {
        let path = PathBuf::from(format!("{}_histmatched.png", args.output));
        save_raster(&matched, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Saved {}", path.display());
    }

    if sweeps.is_empty() {
        return Ok(());
    }

    let pb = ProgressBar::new(sweeps.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Sharpening [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    for (i, &(radius, amount)) in sweeps.iter().enumerate() {
        let sharpened = unsharp_mask(&matched, radius, amount);
        let path = PathBuf::from(format!("{}_um{}.png", args.output, i + 1));
        save_raster(&sharpened, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        pb.println(format!(
            "Saved {} (radius={radius}, amount={amount})",
            path.display()
        ));
        pb.inc(1);
    }
    pb.finish();

    Ok(())
}

fn parse_sweeps(entries: &[String]) -> Result<Vec<(f32, f32)>> {
    entries
        .iter()
        .map(|entry| {
            let parts: Vec<&str> = entry.split(',').map(str::trim).collect();
            if parts.len() != 2 {
                bail!("Invalid unsharp entry '{entry}', expected RADIUS,AMOUNT");
            }
            let radius = parts[0]
                .parse()
                .with_context(|| format!("Invalid radius in '{entry}'"))?;
            let amount = parts[1]
                .parse()
                .with_context(|| format!("Invalid amount in '{entry}'"))?;
            Ok((radius, amount))
        })
        .collect()
}

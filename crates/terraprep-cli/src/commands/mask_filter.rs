use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use terraprep_core::geo::GeoTransform;
use terraprep_core::io::image_io::{load_raster, read_sidecar_metadata, save_raster};
use terraprep_core::mask::{filter_by_area_with_components, ComponentStats, MaskFilterStats};
use tracing::warn;
use std::fs;
use std::path::PathBuf;

use crate::summary::print_mask_filter_summary;

#[derive(Args)]
pub struct MaskFilterArgs {
    /// Directory of mask rasters to clean
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for the cleaned masks
    #[arg(short, long)]
    pub output: PathBuf,

    /// Foreground threshold; samples strictly above it are foreground
    #[arg(long)]
    pub threshold: Option<u16>,

    /// Minimum component area in pixels
    #[arg(long)]
    pub min_area: Option<usize>,

    /// File extension to process
    #[arg(long, default_value = "png")]
    pub ext: String,

    /// Write a CSV report of the kept components
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Raster supplying georeferencing for world coordinates in the report
    #[arg(long)]
    pub georef: Option<PathBuf>,

    /// TOML config file providing threshold and area defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
}

struct FileOutcome {
    name: String,
    stats: MaskFilterStats,
    kept: Vec<ComponentStats>,
}

pub fn run(args: &MaskFilterArgs) -> Result<()> {
    let defaults = super::load_tool_config(&args.config)?.mask;
    let threshold = args.threshold.unwrap_or(defaults.threshold);
    let min_area = args.min_area.unwrap_or(defaults.min_area);

    let files = collect_masks(args)?;
    if files.is_empty() {
        println!(
            "No .{} files found in {}",
            args.ext,
            args.input.display()
        );
        return Ok(());
    }

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let transform = match &args.georef {
        Some(path) => read_sidecar_metadata(path)?.map(|meta| meta.transform),
        None => None,
    };

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Filtering [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let outcomes: Vec<Option<FileOutcome>> = files
        .par_iter()
        .map(|path| {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            let raster = match load_raster(path) {
                Ok(raster) => raster,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Skipping unreadable mask");
                    pb.inc(1);
                    return Ok(None);
                }
            };
            let (cleaned, stats, kept) =
                filter_by_area_with_components(&raster, threshold, min_area);
            let out_path = args.output.join(&name);
            save_raster(&cleaned, &out_path)
                .with_context(|| format!("Failed to write {}", out_path.display()))?;
            pb.inc(1);
            Ok(Some(FileOutcome { name, stats, kept }))
        })
        .collect::<Result<_>>()?;
    pb.finish();

    let outcomes: Vec<FileOutcome> = outcomes.into_iter().flatten().collect();

    let mut totals = MaskFilterStats::default();
    for outcome in &outcomes {
        totals.total += outcome.stats.total;
        totals.kept += outcome.stats.kept;
        totals.dropped_area += outcome.stats.dropped_area;
        println!(
            "  {}: kept {}/{} components",
            outcome.name, outcome.stats.kept, outcome.stats.total
        );
    }
    print_mask_filter_summary(outcomes.len(), &totals);

    if let Some(ref report) = args.report {
        write_report(report, &outcomes, transform.as_ref())?;
        println!("Report written to {}", report.display());
    }

    Ok(())
}

/// Files with the requested extension, sorted by name so runs are
/// deterministic.
fn collect_masks(args: &MaskFilterArgs) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(&args.input)
        .with_context(|| format!("Failed to read directory {}", args.input.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(&args.ext))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn write_report(
    path: &PathBuf,
    outcomes: &[FileOutcome],
    transform: Option<&GeoTransform>,
) -> Result<()> {
    let mut csv = String::new();
    if transform.is_some() {
        csv.push_str("file,label,area,centroid_col,centroid_row,world_x,world_y\n");
    } else {
        csv.push_str("file,label,area,centroid_col,centroid_row\n");
    }

    for outcome in outcomes {
        for component in &outcome.kept {
            let (col, row) = component.centroid;
            match transform {
                Some(t) => {
                    // Centroids are in corner-continuous coordinates, so
                    // the half pixel moves them onto sample centers.
                    let (x, y) = t.apply(col + 0.5, row + 0.5);
                    csv.push_str(&format!(
                        "{},{},{},{:.2},{:.2},{:.3},{:.3}\n",
                        outcome.name, component.label, component.area, col, row, x, y
                    ));
                }
                None => {
                    csv.push_str(&format!(
                        "{},{},{},{:.2},{:.2}\n",
                        outcome.name, component.label, component.area, col, row
                    ));
                }
            }
        }
    }

    fs::write(path, csv).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TerraprepError};
use crate::geo::GeoTransform;

/// Sidecar world file path for an image: `.pgw` for PNG, `.tfw` for
/// TIFF, `.wld` for anything else.
pub fn world_path_for(image: &Path) -> PathBuf {
    let ext = image
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let world_ext = match ext.as_deref() {
        Some("png") => "pgw",
        Some("tif" | "tiff") => "tfw",
        _ => "wld",
    };
    image.with_extension(world_ext)
}

/// Write a six-line world file next to `image`, returning its path.
///
/// World files store the center of the top-left pixel, so the
/// corner-based transform origin gains half a pixel on the way out.
pub fn write_world_file(image: &Path, transform: &GeoTransform) -> Result<PathBuf> {
    let path = world_path_for(image);
    let (center_x, center_y) = transform.apply(0.5, 0.5);
    let contents = format!(
        "{}\n{}\n{}\n{}\n{}\n{}\n",
        transform.pixel_width,
        transform.col_rotation,
        transform.row_rotation,
        transform.pixel_height,
        center_x,
        center_y
    );
    fs::write(&path, contents)?;
    Ok(path)
}

/// Read a world file back into a corner-origin transform.
pub fn read_world_file(path: &Path) -> Result<GeoTransform> {
    let contents = fs::read_to_string(path)?;
    let values: Vec<f64> = contents
        .split_whitespace()
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| {
            TerraprepError::Geo(format!("Invalid world file {}: {e}", path.display()))
        })?;
    if values.len() < 6 {
        return Err(TerraprepError::Geo(format!(
            "World file {} has {} values, expected 6",
            path.display(),
            values.len()
        )));
    }

    let mut transform = GeoTransform {
        origin_x: 0.0,
        origin_y: 0.0,
        pixel_width: values[0],
        col_rotation: values[1],
        row_rotation: values[2],
        pixel_height: values[3],
    };
    // Undo the half-pixel: the file stores the top-left pixel's center.
    transform.origin_x = values[4] - 0.5 * transform.pixel_width - 0.5 * transform.row_rotation;
    transform.origin_y = values[5] - 0.5 * transform.col_rotation - 0.5 * transform.pixel_height;
    Ok(transform)
}

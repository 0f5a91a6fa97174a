use std::path::Path;

use image::{DynamicImage, GrayImage, ImageBuffer, ImageFormat, Luma};
use ndarray::Array2;
use tracing::debug;

use crate::error::{Result, TerraprepError};
use crate::geo::GeoMetadata;
use crate::io::{geotiff, worldfile};
use crate::raster::Raster;

/// Load a single-band raster from any format the `image` crate decodes.
///
/// 16-bit sources keep their full range and load at bit depth 16; every
/// other source is converted to 8-bit luma. Color images are collapsed to
/// grayscale.
pub fn load_raster(path: &Path) -> Result<Raster> {
    let img = image::open(path)?;
    let raster = match img {
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => {
            let gray = img.to_luma16();
            let (w, h) = gray.dimensions();
            let mut data = Array2::<u16>::zeros((h as usize, w as usize));
            for (x, y, pixel) in gray.enumerate_pixels() {
                data[[y as usize, x as usize]] = pixel.0[0];
            }
            Raster::new(data, 16)?
        }
        _ => {
            let gray = img.to_luma8();
            let (w, h) = gray.dimensions();
            let mut data = Array2::<u16>::zeros((h as usize, w as usize));
            for (x, y, pixel) in gray.enumerate_pixels() {
                data[[y as usize, x as usize]] = pixel.0[0] as u16;
            }
            Raster::new(data, 8)?
        }
    };
    debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        bit_depth = raster.bit_depth,
        "Raster loaded"
    );
    Ok(raster)
}

/// Save a raster; the container format follows the file extension
/// (`.png`, `.tif`/`.tiff`). 8-bit rasters are written as `Luma8`,
/// 16-bit as `Luma16`.
pub fn save_raster(raster: &Raster, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let format = match ext.as_deref() {
        Some("png") => ImageFormat::Png,
        Some("tif" | "tiff") => ImageFormat::Tiff,
        other => {
            return Err(TerraprepError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            ))
        }
    };

    if raster.bit_depth <= 8 {
        save_8bit(raster, path, format)
    } else {
        save_16bit(raster, path, format)
    }
}

fn save_8bit(raster: &Raster, path: &Path, format: ImageFormat) -> Result<()> {
    let (width, height) = raster.dimensions();
    let mut img = GrayImage::new(width as u32, height as u32);
    for row in 0..height {
        for col in 0..width {
            let value = raster.data[[row, col]].min(u8::MAX as u16) as u8;
            img.put_pixel(col as u32, row as u32, Luma([value]));
        }
    }
    img.save_with_format(path, format)?;
    Ok(())
}

fn save_16bit(raster: &Raster, path: &Path, format: ImageFormat) -> Result<()> {
    let (width, height) = raster.dimensions();
    let mut pixels: Vec<u16> = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            pixels.push(raster.data[[row, col]]);
        }
    }
    let img = ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(width as u32, height as u32, pixels)
        .expect("buffer size matches dimensions");
    img.save_with_format(path, format)?;
    Ok(())
}

/// Linear min-max rescale onto the 8-bit range. A constant raster maps to
/// all zeros; 8-bit inputs pass through unchanged.
pub fn to_8bit(raster: &Raster) -> Raster {
    if raster.bit_depth == 8 {
        return raster.clone();
    }
    let min = raster.data.iter().copied().min().unwrap_or(0);
    let max = raster.data.iter().copied().max().unwrap_or(0);
    if min == max {
        return Raster {
            data: Array2::zeros(raster.data.dim()),
            bit_depth: 8,
        };
    }
    let range = (max - min) as f64;
    Raster {
        data: raster
            .data
            .mapv(|v| (((v - min) as f64 / range) * 255.0).round() as u16),
        bit_depth: 8,
    }
}

/// Read georeferencing for an image: embedded GeoTIFF tags first, then a
/// world file next to the image. `Ok(None)` when neither is present.
pub fn read_sidecar_metadata(path: &Path) -> Result<Option<GeoMetadata>> {
    if let Some(meta) = geotiff::read_geo_metadata(path)? {
        return Ok(Some(meta));
    }
    let world = worldfile::world_path_for(path);
    if world.exists() {
        let transform = worldfile::read_world_file(&world)?;
        return Ok(Some(GeoMetadata {
            transform,
            epsg: None,
        }));
    }
    Ok(None)
}

//! Raster file I/O: PNG/TIFF loading and saving, georeferencing sidecars.

pub mod geotiff;
pub mod image_io;
pub mod worldfile;

pub use image_io::{load_raster, read_sidecar_metadata, save_raster, to_8bit};

use thiserror::Error;

use crate::raster::Window;

#[derive(Error, Debug)]
pub enum TerraprepError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Window {window} exceeds raster dimensions ({raster_width}x{raster_height})")]
    WindowOutOfBounds {
        window: Window,
        raster_width: usize,
        raster_height: usize,
    },

    #[error("Shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("No valid shift candidate within range {shift_range} ({skipped} candidates out of bounds)")]
    NoValidCandidate { shift_range: u32, skipped: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid geo metadata: {0}")]
    Geo(String),
}

pub type Result<T> = std::result::Result<T, TerraprepError>;

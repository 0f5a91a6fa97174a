//! Georeferencing: the affine pixel-to-world transform and its metadata.

use crate::error::{Result, TerraprepError};
use crate::raster::Window;

/// Affine georeferencing coefficients, stored in GDAL order:
/// `[origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]`.
///
/// ```text
/// x = origin_x + col * pixel_width  + row * row_rotation
/// y = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// The origin is the outer corner of the top-left pixel; `pixel_height`
/// is negative for north-up rasters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
    pub row_rotation: f64,
    pub col_rotation: f64,
}

impl GeoTransform {
    /// Axis-aligned transform without rotation terms.
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            row_rotation: 0.0,
            col_rotation: 0.0,
        }
    }

    pub fn from_gdal(coeffs: [f64; 6]) -> Self {
        Self {
            origin_x: coeffs[0],
            pixel_width: coeffs[1],
            row_rotation: coeffs[2],
            origin_y: coeffs[3],
            col_rotation: coeffs[4],
            pixel_height: coeffs[5],
        }
    }

    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.col_rotation,
            self.pixel_height,
        ]
    }

    /// Apply the affine to continuous pixel coordinates. Integer
    /// coordinates address pixel corners; add 0.5 for centers.
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        let x = self.origin_x + col * self.pixel_width + row * self.row_rotation;
        let y = self.origin_y + col * self.col_rotation + row * self.pixel_height;
        (x, y)
    }

    /// Geographic coordinates of the center of the pixel at (col, row).
    pub fn pixel_to_geo(&self, col: usize, row: usize) -> (f64, f64) {
        self.apply(col as f64 + 0.5, row as f64 + 0.5)
    }

    /// Continuous pixel coordinates of a geographic point.
    ///
    /// Fails when the transform is degenerate (zero determinant).
    pub fn geo_to_pixel(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let det = self.pixel_width * self.pixel_height - self.row_rotation * self.col_rotation;
        if det == 0.0 {
            return Err(TerraprepError::Geo(
                "Transform is degenerate, cannot invert".into(),
            ));
        }
        let dx = x - self.origin_x;
        let dy = y - self.origin_y;
        let col = (dx * self.pixel_height - dy * self.row_rotation) / det;
        let row = (dy * self.pixel_width - dx * self.col_rotation) / det;
        Ok((col, row))
    }

    /// Transform translated to a crop window's origin, so the cropped
    /// raster keeps valid georeferencing.
    pub fn for_window(&self, window: &Window) -> GeoTransform {
        let (origin_x, origin_y) = self.apply(window.x as f64, window.y as f64);
        GeoTransform {
            origin_x,
            origin_y,
            ..*self
        }
    }
}

/// Georeferencing read from a raster's embedded tags or sidecar file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoMetadata {
    pub transform: GeoTransform,
    /// EPSG code of the coordinate reference system, when known.
    pub epsg: Option<u32>,
}

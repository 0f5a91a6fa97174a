use ndarray::Array2;

use terraprep_core::raster::Raster;

/// Build an 8-bit raster from a fill function over (row, col).
pub fn raster_from_fn(
    width: usize,
    height: usize,
    f: impl Fn(usize, usize) -> u16,
) -> Raster {
    let data = Array2::from_shape_fn((height, width), |(row, col)| f(row, col));
    Raster::new(data, 8).expect("valid test raster")
}

/// Build a 16-bit raster from a fill function over (row, col).
pub fn raster16_from_fn(
    width: usize,
    height: usize,
    f: impl Fn(usize, usize) -> u16,
) -> Raster {
    let data = Array2::from_shape_fn((height, width), |(row, col)| f(row, col));
    Raster::new(data, 16).expect("valid test raster")
}

/// Uniform 8-bit raster filled with one value.
pub fn constant_raster(width: usize, height: usize, value: u16) -> Raster {
    raster_from_fn(width, height, |_, _| value)
}

/// Copy of `raster` with a square block overwritten.
///
/// The block starts at (x, y) and covers `size` pixels on each side.
pub fn with_block(raster: &Raster, x: usize, y: usize, size: usize, value: u16) -> Raster {
    let mut out = raster.clone();
    for row in y..y + size {
        for col in x..x + size {
            out.data[[row, col]] = value;
        }
    }
    out
}

/// Translate raster content by (dx, dy) with zero fill, built by direct
/// indexing so it can serve as an expected value for the shift applier.
pub fn translated(raster: &Raster, dx: i64, dy: i64) -> Raster {
    let (h, w) = raster.data.dim();
    let mut data = Array2::<u16>::zeros((h, w));
    for row in 0..h {
        for col in 0..w {
            let src_row = row as i64 - dy;
            let src_col = col as i64 - dx;
            if src_row >= 0 && src_row < h as i64 && src_col >= 0 && src_col < w as i64 {
                data[[row, col]] = raster.data[[src_row as usize, src_col as usize]];
            }
        }
    }
    Raster {
        data,
        bit_depth: raster.bit_depth,
    }
}

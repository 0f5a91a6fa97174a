//! Tiling: cutting rasters into fixed-size training tiles and merging
//! tile grids back into one raster.

use ndarray::{s, Array2};

use crate::error::{Result, TerraprepError};
use crate::raster::{Raster, Window};

/// Row-major grid of full tiles over a raster of the given size.
///
/// Only complete tiles are produced; partial tiles at the right and
/// bottom edges are skipped. `x_shift` offsets every tile origin
/// horizontally, dropping trailing columns instead of wrapping.
pub fn grid(
    raster_width: usize,
    raster_height: usize,
    tile_size: usize,
    x_shift: usize,
) -> Result<Vec<Window>> {
    if tile_size == 0 {
        return Err(TerraprepError::InvalidParameter(
            "Tile size must be > 0".into(),
        ));
    }

    let mut windows = Vec::new();
    let mut y = 0;
    while y + tile_size <= raster_height {
        let mut x = x_shift;
        while x + tile_size <= raster_width {
            windows.push(Window::new(x as i64, y as i64, tile_size, tile_size));
            x += tile_size;
        }
        y += tile_size;
    }
    Ok(windows)
}

/// Reassemble a row-major sequence of square tiles into one raster.
///
/// Exactly `rows * cols` tiles of side `tile_size` are required; the
/// output takes the first tile's bit depth.
pub fn merge(tiles: &[Raster], rows: usize, cols: usize, tile_size: usize) -> Result<Raster> {
    if rows == 0 || cols == 0 || tile_size == 0 {
        return Err(TerraprepError::InvalidParameter(
            "Rows, cols, and tile size must be > 0".into(),
        ));
    }
    if tiles.len() != rows * cols {
        return Err(TerraprepError::InvalidParameter(format!(
            "Expected {} tiles for a {rows}x{cols} grid, got {}",
            rows * cols,
            tiles.len()
        )));
    }

    let mut canvas = Array2::<u16>::zeros((rows * tile_size, cols * tile_size));
    for (index, tile) in tiles.iter().enumerate() {
        if tile.data.dim() != (tile_size, tile_size) {
            return Err(TerraprepError::ShapeMismatch {
                left: (tile_size, tile_size),
                right: tile.data.dim(),
            });
        }
        let row = index / cols;
        let col = index % cols;
        canvas
            .slice_mut(s![
                row * tile_size..(row + 1) * tile_size,
                col * tile_size..(col + 1) * tile_size
            ])
            .assign(&tile.data);
    }

    Raster::new(canvas, tiles[0].bit_depth)
}

use ndarray::{s, Array2};

use crate::raster::{Raster, Shift};

/// Translate a raster by an integer shift onto a same-size canvas.
///
/// Every output pixel takes its value from `(col - dx, row - dy)` in the
/// source. Regions with no source pixel are zero; content pushed past the
/// far edge is discarded.
pub fn shift_raster(raster: &Raster, shift: Shift) -> Raster {
    let (height, width) = raster.data.dim();
    let mut data = Array2::<u16>::zeros((height, width));

    // Destination column span whose source columns exist.
    let dst_start = shift.dx.clamp(0, width as i64) as usize;
    let dst_end = (width as i64 + shift.dx).clamp(0, width as i64) as usize;

    if dst_start < dst_end {
        for row in 0..height {
            let src_row = row as i64 - shift.dy;
            if src_row < 0 || src_row >= height as i64 {
                continue;
            }
            let src_row = src_row as usize;
            let src_start = (dst_start as i64 - shift.dx) as usize;
            let src_end = (dst_end as i64 - shift.dx) as usize;
            data.slice_mut(s![row, dst_start..dst_end])
                .assign(&raster.data.slice(s![src_row, src_start..src_end]));
        }
    }

    Raster {
        data,
        bit_depth: raster.bit_depth,
    }
}

/// Register a target onto the reference it was searched against.
///
/// The search reports where the reference window content sits inside the
/// target, so moving the target back means applying the negated shift.
pub fn register(target: &Raster, best: Shift) -> Raster {
    shift_raster(target, -best)
}

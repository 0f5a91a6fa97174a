use ndarray::ArrayView2;

use crate::error::{Result, TerraprepError};
use crate::raster::Raster;

/// Mean squared error between two equally shaped patches.
///
/// Differences are widened to `f64` before squaring, so every `u16`
/// sample pair is exact and the sum cannot overflow.
pub fn mse(a: &ArrayView2<u16>, b: &ArrayView2<u16>) -> Result<f64> {
    if a.dim() != b.dim() {
        return Err(TerraprepError::ShapeMismatch {
            left: a.dim(),
            right: b.dim(),
        });
    }
    let count = a.len();
    if count == 0 {
        return Ok(0.0);
    }
    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let diff = x as f64 - y as f64;
            diff * diff
        })
        .sum();
    Ok(sum / count as f64)
}

/// MSE over two whole rasters.
pub fn mse_rasters(a: &Raster, b: &Raster) -> Result<f64> {
    mse(&a.data.view(), &b.data.view())
}

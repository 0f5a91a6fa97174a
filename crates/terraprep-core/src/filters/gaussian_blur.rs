use ndarray::{Array2, Axis};
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::raster::Raster;

/// Gaussian blur with a 3-sigma kernel radius and clamped edges.
///
/// Samples are filtered in `f32` and rounded back with saturation into
/// the raster's bit-depth range. A non-positive sigma returns the input
/// unchanged.
pub fn gaussian_blur(raster: &Raster, sigma: f32) -> Raster {
    if sigma <= 0.0 {
        return raster.clone();
    }
    let input = raster.data.mapv(|v| v as f32);
    let blurred = gaussian_blur_array(&input, sigma);
    let max = raster.max_value() as f32;
    Raster {
        data: blurred.mapv(|v| v.round().clamp(0.0, max) as u16),
        bit_depth: raster.bit_depth,
    }
}

/// Separable Gaussian blur on raw `f32` samples: one horizontal pass, one
/// vertical pass.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    let kernel = gaussian_kernel(sigma);
    let horizontal = convolve_axis(data, &kernel, Axis(1));
    convolve_axis(&horizontal, &kernel, Axis(0))
}

/// Normalized 1D Gaussian kernel with radius `ceil(3 * sigma)`.
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as i32;
    let mut kernel = Vec::with_capacity((2 * radius + 1) as usize);
    let denom = 2.0 * sigma * sigma;
    for i in -radius..=radius {
        kernel.push((-(i * i) as f32 / denom).exp());
    }
    let sum: f32 = kernel.iter().sum();
    for k in kernel.iter_mut() {
        *k /= sum;
    }
    kernel
}

/// Convolve along one axis, clamping taps at the edges.
fn convolve_axis(data: &Array2<f32>, kernel: &[f32], axis: Axis) -> Array2<f32> {
    let (height, width) = data.dim();
    let radius = (kernel.len() / 2) as isize;

    let convolve_row = |row: usize| -> Vec<f32> {
        (0..width)
            .map(|col| {
                kernel
                    .iter()
                    .enumerate()
                    .map(|(i, &weight)| {
                        let offset = i as isize - radius;
                        let sample = match axis {
                            Axis(0) => {
                                let r = (row as isize + offset).clamp(0, height as isize - 1);
                                data[[r as usize, col]]
                            }
                            _ => {
                                let c = (col as isize + offset).clamp(0, width as isize - 1);
                                data[[row, c as usize]]
                            }
                        };
                        sample * weight
                    })
                    .sum()
            })
            .collect()
    };

    let rows: Vec<Vec<f32>> = if height * width >= PARALLEL_PIXEL_THRESHOLD {
        (0..height).into_par_iter().map(convolve_row).collect()
    } else {
        (0..height).map(convolve_row).collect()
    };

    let mut result = Array2::<f32>::zeros((height, width));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, value) in row_data.into_iter().enumerate() {
            result[[row, col]] = value;
        }
    }
    result
}

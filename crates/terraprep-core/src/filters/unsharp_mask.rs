use crate::filters::gaussian_blur::gaussian_blur_array;
use crate::raster::Raster;

/// Unsharp mask: `original + amount * (original - blurred)`.
///
/// `radius` is the sigma of the Gaussian blur. The result is rounded and
/// clamped into the raster's bit-depth range; a non-positive radius or a
/// zero amount returns the input unchanged.
pub fn unsharp_mask(raster: &Raster, radius: f32, amount: f32) -> Raster {
    if radius <= 0.0 || amount == 0.0 {
        return raster.clone();
    }

    let original = raster.data.mapv(|v| v as f32);
    let blurred = gaussian_blur_array(&original, radius);
    let max = raster.max_value() as f32;

    let data = ndarray::Zip::from(&original)
        .and(&blurred)
        .map_collect(|&orig, &blur| (orig + (orig - blur) * amount).round().clamp(0.0, max) as u16);

    Raster {
        data,
        bit_depth: raster.bit_depth,
    }
}

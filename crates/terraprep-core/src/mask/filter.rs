use crate::consts::{MASK_FOREGROUND, PREDICTION_SATURATION_CUTOFF};
use crate::raster::Raster;

use super::components::{label_components, ComponentStats};

/// Totals from an area-filtering pass over one mask.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaskFilterStats {
    /// Components found in the thresholded mask.
    pub total: usize,
    /// Components whose area reached the minimum.
    pub kept: usize,
    /// Pixels belonging to dropped components.
    pub dropped_area: usize,
}

/// Binarize a raster: samples strictly above `threshold` become
/// foreground (255), everything else background. The output is 8-bit.
pub fn binarize(raster: &Raster, threshold: u16) -> Raster {
    Raster {
        data: raster
            .data
            .mapv(|v| if v > threshold { MASK_FOREGROUND } else { 0 }),
        bit_depth: 8,
    }
}

/// Clean a model prediction into a strict 0/255 mask.
///
/// Saturated samples (above the cutoff) are zeroed first; every remaining
/// nonzero sample becomes foreground. The order matters: a saturated
/// sample must not survive as foreground.
pub fn normalize_prediction(raster: &Raster) -> Raster {
    Raster {
        data: raster.data.mapv(|v| {
            if v > PREDICTION_SATURATION_CUTOFF {
                0
            } else if v > 0 {
                MASK_FOREGROUND
            } else {
                0
            }
        }),
        bit_depth: 8,
    }
}

/// Drop mask components smaller than `min_area` pixels.
///
/// The input is binarized at `threshold` first; the result is a clean
/// 0/255 mask containing only the kept components.
pub fn filter_by_area(raster: &Raster, threshold: u16, min_area: usize) -> (Raster, MaskFilterStats) {
    let (filtered, stats, _) = filter_by_area_with_components(raster, threshold, min_area);
    (filtered, stats)
}

/// Same as [`filter_by_area`], also returning the kept components for
/// reporting.
pub fn filter_by_area_with_components(
    raster: &Raster,
    threshold: u16,
    min_area: usize,
) -> (Raster, MaskFilterStats, Vec<ComponentStats>) {
    let binary = raster.data.mapv(|v| v > threshold);
    let (labels, components) = label_components(&binary);

    let top_label = components.iter().map(|c| c.label).max().unwrap_or(0);
    let mut keep = vec![false; top_label as usize + 1];
    let mut stats = MaskFilterStats {
        total: components.len(),
        ..Default::default()
    };
    let mut kept_components = Vec::new();
    for component in components {
        if component.area >= min_area {
            keep[component.label as usize] = true;
            stats.kept += 1;
            kept_components.push(component);
        } else {
            stats.dropped_area += component.area;
        }
    }

    let data = labels.mapv(|lbl| {
        if lbl != 0 && keep[lbl as usize] {
            MASK_FOREGROUND
        } else {
            0
        }
    });
    (
        Raster {
            data,
            bit_depth: 8,
        },
        stats,
        kept_components,
    )
}

#[allow(dead_code)]
mod common;

use approx::assert_abs_diff_eq;
use ndarray::Array2;

use terraprep_core::mask::{
    binarize, filter_by_area, filter_by_area_with_components, label_components,
    normalize_prediction,
};
use terraprep_core::raster::Window;

use common::{constant_raster, raster_from_fn, with_block};

fn mask_from(rows: &[&[u8]]) -> Array2<bool> {
    let h = rows.len();
    let w = rows[0].len();
    Array2::from_shape_fn((h, w), |(r, c)| rows[r][c] != 0)
}

#[test]
fn test_binarize_is_strictly_above() {
    let raster = raster_from_fn(4, 1, |_, col| [149, 150, 151, 255][col]);
    let binary = binarize(&raster, 150);
    assert_eq!(binary.data[[0, 0]], 0);
    assert_eq!(binary.data[[0, 1]], 0, "the threshold itself is background");
    assert_eq!(binary.data[[0, 2]], 255);
    assert_eq!(binary.data[[0, 3]], 255);
    assert_eq!(binary.bit_depth, 8);
}

#[test]
fn test_normalize_prediction_saturation_rule() {
    let raster = raster_from_fn(5, 1, |_, col| [0, 1, 253, 254, 255][col]);
    let normalized = normalize_prediction(&raster);
    assert_eq!(normalized.data[[0, 0]], 0);
    assert_eq!(normalized.data[[0, 1]], 255);
    assert_eq!(normalized.data[[0, 2]], 255, "253 is still a detection");
    assert_eq!(normalized.data[[0, 3]], 0, "saturated values are dropped");
    assert_eq!(normalized.data[[0, 4]], 0);
}

#[test]
fn test_label_components_two_blobs() {
    let mask = mask_from(&[
        &[1, 1, 0, 0, 0],
        &[1, 1, 0, 0, 1],
        &[0, 0, 0, 0, 1],
        &[0, 0, 0, 0, 1],
    ]);
    let (labels, components) = label_components(&mask);

    assert_eq!(components.len(), 2);
    // Largest first.
    assert_eq!(components[0].area, 4);
    assert_eq!(components[1].area, 3);

    assert_eq!(components[0].bbox, Window::new(0, 0, 2, 2));
    assert_eq!(components[1].bbox, Window::new(4, 1, 1, 3));

    let (col, row) = components[0].centroid;
    assert_abs_diff_eq!(col, 0.5);
    assert_abs_diff_eq!(row, 0.5);
    let (col, row) = components[1].centroid;
    assert_abs_diff_eq!(col, 4.0);
    assert_abs_diff_eq!(row, 2.0);

    // The label map matches the reported labels.
    assert_eq!(labels[[0, 0]], components[0].label);
    assert_eq!(labels[[2, 4]], components[1].label);
    assert_eq!(labels[[0, 2]], 0);
}

#[test]
fn test_label_components_merges_u_shape() {
    // Two arms meet at the bottom; the second provisional label must be
    // folded into the first.
    let mask = mask_from(&[
        &[1, 0, 1],
        &[1, 0, 1],
        &[1, 1, 1],
    ]);
    let (labels, components) = label_components(&mask);

    assert_eq!(components.len(), 1);
    assert_eq!(components[0].area, 7);
    assert_eq!(components[0].bbox, Window::new(0, 0, 3, 3));

    let root = components[0].label;
    for row in 0..3 {
        for col in 0..3 {
            if mask[[row, col]] {
                assert_eq!(labels[[row, col]], root);
            } else {
                assert_eq!(labels[[row, col]], 0);
            }
        }
    }
}

#[test]
fn test_label_components_empty_mask() {
    let mask = Array2::from_elem((4, 4), false);
    let (labels, components) = label_components(&mask);
    assert!(components.is_empty());
    assert!(labels.iter().all(|&l| l == 0));
}

#[test]
fn test_filter_by_area_drops_small_components() {
    // A 4x4 blob (16 px) and a 2x2 blob (4 px).
    let raster = with_block(&with_block(&constant_raster(20, 20, 0), 2, 2, 4, 255), 10, 10, 2, 255);
    let (filtered, stats) = filter_by_area(&raster, 150, 10);

    assert_eq!(stats.total, 2);
    assert_eq!(stats.kept, 1);
    assert_eq!(stats.dropped_area, 4);

    // The big blob survives as clean foreground.
    assert_eq!(filtered.data[[3, 3]], 255);
    // The small blob is erased.
    assert_eq!(filtered.data[[10, 10]], 0);
    assert_eq!(filtered.bit_depth, 8);
    assert!(filtered.data.iter().all(|&v| v == 0 || v == 255));
}

#[test]
fn test_filter_by_area_keeps_everything_when_min_is_low() {
    let raster = with_block(&constant_raster(12, 12, 0), 1, 1, 3, 200);
    let (filtered, stats) = filter_by_area(&raster, 150, 1);
    assert_eq!(stats.total, 1);
    assert_eq!(stats.kept, 1);
    assert_eq!(stats.dropped_area, 0);
    assert_eq!(filtered.data[[1, 1]], 255);
}

#[test]
fn test_filter_with_components_reports_kept_only() {
    let raster = with_block(&with_block(&constant_raster(20, 20, 0), 2, 2, 4, 255), 10, 10, 2, 255);
    let (_, stats, kept) = filter_by_area_with_components(&raster, 150, 10);
    assert_eq!(stats.kept, kept.len());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].area, 16);
    let (col, row) = kept[0].centroid;
    assert_abs_diff_eq!(col, 3.5);
    assert_abs_diff_eq!(row, 3.5);
}

#[allow(dead_code)]
mod common;

use ndarray::Array2;

use terraprep_core::error::TerraprepError;
use terraprep_core::raster::{Raster, Window};

use common::raster_from_fn;

#[test]
fn test_new_rejects_empty_rasters() {
    let result = Raster::new(Array2::zeros((0, 10)), 8);
    assert!(matches!(
        result,
        Err(TerraprepError::InvalidDimensions {
            width: 10,
            height: 0
        })
    ));
}

#[test]
fn test_new_rejects_odd_bit_depths() {
    let result = Raster::new(Array2::zeros((4, 4)), 12);
    assert!(matches!(
        result,
        Err(TerraprepError::InvalidParameter(_))
    ));
}

#[test]
fn test_dimensions_and_max_value() {
    let raster = Raster::zeros(7, 3, 8).unwrap();
    assert_eq!(raster.dimensions(), (7, 3));
    assert_eq!(raster.width(), 7);
    assert_eq!(raster.height(), 3);
    assert_eq!(raster.max_value(), 255);

    let deep = Raster::zeros(2, 2, 16).unwrap();
    assert_eq!(deep.max_value(), 65535);
}

#[test]
fn test_view_reads_the_right_block() {
    let raster = raster_from_fn(8, 6, |row, col| (row * 10 + col) as u16);
    let view = raster.view(&Window::new(2, 1, 3, 2)).unwrap();
    assert_eq!(view.dim(), (2, 3));
    assert_eq!(view[[0, 0]], 12);
    assert_eq!(view[[1, 2]], 24);
}

#[test]
fn test_view_is_never_clipped() {
    let raster = raster_from_fn(8, 6, |_, _| 1);
    // One pixel over the right edge.
    let result = raster.view(&Window::new(6, 0, 3, 2));
    assert!(matches!(
        result,
        Err(TerraprepError::WindowOutOfBounds { .. })
    ));
    // Negative origin is out of bounds, not clamped to zero.
    let result = raster.view(&Window::new(-1, 0, 3, 2));
    assert!(matches!(
        result,
        Err(TerraprepError::WindowOutOfBounds { .. })
    ));
}

#[test]
fn test_crop_copies_independently() {
    let raster = raster_from_fn(8, 6, |row, col| (row * 10 + col) as u16);
    let mut cropped = raster.crop(&Window::new(2, 1, 3, 2)).unwrap();
    assert_eq!(cropped.dimensions(), (3, 2));
    assert_eq!(cropped.bit_depth, raster.bit_depth);
    assert_eq!(cropped.data[[0, 0]], 12);

    cropped.data[[0, 0]] = 999;
    assert_eq!(raster.data[[1, 2]], 12, "crop must not alias the source");
}

#[test]
fn test_window_offset() {
    let window = Window::new(5, 5, 4, 4);
    let moved = window.offset(terraprep_core::raster::Shift::new(-7, 2));
    assert_eq!(moved.x, -2);
    assert_eq!(moved.y, 7);
    assert_eq!(moved.width, 4);
}

#[test]
fn test_window_display() {
    let window = Window::new(3, -1, 10, 20);
    assert_eq!(window.to_string(), "(3,-1 10x20)");
}

#[allow(dead_code)]
mod common;

use terraprep_core::error::TerraprepError;
use terraprep_core::raster::{Raster, Window};
use terraprep_core::tiles::{grid, merge};

use common::{constant_raster, raster_from_fn};

#[test]
fn test_grid_covers_full_tiles_row_major() {
    let windows = grid(512, 512, 256, 0).unwrap();
    assert_eq!(windows.len(), 4);
    assert_eq!(windows[0], Window::new(0, 0, 256, 256));
    assert_eq!(windows[1], Window::new(256, 0, 256, 256));
    assert_eq!(windows[2], Window::new(0, 256, 256, 256));
    assert_eq!(windows[3], Window::new(256, 256, 256, 256));
}

#[test]
fn test_grid_skips_partial_tiles() {
    // 300x520: one 256px column fits, two rows fit.
    let windows = grid(300, 520, 256, 0).unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0], Window::new(0, 0, 256, 256));
    assert_eq!(windows[1], Window::new(0, 256, 256, 256));
}

#[test]
fn test_grid_x_shift_drops_trailing_columns() {
    // Shifted by 128, only one full 256px column remains per row.
    let windows = grid(512, 512, 256, 128).unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0], Window::new(128, 0, 256, 256));
    assert_eq!(windows[1], Window::new(128, 256, 256, 256));
}

#[test]
fn test_grid_too_small_raster_yields_nothing() {
    let windows = grid(100, 100, 256, 0).unwrap();
    assert!(windows.is_empty());
}

#[test]
fn test_grid_rejects_zero_tile_size() {
    assert!(matches!(
        grid(512, 512, 0, 0),
        Err(TerraprepError::InvalidParameter(_))
    ));
}

#[test]
fn test_split_then_merge_round_trips() {
    let original = raster_from_fn(32, 32, |row, col| ((row * 37 + col * 11) % 256) as u16);
    let windows = grid(32, 32, 16, 0).unwrap();
    let tiles: Vec<Raster> = windows
        .iter()
        .map(|w| original.crop(w).unwrap())
        .collect();

    let merged = merge(&tiles, 2, 2, 16).unwrap();
    assert_eq!(merged, original);
}

#[test]
fn test_merge_rejects_wrong_tile_count() {
    let tiles = vec![constant_raster(16, 16, 1); 3];
    let result = merge(&tiles, 2, 2, 16);
    assert!(matches!(
        result,
        Err(TerraprepError::InvalidParameter(_))
    ));
}

#[test]
fn test_merge_rejects_wrong_tile_shape() {
    let mut tiles = vec![constant_raster(16, 16, 1); 4];
    tiles[2] = constant_raster(8, 16, 1);
    let result = merge(&tiles, 2, 2, 16);
    assert!(matches!(
        result,
        Err(TerraprepError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_merge_places_tiles_row_major() {
    let tiles = vec![
        constant_raster(4, 4, 1),
        constant_raster(4, 4, 2),
        constant_raster(4, 4, 3),
        constant_raster(4, 4, 4),
    ];
    let merged = merge(&tiles, 2, 2, 4).unwrap();
    assert_eq!(merged.dimensions(), (8, 8));
    assert_eq!(merged.data[[0, 0]], 1);
    assert_eq!(merged.data[[0, 7]], 2);
    assert_eq!(merged.data[[7, 0]], 3);
    assert_eq!(merged.data[[7, 7]], 4);
}

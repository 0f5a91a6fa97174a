//! Tool configuration, loadable from TOML. Explicit CLI flags always win
//! over config values; config values win over built-in defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_MASK_MIN_AREA, DEFAULT_MASK_THRESHOLD, DEFAULT_SHIFT_RANGE, DEFAULT_TILE_SIZE,
    DEFAULT_WINDOW_ORIGIN, DEFAULT_WINDOW_SIZE,
};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub align: AlignParams,
    #[serde(default)]
    pub mask: MaskParams,
    #[serde(default)]
    pub tiles: TileParams,
}

/// Defaults for the shift search.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignParams {
    /// Comparison window origin X in the reference raster.
    pub start_x: usize,
    /// Comparison window origin Y in the reference raster.
    pub start_y: usize,
    /// Side of the square comparison window, in pixels.
    pub window_size: usize,
    /// Maximum displacement searched in each direction.
    pub shift_range: u32,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            start_x: DEFAULT_WINDOW_ORIGIN,
            start_y: DEFAULT_WINDOW_ORIGIN,
            window_size: DEFAULT_WINDOW_SIZE,
            shift_range: DEFAULT_SHIFT_RANGE,
        }
    }
}

/// Defaults for mask cleaning.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskParams {
    /// Samples strictly above this become foreground.
    pub threshold: u16,
    /// Minimum component area kept, in pixels.
    pub min_area: usize,
}

impl Default for MaskParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MASK_THRESHOLD,
            min_area: DEFAULT_MASK_MIN_AREA,
        }
    }
}

/// Defaults for dataset tiling.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TileParams {
    /// Tile side in pixels.
    pub tile_size: usize,
}

impl Default for TileParams {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

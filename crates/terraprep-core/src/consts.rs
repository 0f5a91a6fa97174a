//! Shared constants.

/// Minimum pixel count before per-row operations switch to Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Minimum total work (candidates times window pixels) before the shift
/// search evaluates candidates in parallel.
pub const PARALLEL_SEARCH_THRESHOLD: usize = 1_048_576;

/// Default origin of the square comparison window, both axes.
pub const DEFAULT_WINDOW_ORIGIN: usize = 5_000;

/// Default side of the square comparison window, in pixels.
pub const DEFAULT_WINDOW_SIZE: usize = 6_000;

/// Default maximum displacement searched in each direction.
pub const DEFAULT_SHIFT_RANGE: u32 = 20;

/// Default mask threshold: samples strictly above become foreground.
pub const DEFAULT_MASK_THRESHOLD: u16 = 150;

/// Default minimum component area kept by the mask filter, in pixels.
pub const DEFAULT_MASK_MIN_AREA: usize = 900;

/// Default side of a dataset tile, in pixels.
pub const DEFAULT_TILE_SIZE: usize = 256;

/// Foreground sample value of binary masks.
pub const MASK_FOREGROUND: u16 = 255;

/// Prediction samples strictly above this are zeroed before binarization.
pub const PREDICTION_SATURATION_CUTOFF: u16 = 253;

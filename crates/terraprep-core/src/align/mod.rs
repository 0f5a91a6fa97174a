//! Pixel-shift registration: exhaustive window search plus shift application.

pub mod mse;
pub mod search;
pub mod shift;

pub use mse::{mse, mse_rasters};
pub use search::{
    find_best_shift, find_best_shift_with_progress, Candidate, SearchParams, SearchReport,
};
pub use shift::{register, shift_raster};

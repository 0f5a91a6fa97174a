//! Binary mask handling: thresholding, connected components, area filter.

pub mod components;
pub mod filter;

pub use components::{label_components, ComponentStats};
pub use filter::{
    binarize, filter_by_area, filter_by_area_with_components, normalize_prediction,
    MaskFilterStats,
};

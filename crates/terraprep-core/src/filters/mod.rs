//! Radiometric filters: histogram operations, blur, and sharpening.

pub mod gaussian_blur;
pub mod histogram;
pub mod unsharp_mask;

pub use gaussian_blur::gaussian_blur;
pub use histogram::{equalize, match_histograms};
pub use unsharp_mask::unsharp_mask;

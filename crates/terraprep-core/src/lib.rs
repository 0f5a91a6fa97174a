//! Core library for terraprep: preprocessing of satellite image pairs
//! for change detection.
//!
//! The centerpiece is the exhaustive pixel-shift search in [`align`],
//! which registers two acquisitions of the same scene by minimizing mean
//! squared error over a comparison window. Around it sit the supporting
//! stages: radiometric [`filters`], binary [`mask`] cleaning, dataset
//! [`tiles`], and raster [`io`] with georeferencing sidecars.

pub mod error;

pub mod consts;
pub mod raster;

pub mod align;
pub mod filters;
pub mod geo;
pub mod mask;
pub mod tiles;

pub mod config;
pub mod io;

//! Coherent noise for elevation
//!
//! A seeded 2D simplex field and the fractal accumulator layered on top of it.

mod fbm;
mod simplex;

pub use fbm::{normalization, FbmSettings, FractalAccumulator};
pub use simplex::NoiseField;

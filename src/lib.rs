//! Procedural planet surface textures
//!
//! A standalone library for generating seeded color and relief maps of
//! planet surfaces, suitable for wrapping onto a sphere in any engine
//! (Bevy, Godot, wgpu, etc.)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use planet_texture::*;
//!
//! // Describe the planet
//! let params = TextureParamsBuilder::new()
//!     .seed(42)
//!     .resolution(1024).unwrap()
//!     .octaves(6).unwrap()
//!     .build().unwrap();
//!
//! // Generate the albedo and bump maps
//! let textures = PlanetTextures::generate(&params).unwrap();
//! println!(
//!     "Generated {}x{} maps",
//!     textures.map.width(),
//!     textures.map.height()
//! );
//! ```
//!
//! # Pipeline
//!
//! `SeededRandom` shuffles the permutation table of a `NoiseField`, a
//! `FractalAccumulator` layers octaves of it into an elevation per pixel,
//! a `BiomeClassifier` turns elevation into color, and the rasterizer writes
//! both maps which are finally wrapped as `PlanetTextures`.
//!
//! Noise is sampled on the flat equirectangular projection, so features
//! stretch toward the poles.
//!
//! # Features
//!
//! - `parallel` (default): Rasterizes rows across a rayon thread pool
//! - `serde`: Enables serialization support for parameters and palettes

// Modules
pub mod error;
pub mod config;
pub mod random;
pub mod noise;
pub mod biome;
pub mod raster;
pub mod texture;
pub mod cache;

// Re-export core types for convenience
pub use error::{TextureError, Result};
pub use config::{TextureParams, TextureParamsBuilder, MAX_OCTAVES, MIN_RESOLUTION};
pub use random::SeededRandom;
pub use noise::{NoiseField, FractalAccumulator, FbmSettings};
pub use biome::{BiomeClassifier, BiomePalette, ColorMapper, SurfaceBand, SurfaceColor, hex_color};
pub use raster::{
    generate, generate_with_cancel, generate_with_mapper, CancelToken, ColorMapBuffer,
    ReliefMapBuffer, SurfaceMaps,
};
pub use texture::{
    assemble, ColorSpace, ColorTexture, PlanetTextures, ReliefTexture, SurfaceTexture,
};
pub use cache::{TextureCache, TextureKey};

// Re-export the image crate so callers can name the texture buffer types
pub use image;

//! Texture generation parameters and builder
//!
//! This module provides the parameter block for deterministic planet texture
//! generation. The same parameters always produce the identical pair of maps.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::biome::{BiomePalette, SurfaceColor};
use crate::error::{Result, TextureError};

/// Smallest accepted resolution (the relief map needs at least one row)
pub const MIN_RESOLUTION: u32 = 2;

/// Largest accepted octave count
///
/// Bounds the per-pixel cost and keeps the `2^(1 - octaves)` exponent in
/// i32. The noise sampler wraps coordinates of any magnitude, so the top
/// octaves stay well defined even after the frequency has left the i32 range.
pub const MAX_OCTAVES: u32 = 32;

/// Parameters for deterministic planet texture generation
///
/// Only the seed is required; everything else has a default tuned for a
/// 512x256 equirectangular map with earth-like coverage.
///
/// # Example
///
/// ```rust
/// use planet_texture::*;
///
/// let params = TextureParams::with_seed(42);
/// assert_eq!(params.width(), 512);
/// assert_eq!(params.height(), 256);
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&params).unwrap();
/// let restored: TextureParams = serde_json::from_str(&json).unwrap();
/// assert_eq!(params, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureParams {
    /// Seed for the noise field
    pub seed: u32,

    /// Image width in pixels; the height is `resolution / 2`
    pub resolution: u32,

    /// Spatial period of the base noise octave in pixels
    ///
    /// Smaller values give smaller continents.
    pub scale: f32,

    /// Number of fBm layers
    pub octaves: u32,

    /// Amplitude multiplier per octave, in (0, 1]
    pub persistence: f32,

    /// Frequency multiplier per octave, at least 1
    pub lacunarity: f32,

    /// Elevation below which the surface is water
    pub water_level: f32,

    /// Elevation below which the surface is sand
    pub sand_level: f32,

    /// Elevation below which the surface is grass; above it is rock and snow
    pub grass_level: f32,

    /// Band colors
    pub palette: BiomePalette,
}

impl TextureParams {
    /// Default parameters with the given seed
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            resolution: 512,
            scale: 50.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            water_level: 0.3,
            sand_level: 0.4,
            grass_level: 0.6,
            palette: BiomePalette::default(),
        }
    }

    /// Width of both maps in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.resolution
    }

    /// Height of both maps in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.resolution / 2
    }

    /// Whether `water_level < sand_level < grass_level` holds
    pub fn thresholds_ordered(&self) -> bool {
        self.water_level < self.sand_level && self.sand_level < self.grass_level
    }

    /// Check every parameter range
    ///
    /// Thresholds out of order are accepted: the classifier resolves them by
    /// taking the first matching band.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_resolution(self.resolution)?;
        check_scale(self.scale)?;
        check_octaves(self.octaves)?;
        check_persistence(self.persistence)?;
        check_lacunarity(self.lacunarity)?;
        check_level("water_level", self.water_level)?;
        check_level("sand_level", self.sand_level)?;
        check_level("grass_level", self.grass_level)?;
        Ok(())
    }
}

fn check_resolution(resolution: u32) -> Result<()> {
    if resolution < MIN_RESOLUTION {
        return Err(TextureError::InvalidParameter(format!(
            "resolution must be >= {} (got {})",
            MIN_RESOLUTION, resolution
        )));
    }
    Ok(())
}

fn check_scale(scale: f32) -> Result<()> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(TextureError::InvalidParameter(format!(
            "scale must be positive and finite (got {})",
            scale
        )));
    }
    Ok(())
}

fn check_octaves(octaves: u32) -> Result<()> {
    if !(1..=MAX_OCTAVES).contains(&octaves) {
        return Err(TextureError::InvalidParameter(format!(
            "octaves must be in 1..={} (got {})",
            MAX_OCTAVES, octaves
        )));
    }
    Ok(())
}

fn check_persistence(persistence: f32) -> Result<()> {
    if !(persistence > 0.0 && persistence <= 1.0) {
        return Err(TextureError::InvalidParameter(format!(
            "persistence must be in (0, 1] (got {})",
            persistence
        )));
    }
    Ok(())
}

fn check_lacunarity(lacunarity: f32) -> Result<()> {
    if !(lacunarity.is_finite() && lacunarity >= 1.0) {
        return Err(TextureError::InvalidParameter(format!(
            "lacunarity must be finite and >= 1 (got {})",
            lacunarity
        )));
    }
    Ok(())
}

fn check_level(name: &str, level: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&level) {
        return Err(TextureError::InvalidParameter(format!(
            "{} must be in [0, 1] (got {})",
            name, level
        )));
    }
    Ok(())
}

/// Builder for creating TextureParams with validation
///
/// # Example
///
/// ```rust
/// use planet_texture::*;
///
/// let params = TextureParamsBuilder::new()
///     .seed(12345)
///     .resolution(256)
///     .unwrap()
///     .octaves(6)
///     .unwrap()
///     .grass(hex_color(0x2e7d32))
///     .build()
///     .unwrap();
///
/// assert_eq!(params.height(), 128);
/// ```
#[derive(Debug, Clone)]
pub struct TextureParamsBuilder {
    seed: Option<u32>,
    params: TextureParams,
}

impl TextureParamsBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - resolution: 512 (512x256 maps)
    /// - scale: 50
    /// - octaves: 4, persistence: 0.5, lacunarity: 2.0
    /// - water/sand/grass levels: 0.3 / 0.4 / 0.6
    /// - palette: `BiomePalette::default()`
    pub fn new() -> Self {
        Self {
            seed: None,
            params: TextureParams::with_seed(0),
        }
    }

    /// Set the seed
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the image width (the height is half of it)
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if resolution < 2
    pub fn resolution(mut self, resolution: u32) -> Result<Self> {
        check_resolution(resolution)?;
        self.params.resolution = resolution;
        Ok(self)
    }

    /// Set the spatial period of the base octave
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if scale is not positive and finite
    pub fn scale(mut self, scale: f32) -> Result<Self> {
        check_scale(scale)?;
        self.params.scale = scale;
        Ok(self)
    }

    /// Set the number of fBm octaves
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if octaves is 0 or above `MAX_OCTAVES`
    pub fn octaves(mut self, octaves: u32) -> Result<Self> {
        check_octaves(octaves)?;
        self.params.octaves = octaves;
        Ok(self)
    }

    /// Set the amplitude falloff per octave
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if persistence is outside (0, 1]
    pub fn persistence(mut self, persistence: f32) -> Result<Self> {
        check_persistence(persistence)?;
        self.params.persistence = persistence;
        Ok(self)
    }

    /// Set the frequency growth per octave
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if lacunarity < 1
    pub fn lacunarity(mut self, lacunarity: f32) -> Result<Self> {
        check_lacunarity(lacunarity)?;
        self.params.lacunarity = lacunarity;
        Ok(self)
    }

    /// Set the three band thresholds at once
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if any level is outside [0, 1]
    pub fn levels(mut self, water: f32, sand: f32, grass: f32) -> Result<Self> {
        check_level("water_level", water)?;
        check_level("sand_level", sand)?;
        check_level("grass_level", grass)?;
        self.params.water_level = water;
        self.params.sand_level = sand;
        self.params.grass_level = grass;
        Ok(self)
    }

    /// Replace the whole palette
    pub fn palette(mut self, palette: BiomePalette) -> Self {
        self.params.palette = palette;
        self
    }

    pub fn deep_water(mut self, color: SurfaceColor) -> Self {
        self.params.palette.deep_water = color;
        self
    }

    pub fn shallow_water(mut self, color: SurfaceColor) -> Self {
        self.params.palette.shallow_water = color;
        self
    }

    pub fn sand(mut self, color: SurfaceColor) -> Self {
        self.params.palette.sand = color;
        self
    }

    pub fn grass(mut self, color: SurfaceColor) -> Self {
        self.params.palette.grass = color;
        self
    }

    pub fn rock(mut self, color: SurfaceColor) -> Self {
        self.params.palette.rock = color;
        self
    }

    pub fn snow(mut self, color: SurfaceColor) -> Self {
        self.params.palette.snow = color;
        self
    }

    /// Build the parameters
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<TextureParams> {
        let params = TextureParams {
            seed: self.seed.unwrap_or_else(rand::random),
            ..self.params
        };
        params.validate()?;

        if !params.thresholds_ordered() {
            log::warn!(
                "band thresholds are not increasing (water {}, sand {}, grass {}); some bands will be skipped",
                params.water_level,
                params.sand_level,
                params.grass_level
            );
        }

        Ok(params)
    }
}

impl Default for TextureParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

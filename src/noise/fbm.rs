//! Fractal Brownian Motion over the simplex field

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::simplex::NoiseField;
use crate::config::TextureParams;

/// Octave settings for fBm accumulation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FbmSettings {
    /// Number of octaves
    pub octaves: u32,
    /// Amplitude decay per octave
    pub persistence: f32,
    /// Frequency multiplier per octave
    pub lacunarity: f32,
    /// Spatial period of the first octave, in pixels
    pub scale: f32,
}

impl Default for FbmSettings {
    fn default() -> Self {
        Self {
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 50.0,
        }
    }
}

impl From<&TextureParams> for FbmSettings {
    fn from(params: &TextureParams) -> Self {
        Self {
            octaves: params.octaves,
            persistence: params.persistence,
            lacunarity: params.lacunarity,
            scale: params.scale,
        }
    }
}

/// Divisor that maps the octave sum back to about [-1, 1]
///
/// Formula: 2 - 2^(1 - octaves), the geometric series limit for a falloff of
/// one half. Every band threshold is calibrated against this constant.
#[inline]
pub fn normalization(octaves: u32) -> f32 {
    2.0 - 2.0_f32.powi(1 - octaves as i32)
}

/// Layered noise producing per-pixel elevation
///
/// # Example
///
/// ```rust
/// use planet_texture::*;
///
/// let fbm = FractalAccumulator::new(NoiseField::new(42), FbmSettings::default());
/// let e = fbm.elevation(0.25, 0.5, 512.0, 256.0);
/// assert!((0.0..=1.0).contains(&e));
/// ```
#[derive(Debug, Clone)]
pub struct FractalAccumulator {
    noise: NoiseField,
    settings: FbmSettings,
}

impl FractalAccumulator {
    pub fn new(noise: NoiseField, settings: FbmSettings) -> Self {
        Self { noise, settings }
    }

    /// Raw octave sum at normalized coordinates `(u, v)`
    ///
    /// `width` and `height` are the image dimensions; together with `scale`
    /// they set how many base-octave periods span the image.
    pub fn raw(&self, u: f32, v: f32, width: f32, height: f32) -> f32 {
        let FbmSettings {
            octaves,
            persistence,
            lacunarity,
            scale,
        } = self.settings;

        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;

        for _ in 0..octaves {
            let nx = u * frequency * (width / scale);
            let ny = v * frequency * (height / scale);
            total += self.noise.sample(nx, ny) * amplitude;

            amplitude *= persistence;
            frequency *= lacunarity;
        }

        total
    }

    /// Elevation in [0, 1] at normalized coordinates `(u, v)`
    pub fn elevation(&self, u: f32, v: f32, width: f32, height: f32) -> f32 {
        let normalized = self.raw(u, v, width, height) / normalization(self.settings.octaves);
        (normalized * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

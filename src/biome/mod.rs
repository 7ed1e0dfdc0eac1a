//! Elevation banding and surface colors
//!
//! Maps a normalized elevation to one of four bands and to an 8-bit color.

mod palette;

pub use palette::{hex_color, lerp_color, BiomePalette, SurfaceColor};

use crate::config::TextureParams;

/// Surface bands in ascending elevation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurfaceBand {
    /// Ocean, blending deep to shallow water
    Water,
    /// Beach
    Sand,
    /// Grassland
    Grass,
    /// Rock blending into snow at the peaks
    Highland,
}

impl SurfaceBand {
    /// Check if this band is water
    pub fn is_water(&self) -> bool {
        matches!(self, SurfaceBand::Water)
    }

    /// Check if this band is land
    pub fn is_land(&self) -> bool {
        !self.is_water()
    }
}

/// Trait for mapping elevation to a surface color
pub trait ColorMapper {
    /// Map an elevation in [0, 1] to an RGB color
    fn map_color(&self, elevation: f32) -> SurfaceColor;
}

/// Threshold classifier turning elevation into biome colors
///
/// Bands are checked in ascending order and the first match wins, so
/// thresholds that are out of order simply hide the bands they overlap.
///
/// # Example
///
/// ```rust
/// use planet_texture::*;
///
/// let classifier = BiomeClassifier::from_params(&TextureParams::with_seed(0));
/// assert_eq!(classifier.band_for(0.1), SurfaceBand::Water);
/// assert_eq!(classifier.color_for(0.5), hex_color(0x228b22));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeClassifier {
    pub water_level: f32,
    pub sand_level: f32,
    pub grass_level: f32,
    pub palette: BiomePalette,
}

impl Default for BiomeClassifier {
    fn default() -> Self {
        Self {
            water_level: 0.3,
            sand_level: 0.4,
            grass_level: 0.6,
            palette: BiomePalette::default(),
        }
    }
}

impl BiomeClassifier {
    pub fn from_params(params: &TextureParams) -> Self {
        Self {
            water_level: params.water_level,
            sand_level: params.sand_level,
            grass_level: params.grass_level,
            palette: params.palette,
        }
    }

    /// Band containing `elevation`
    pub fn band_for(&self, elevation: f32) -> SurfaceBand {
        if elevation < self.water_level {
            SurfaceBand::Water
        } else if elevation < self.sand_level {
            SurfaceBand::Sand
        } else if elevation < self.grass_level {
            SurfaceBand::Grass
        } else {
            SurfaceBand::Highland
        }
    }

    /// Depth blend factor inside the water band: 0 at the floor, 1 at the shore
    fn water_ratio(&self, elevation: f32) -> f32 {
        if self.water_level > 0.0 {
            elevation / self.water_level
        } else {
            1.0
        }
    }

    /// Snow blend factor inside the highland band, eased quadratically
    fn snow_ratio(&self, elevation: f32) -> f32 {
        let span = 1.0 - self.grass_level;
        let ratio = if span > 0.0 {
            ((elevation - self.grass_level) / span).min(1.0)
        } else {
            0.0
        };
        ratio * ratio
    }

    /// Color for `elevation`
    pub fn color_for(&self, elevation: f32) -> SurfaceColor {
        let palette = &self.palette;
        match self.band_for(elevation) {
            SurfaceBand::Water => lerp_color(
                palette.deep_water,
                palette.shallow_water,
                self.water_ratio(elevation),
            ),
            SurfaceBand::Sand => palette.sand,
            SurfaceBand::Grass => palette.grass,
            SurfaceBand::Highland => {
                lerp_color(palette.rock, palette.snow, self.snow_ratio(elevation))
            }
        }
    }
}

impl ColorMapper for BiomeClassifier {
    fn map_color(&self, elevation: f32) -> SurfaceColor {
        self.color_for(elevation)
    }
}

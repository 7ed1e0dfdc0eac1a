//! Surface color palettes

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::Vec3;

/// 8-bit RGB color
pub type SurfaceColor = [u8; 3];

/// Build a color from a `0xRRGGBB` value
#[inline]
pub const fn hex_color(hex: u32) -> SurfaceColor {
    [
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    ]
}

/// Interpolate between two colors channel by channel
///
/// `t` is clamped to [0, 1]; results are rounded to the nearest 8-bit value.
pub fn lerp_color(from: SurfaceColor, to: SurfaceColor, t: f32) -> SurfaceColor {
    let a = Vec3::new(from[0] as f32, from[1] as f32, from[2] as f32);
    let b = Vec3::new(to[0] as f32, to[1] as f32, to[2] as f32);
    let c = a.lerp(b, t.clamp(0.0, 1.0)).round().clamp(Vec3::ZERO, Vec3::splat(255.0));
    [c.x as u8, c.y as u8, c.z as u8]
}

/// The six colors used by the biome bands
///
/// Water blends from `deep_water` to `shallow_water`, sand and grass are flat,
/// and highlands blend from `rock` to `snow`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BiomePalette {
    pub deep_water: SurfaceColor,
    pub shallow_water: SurfaceColor,
    pub sand: SurfaceColor,
    pub grass: SurfaceColor,
    pub rock: SurfaceColor,
    pub snow: SurfaceColor,
}

impl Default for BiomePalette {
    fn default() -> Self {
        Self {
            deep_water: hex_color(0x00004d),
            shallow_water: hex_color(0x001f7e),
            sand: hex_color(0xc2b280),
            grass: hex_color(0x228b22),
            rock: hex_color(0x808080),
            snow: hex_color(0xffffff),
        }
    }
}

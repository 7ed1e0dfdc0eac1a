//! Texture assembly
//!
//! Wraps raw surface maps into `image` buffers tagged with the color space a
//! renderer should sample them in.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use image::{DynamicImage, GrayImage, ImageBuffer, Pixel, RgbImage};

use crate::config::TextureParams;
use crate::error::{Result, TextureError};
use crate::raster::{self, CancelToken, SurfaceMaps};

/// How texel values are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorSpace {
    /// Perceptual sRGB encoding; decode to linear before lighting
    Srgb,
    /// Values are used as-is
    Linear,
}

/// An image plus its color space tag
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceTexture<I> {
    image: I,
    color_space: ColorSpace,
}

impl<I> SurfaceTexture<I> {
    pub fn new(image: I, color_space: ColorSpace) -> Self {
        Self { image, color_space }
    }

    #[inline]
    pub fn image(&self) -> &I {
        &self.image
    }

    #[inline]
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    pub fn into_image(self) -> I {
        self.image
    }
}

impl<P: Pixel> SurfaceTexture<ImageBuffer<P, Vec<P::Subpixel>>> {
    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Albedo map, sRGB encoded
pub type ColorTexture = SurfaceTexture<RgbImage>;

/// Relief (bump) map, linear intensity
pub type ReliefTexture = SurfaceTexture<GrayImage>;

impl ReliefTexture {
    /// Expand to an RGB image with equal channels
    pub fn to_rgb(&self) -> RgbImage {
        DynamicImage::ImageLuma8(self.image.clone()).into_rgb8()
    }
}

/// The texture pair for one planet
///
/// # Example
///
/// ```rust
/// use planet_texture::*;
///
/// let params = TextureParamsBuilder::new()
///     .seed(7)
///     .resolution(32)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let textures = PlanetTextures::generate(&params).unwrap();
/// assert_eq!(textures.map.color_space(), ColorSpace::Srgb);
/// assert_eq!(textures.bump_map.color_space(), ColorSpace::Linear);
/// assert_eq!(textures.map.width(), 32);
/// assert_eq!(textures.bump_map.height(), 16);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetTextures {
    pub map: ColorTexture,
    pub bump_map: ReliefTexture,
}

impl PlanetTextures {
    /// Rasterize and assemble in one call
    pub fn generate(params: &TextureParams) -> Result<Self> {
        assemble(raster::generate(params)?)
    }

    /// Like `generate`, stopping with `Cancelled` once `cancel` fires
    pub fn generate_with_cancel(params: &TextureParams, cancel: &CancelToken) -> Result<Self> {
        assemble(raster::generate_with_cancel(params, cancel)?)
    }
}

/// Wrap surface maps into textures
///
/// # Errors
///
/// Returns `GenerationFailed` if a buffer does not match its dimensions.
pub fn assemble(maps: SurfaceMaps) -> Result<PlanetTextures> {
    let (width, height) = (maps.width(), maps.height());
    let (color, relief) = maps.into_parts();

    let map = RgbImage::from_raw(width, height, color.into_raw()).ok_or_else(|| {
        TextureError::GenerationFailed(format!("color map does not fit {}x{}", width, height))
    })?;
    let bump_map = GrayImage::from_raw(width, height, relief.into_raw()).ok_or_else(|| {
        TextureError::GenerationFailed(format!("relief map does not fit {}x{}", width, height))
    })?;

    Ok(PlanetTextures {
        map: SurfaceTexture::new(map, ColorSpace::Srgb),
        bump_map: SurfaceTexture::new(bump_map, ColorSpace::Linear),
    })
}

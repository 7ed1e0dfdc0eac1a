//! Surface rasterization
//!
//! Drives the pixel loop: each pixel's normalized coordinates go through the
//! fractal accumulator, and the resulting elevation is written as a color into
//! the color map and as an intensity into the relief map. Both maps are
//! row-major, top to bottom.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::biome::{BiomeClassifier, ColorMapper, SurfaceColor};
use crate::config::TextureParams;
use crate::error::{Result, TextureError};
use crate::noise::{FbmSettings, FractalAccumulator, NoiseField};

/// Bytes per pixel in the color map
const COLOR_CHANNELS: usize = 3;

/// Row-major RGB8 color map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMapBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ColorMapBuffer {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at `(x, y)`, or `None` outside the map
    pub fn pixel(&self, x: u32, y: u32) -> Option<SurfaceColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * COLOR_CHANNELS;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Raw bytes, three per pixel
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// Row-major single-channel relief map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReliefMapBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ReliefMapBuffer {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intensity at `(x, y)`, or `None` outside the map
    pub fn intensity(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// Intensity at `(x, y)` as an equal-valued grey triple
    pub fn grey(&self, x: u32, y: u32) -> Option<SurfaceColor> {
        self.intensity(x, y).map(|i| [i, i, i])
    }

    /// Raw bytes, one per pixel
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// The color and relief maps produced by one generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceMaps {
    pub color: ColorMapBuffer,
    pub relief: ReliefMapBuffer,
}

impl SurfaceMaps {
    #[inline]
    pub fn width(&self) -> u32 {
        self.color.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.color.height
    }

    pub fn into_parts(self) -> (ColorMapBuffer, ReliefMapBuffer) {
        (self.color, self.relief)
    }
}

/// Cooperative cancellation for long generations
///
/// Clones share the same flag, so a token handed to another thread can stop
/// a generation in progress. The pixel loop polls the token once per row.
///
/// # Example
///
/// ```rust
/// use planet_texture::*;
///
/// let token = CancelToken::new();
/// token.cancel();
///
/// let result = generate_with_cancel(&TextureParams::with_seed(1), &token);
/// assert_eq!(result.unwrap_err(), TextureError::Cancelled);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that also fires once `timeout` has elapsed from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            flag: Arc::default(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

#[inline]
fn check_cancel(cancel: Option<&CancelToken>) -> Result<()> {
    match cancel {
        Some(token) if token.is_cancelled() => Err(TextureError::Cancelled),
        _ => Ok(()),
    }
}

/// Zeroed buffer, failing instead of aborting when memory is short
fn allocate(len: usize, what: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|e| {
        TextureError::ResourceUnavailable(format!(
            "cannot allocate {} bytes for the {}: {}",
            len, what, e
        ))
    })?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Per-call state shared read-only by every row
struct Rasterizer<'a, C> {
    fbm: FractalAccumulator,
    mapper: &'a C,
    width: u32,
    height: u32,
}

impl<C: ColorMapper> Rasterizer<'_, C> {
    fn fill_row(&self, y: u32, color_row: &mut [u8], relief_row: &mut [u8]) {
        let width = self.width as f32;
        let height = self.height as f32;
        let v = y as f32 / height;

        for (x, (rgb, relief)) in color_row
            .chunks_exact_mut(COLOR_CHANNELS)
            .zip(relief_row.iter_mut())
            .enumerate()
        {
            let u = x as f32 / width;
            let elevation = self.fbm.elevation(u, v, width, height);

            rgb.copy_from_slice(&self.mapper.map_color(elevation));
            *relief = (elevation * 255.0).floor() as u8;
        }
    }

    #[cfg(any(test, not(feature = "parallel")))]
    fn fill_sequential(
        &self,
        color: &mut [u8],
        relief: &mut [u8],
        cancel: Option<&CancelToken>,
    ) -> Result<()> {
        let row_bytes = self.width as usize * COLOR_CHANNELS;
        color
            .chunks_mut(row_bytes)
            .zip(relief.chunks_mut(self.width as usize))
            .enumerate()
            .try_for_each(|(y, (color_row, relief_row))| {
                check_cancel(cancel)?;
                self.fill_row(y as u32, color_row, relief_row);
                Ok(())
            })
    }

    #[cfg(feature = "parallel")]
    fn fill_parallel(
        &self,
        color: &mut [u8],
        relief: &mut [u8],
        cancel: Option<&CancelToken>,
    ) -> Result<()>
    where
        C: Sync,
    {
        use rayon::prelude::*;

        let row_bytes = self.width as usize * COLOR_CHANNELS;
        color
            .par_chunks_mut(row_bytes)
            .zip(relief.par_chunks_mut(self.width as usize))
            .enumerate()
            .try_for_each(|(y, (color_row, relief_row))| {
                check_cancel(cancel)?;
                self.fill_row(y as u32, color_row, relief_row);
                Ok(())
            })
    }
}

fn rasterize<C>(
    params: &TextureParams,
    mapper: &C,
    cancel: Option<&CancelToken>,
) -> Result<SurfaceMaps>
where
    C: ColorMapper + Sync,
{
    params.validate()?;
    check_cancel(cancel)?;

    let width = params.width();
    let height = params.height();
    let pixels = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| {
            TextureError::ResourceUnavailable(format!("{}x{} pixels overflow usize", width, height))
        })?;
    let color_len = pixels.checked_mul(COLOR_CHANNELS).ok_or_else(|| {
        TextureError::ResourceUnavailable(format!("{}x{} color map overflows usize", width, height))
    })?;

    let started = Instant::now();
    log::debug!(
        "rasterizing {}x{} surface maps (seed {}, {} octaves)",
        width,
        height,
        params.seed,
        params.octaves
    );

    let mut color = allocate(color_len, "color map")?;
    let mut relief = allocate(pixels, "relief map")?;

    let raster = Rasterizer {
        fbm: FractalAccumulator::new(NoiseField::new(params.seed), FbmSettings::from(params)),
        mapper,
        width,
        height,
    };

    #[cfg(feature = "parallel")]
    raster.fill_parallel(&mut color, &mut relief, cancel)?;
    #[cfg(not(feature = "parallel"))]
    raster.fill_sequential(&mut color, &mut relief, cancel)?;

    log::debug!(
        "rasterized {}x{} surface maps in {:?}",
        width,
        height,
        started.elapsed()
    );

    Ok(SurfaceMaps {
        color: ColorMapBuffer {
            width,
            height,
            data: color,
        },
        relief: ReliefMapBuffer {
            width,
            height,
            data: relief,
        },
    })
}

/// Generate the color and relief maps for `params`
///
/// A pure function of `params`: repeated calls return identical buffers.
///
/// # Errors
///
/// - `InvalidParameter` if `params` fails validation
/// - `ResourceUnavailable` if the buffers cannot be allocated
///
/// # Example
///
/// ```rust
/// use planet_texture::*;
///
/// let params = TextureParamsBuilder::new()
///     .seed(42)
///     .resolution(4)
///     .unwrap()
///     .octaves(1)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let maps = generate(&params).unwrap();
/// assert_eq!((maps.width(), maps.height()), (4, 2));
/// ```
pub fn generate(params: &TextureParams) -> Result<SurfaceMaps> {
    let classifier = BiomeClassifier::from_params(params);
    rasterize(params, &classifier, None)
}

/// Generate with a custom elevation-to-color mapping
///
/// The relief map is unaffected by the mapper.
pub fn generate_with_mapper<C>(params: &TextureParams, mapper: &C) -> Result<SurfaceMaps>
where
    C: ColorMapper + Sync,
{
    rasterize(params, mapper, None)
}

/// Generate, giving up with `Cancelled` once `cancel` fires
pub fn generate_with_cancel(params: &TextureParams, cancel: &CancelToken) -> Result<SurfaceMaps> {
    let classifier = BiomeClassifier::from_params(params);
    rasterize(params, &classifier, Some(cancel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TextureParamsBuilder, MAX_OCTAVES};

    fn small_params(seed: u32) -> TextureParams {
        TextureParamsBuilder::new()
            .seed(seed)
            .resolution(64)
            .unwrap()
            .scale(16.0)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_minimal_map() {
        let params = TextureParamsBuilder::new()
            .seed(42)
            .resolution(4)
            .unwrap()
            .octaves(1)
            .unwrap()
            .build()
            .unwrap();

        let maps = generate(&params).unwrap();
        assert_eq!(maps.color.width(), 4);
        assert_eq!(maps.color.height(), 2);
        assert_eq!(maps.relief.width(), 4);
        assert_eq!(maps.relief.height(), 2);
        assert_eq!(maps.color.as_raw().len(), 4 * 2 * 3);
        assert_eq!(maps.relief.as_raw().len(), 4 * 2);
    }

    #[test]
    fn test_dimensions_follow_resolution() {
        for resolution in [2, 3, 10, 33, 128] {
            let mut params = small_params(1);
            params.resolution = resolution;
            let maps = generate(&params).unwrap();
            assert_eq!(maps.width(), resolution);
            assert_eq!(maps.height(), resolution / 2);
            assert_eq!(
                maps.color.as_raw().len(),
                (resolution * (resolution / 2) * 3) as usize
            );
        }
    }

    #[test]
    fn test_determinism() {
        let params = TextureParams::with_seed(7);
        let a = generate(&params).unwrap();
        let b = generate(&params).unwrap();
        assert_eq!(a, b, "Same params must produce identical maps");
    }

    #[test]
    fn test_different_seeds() {
        let a = generate(&small_params(42)).unwrap();
        let b = generate(&small_params(999)).unwrap();
        assert_ne!(a.color.as_raw(), b.color.as_raw());
        assert_ne!(a.relief.as_raw(), b.relief.as_raw());
    }

    #[test]
    fn test_many_seed_pairs_differ() {
        let maps: Vec<SurfaceMaps> = (0..8)
            .map(|s| generate(&small_params(s)).unwrap())
            .collect();
        for i in 0..maps.len() {
            for j in (i + 1)..maps.len() {
                assert_ne!(maps[i].relief, maps[j].relief, "seeds {} and {} collide", i, j);
            }
        }
    }

    #[test]
    fn test_pixels_match_pipeline() {
        let params = small_params(11);
        let maps = generate(&params).unwrap();

        let fbm = FractalAccumulator::new(NoiseField::new(11), FbmSettings::from(&params));
        let classifier = BiomeClassifier::from_params(&params);
        let (w, h) = (params.width() as f32, params.height() as f32);

        for (x, y) in [(0, 0), (5, 3), (63, 31), (40, 17)] {
            let e = fbm.elevation(x as f32 / w, y as f32 / h, w, h);
            assert_eq!(maps.color.pixel(x, y), Some(classifier.color_for(e)));
            assert_eq!(maps.relief.intensity(x, y), Some((e * 255.0).floor() as u8));
        }
    }

    #[test]
    fn test_relief_grey_triple() {
        let maps = generate(&small_params(3)).unwrap();
        let i = maps.relief.intensity(10, 10).unwrap();
        assert_eq!(maps.relief.grey(10, 10), Some([i, i, i]));
    }

    #[test]
    fn test_out_of_bounds_lookups() {
        let maps = generate(&small_params(3)).unwrap();
        assert_eq!(maps.color.pixel(64, 0), None);
        assert_eq!(maps.color.pixel(0, 32), None);
        assert_eq!(maps.relief.intensity(64, 0), None);
        assert_eq!(maps.relief.grey(0, 32), None);
    }

    #[test]
    fn test_zero_water_level_has_no_water() {
        let params = TextureParamsBuilder::new()
            .seed(9)
            .resolution(64)
            .unwrap()
            .levels(0.0, 0.4, 0.6)
            .unwrap()
            .build()
            .unwrap();

        let maps = generate(&params).unwrap();
        let classifier = BiomeClassifier::from_params(&params);
        let water: Vec<SurfaceColor> = (0..=100)
            .map(|i| {
                crate::biome::lerp_color(
                    params.palette.deep_water,
                    params.palette.shallow_water,
                    i as f32 / 100.0,
                )
            })
            .collect();

        for y in 0..maps.height() {
            for x in 0..maps.width() {
                let e = maps.relief.intensity(x, y).unwrap() as f32 / 255.0;
                assert!(classifier.band_for(e).is_land());
                let color = maps.color.pixel(x, y).unwrap();
                assert!(!water.contains(&color), "water color at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_zero_octaves_rejected() {
        let mut params = TextureParams::with_seed(1);
        params.octaves = 0;
        match generate(&params) {
            Err(TextureError::InvalidParameter(_)) => {}
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_resolution_rejected() {
        let mut params = TextureParams::with_seed(1);
        params.resolution = 1;
        assert!(matches!(generate(&params), Err(TextureError::InvalidParameter(_))));
    }

    #[test]
    fn test_max_octaves_default_lacunarity() {
        // Top octaves sample far outside the i32 range at lacunarity 2
        let params = TextureParamsBuilder::new()
            .seed(77)
            .resolution(64)
            .unwrap()
            .octaves(MAX_OCTAVES)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(params.lacunarity, 2.0);

        let maps = generate(&params).unwrap();
        assert_eq!((maps.width(), maps.height()), (64, 32));
        assert_eq!(maps, generate(&params).unwrap());

        let fbm = FractalAccumulator::new(NoiseField::new(77), FbmSettings::from(&params));
        let classifier = BiomeClassifier::from_params(&params);
        let (w, h) = (params.width() as f32, params.height() as f32);
        for (x, y) in [(0, 0), (13, 7), (63, 31)] {
            let e = fbm.elevation(x as f32 / w, y as f32 / h, w, h);
            assert!((0.0..=1.0).contains(&e));
            assert_eq!(maps.color.pixel(x, y), Some(classifier.color_for(e)));
            assert_eq!(maps.relief.intensity(x, y), Some((e * 255.0).floor() as u8));
        }
    }

    #[test]
    fn test_large_lacunarity() {
        for (octaves, lacunarity) in [(8, 1e6), (4, 1e12), (MAX_OCTAVES, 64.0)] {
            let params = TextureParamsBuilder::new()
                .seed(5)
                .resolution(32)
                .unwrap()
                .octaves(octaves)
                .unwrap()
                .lacunarity(lacunarity)
                .unwrap()
                .build()
                .unwrap();

            let maps = generate(&params).unwrap();
            assert_eq!(maps.color.as_raw().len(), 32 * 16 * 3);
            assert_eq!(maps.relief.as_raw().len(), 32 * 16);
            assert_eq!(maps, generate(&params).unwrap());
        }
    }

    #[test]
    fn test_custom_mapper() {
        struct Banded;
        impl ColorMapper for Banded {
            fn map_color(&self, elevation: f32) -> SurfaceColor {
                if elevation < 0.5 {
                    [0, 0, 0]
                } else {
                    [255, 255, 255]
                }
            }
        }

        let params = small_params(5);
        let custom = generate_with_mapper(&params, &Banded).unwrap();
        let default = generate(&params).unwrap();

        assert_eq!(custom.relief, default.relief);
        assert!(custom
            .color
            .as_raw()
            .iter()
            .all(|&b| b == 0 || b == 255));
    }

    #[test]
    fn test_sequential_matches_default_path() {
        let params = small_params(21);
        let maps = generate(&params).unwrap();

        let classifier = BiomeClassifier::from_params(&params);
        let raster = Rasterizer {
            fbm: FractalAccumulator::new(NoiseField::new(params.seed), FbmSettings::from(&params)),
            mapper: &classifier,
            width: params.width(),
            height: params.height(),
        };
        let mut color = vec![0; maps.color.as_raw().len()];
        let mut relief = vec![0; maps.relief.as_raw().len()];
        raster.fill_sequential(&mut color, &mut relief, None).unwrap();

        assert_eq!(color, maps.color.as_raw());
        assert_eq!(relief, maps.relief.as_raw());
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancelToken::new();
        token.cancel();
        assert!(token.is_cancelled());
        assert_eq!(
            generate_with_cancel(&small_params(1), &token),
            Err(TextureError::Cancelled)
        );
    }

    #[test]
    fn test_expired_timeout() {
        let token = CancelToken::with_timeout(Duration::ZERO);
        assert!(token.is_cancelled());
        assert_eq!(
            generate_with_cancel(&small_params(1), &token),
            Err(TextureError::Cancelled)
        );
    }

    #[test]
    fn test_uncancelled_token_completes() {
        let token = CancelToken::with_timeout(Duration::from_secs(3600));
        let params = small_params(4);
        let maps = generate_with_cancel(&params, &token).unwrap();
        assert_eq!(maps, generate(&params).unwrap());
    }

    #[test]
    fn test_cancel_shared_between_clones() {
        let token = CancelToken::new();
        let remote = token.clone();
        assert!(!token.is_cancelled());
        remote.cancel();
        assert!(token.is_cancelled());
    }
}

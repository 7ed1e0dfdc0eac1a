//! Caller-side memoization of generated textures
//!
//! Generation is a pure function of `TextureParams`, so a caller that asks for
//! the same planet repeatedly can keep the first result and hand out shared
//! references to it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::biome::BiomePalette;
use crate::config::TextureParams;
use crate::error::Result;
use crate::texture::PlanetTextures;

/// Structural key over every parameter, floats compared by bit pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureKey {
    seed: u32,
    resolution: u32,
    octaves: u32,
    scale: u32,
    persistence: u32,
    lacunarity: u32,
    levels: [u32; 3],
    palette: BiomePalette,
}

impl From<&TextureParams> for TextureKey {
    fn from(params: &TextureParams) -> Self {
        Self {
            seed: params.seed,
            resolution: params.resolution,
            octaves: params.octaves,
            scale: params.scale.to_bits(),
            persistence: params.persistence.to_bits(),
            lacunarity: params.lacunarity.to_bits(),
            levels: [
                params.water_level.to_bits(),
                params.sand_level.to_bits(),
                params.grass_level.to_bits(),
            ],
            palette: params.palette,
        }
    }
}

/// Texture cache keyed by generation parameters
///
/// # Example
///
/// ```rust
/// use planet_texture::*;
/// use std::sync::Arc;
///
/// let mut cache = TextureCache::new();
/// let params = TextureParamsBuilder::new()
///     .seed(3)
///     .resolution(16)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let first = cache.get_or_generate(&params).unwrap();
/// let again = cache.get_or_generate(&params).unwrap();
/// assert!(Arc::ptr_eq(&first, &again));
/// ```
#[derive(Debug, Default)]
pub struct TextureCache {
    entries: HashMap<TextureKey, Arc<PlanetTextures>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached textures for `params`, generating them on a miss
    ///
    /// Failed generations are not cached.
    pub fn get_or_generate(&mut self, params: &TextureParams) -> Result<Arc<PlanetTextures>> {
        let key = TextureKey::from(params);
        if let Some(textures) = self.entries.get(&key) {
            log::trace!("texture cache hit for seed {}", params.seed);
            return Ok(Arc::clone(textures));
        }

        let textures = Arc::new(PlanetTextures::generate(params)?);
        self.entries.insert(key, Arc::clone(&textures));
        Ok(textures)
    }

    pub fn get(&self, params: &TextureParams) -> Option<Arc<PlanetTextures>> {
        self.entries.get(&TextureKey::from(params)).cloned()
    }

    pub fn contains(&self, params: &TextureParams) -> bool {
        self.entries.contains_key(&TextureKey::from(params))
    }

    /// Drop the entry for `params`, returning it if present
    pub fn remove(&mut self, params: &TextureParams) -> Option<Arc<PlanetTextures>> {
        self.entries.remove(&TextureKey::from(params))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::hex_color;
    use crate::config::TextureParamsBuilder;

    fn params(seed: u32) -> TextureParams {
        TextureParamsBuilder::new()
            .seed(seed)
            .resolution(16)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_hit_returns_same_arc() {
        let mut cache = TextureCache::new();
        let a = cache.get_or_generate(&params(1)).unwrap();
        let b = cache.get_or_generate(&params(1)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_changed_params_regenerate() {
        let mut cache = TextureCache::new();
        let base = params(1);
        cache.get_or_generate(&base).unwrap();

        let mut other_seed = base;
        other_seed.seed = 2;
        cache.get_or_generate(&other_seed).unwrap();

        let mut other_scale = base;
        other_scale.scale = 25.0;
        cache.get_or_generate(&other_scale).unwrap();

        let mut other_color = base;
        other_color.palette.grass = hex_color(0x00ff00);
        cache.get_or_generate(&other_color).unwrap();

        assert_eq!(cache.len(), 4);
        assert!(cache.contains(&base));
        assert!(cache.contains(&other_color));
    }

    #[test]
    fn test_key_is_structural() {
        let a = TextureKey::from(&params(9));
        let b = TextureKey::from(&params(9));
        assert_eq!(a, b);

        let mut changed = params(9);
        changed.water_level = 0.31;
        assert_ne!(a, TextureKey::from(&changed));
    }

    #[test]
    fn test_errors_not_cached() {
        let mut cache = TextureCache::new();
        let mut bad = params(1);
        bad.octaves = 0;
        assert!(cache.get_or_generate(&bad).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cache = TextureCache::new();
        cache.get_or_generate(&params(1)).unwrap();
        cache.get_or_generate(&params(2)).unwrap();

        assert!(cache.get(&params(1)).is_some());
        assert!(cache.remove(&params(1)).is_some());
        assert!(cache.get(&params(1)).is_none());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}

//! 2D simplex gradient noise
//!
//! The field is a pure function object: a shuffled permutation table plus a
//! gradient lookup, built once from a `SeededRandom` and then only read.

use glam::Vec2;

use crate::random::SeededRandom;

/// Skew factor from the square grid to the simplex grid: (√3 - 1) / 2
const F2: f32 = 0.366_025_42;

/// Unskew factor back to the square grid: (3 - √3) / 6
const G2: f32 = 0.211_324_87;

/// Output scale bringing the kernel sum into [-1, 1]
const OUTPUT_SCALE: f32 = 70.0;

/// Gradient directions (edge midpoints of a cube, projected to 2D)
const GRAD2: [Vec2; 12] = [
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
];

/// Wrap a floored lattice coordinate into 0..256
#[inline]
fn lattice_index(cell: f32) -> usize {
    (cell.rem_euclid(256.0) as usize) & 255
}

/// Seeded 2D noise field with values in [-1, 1]
///
/// Lattice coordinates wrap every 256 cells, so the statistics of the field
/// do not drift with coordinate magnitude.
///
/// # Example
///
/// ```rust
/// use planet_texture::NoiseField;
///
/// let noise = NoiseField::new(42);
/// let value = noise.sample(3.7, -12.25);
/// assert!((-1.0..=1.0).contains(&value));
/// assert_eq!(value, NoiseField::new(42).sample(3.7, -12.25));
/// ```
#[derive(Clone)]
pub struct NoiseField {
    perm: [u8; 512],
    grad: [Vec2; 512],
}

impl NoiseField {
    /// Build the field for a seed
    pub fn new(seed: u32) -> Self {
        Self::from_random(&mut SeededRandom::new(seed))
    }

    /// Build the field from an existing random stream
    ///
    /// Consumes 255 values from `random`.
    pub fn from_random(random: &mut SeededRandom) -> Self {
        let mut perm = [0u8; 512];
        for (i, p) in perm.iter_mut().take(256).enumerate() {
            *p = i as u8;
        }

        // Forward Fisher-Yates shuffle over the first half
        for i in 0..255 {
            let r = i + random.next_index(256 - i);
            perm.swap(i, r);
        }

        // Duplicate so corner lookups never need a second wrap
        let (low, high) = perm.split_at_mut(256);
        high.copy_from_slice(low);

        let mut grad = [Vec2::ZERO; 512];
        for (g, &p) in grad.iter_mut().zip(perm.iter()) {
            *g = GRAD2[p as usize % 12];
        }

        Self { perm, grad }
    }

    /// Corner contribution: radially attenuated gradient dot product
    #[inline]
    fn corner(&self, gi: usize, offset: Vec2) -> f32 {
        let t = 0.5 - offset.length_squared();
        // Also rejects NaN offsets from precision loss near f32::MAX
        if t > 0.0 {
            let t2 = t * t;
            t2 * t2 * self.grad[gi].dot(offset)
        } else {
            0.0
        }
    }

    /// Sample the field at `(x, y)`
    ///
    /// Continuous and smooth everywhere; deterministic for a fixed seed.
    /// Non-finite coordinates sample as 0.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        if !(x.is_finite() && y.is_finite()) {
            return 0.0;
        }

        // Skew input space to find the containing simplex cell. Cell indices
        // stay in f32 so coordinates past the i32 range never overflow.
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();

        let t = (i + j) * G2;
        let p0 = Vec2::new(x - (i - t), y - (j - t));

        // Upper or lower triangle of the cell
        let (i1, j1) = if p0.x > p0.y { (1, 0) } else { (0, 1) };

        let p1 = p0 - Vec2::new(i1 as f32, j1 as f32) + Vec2::splat(G2);
        let p2 = p0 - Vec2::ONE + Vec2::splat(2.0 * G2);

        let ii = lattice_index(i);
        let jj = lattice_index(j);

        let gi0 = ii + self.perm[jj] as usize;
        let gi1 = ii + i1 + self.perm[jj + j1] as usize;
        let gi2 = ii + 1 + self.perm[jj + 1] as usize;

        let n = self.corner(gi0, p0) + self.corner(gi1, p1) + self.corner(gi2, p2);

        (OUTPUT_SCALE * n).clamp(-1.0, 1.0)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("perm", &&self.perm[..8])
            .finish_non_exhaustive()
    }
}

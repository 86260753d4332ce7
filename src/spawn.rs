//! Random placement helpers.
//!
//! [`Spawner`] wraps the scene's RNG with the few sampling patterns the scene
//! needs, and [`SpawnBand`] describes the box new or recycled members land in.
//!
//! ```ignore
//! let mut spawner = Spawner::seeded(7);
//! let band = SpawnBand::new(4.0, 8.0..13.0, 4.0);
//! let position = spawner.point_in_band(&band);
//! assert!(band.contains(position));
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Axis-aligned spawn volume centred on the Y axis.
///
/// X is sampled in `[-half_width, half_width)`, Z in `[-half_depth, half_depth)`
/// and Y in `[y_min, y_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnBand {
    /// Half extent along X.
    pub half_width: f32,
    /// Lowest spawn height (inclusive).
    pub y_min: f32,
    /// Highest spawn height (exclusive).
    pub y_max: f32,
    /// Half extent along Z.
    pub half_depth: f32,
}

impl SpawnBand {
    /// Create a band from half extents and a height range.
    pub fn new(half_width: f32, height: Range<f32>, half_depth: f32) -> Self {
        Self {
            half_width,
            y_min: height.start,
            y_max: height.end,
            half_depth,
        }
    }

    /// Whether `p` lies inside the band.
    ///
    /// Both ends of every axis are accepted so that degenerate bands
    /// (zero extent) still contain the points sampled from them.
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= -self.half_width
            && p.x <= self.half_width
            && p.y >= self.y_min
            && p.y <= self.y_max
            && p.z >= -self.half_depth
            && p.z <= self.half_depth
    }

    /// Whether `y` lies within the band's height range.
    pub fn contains_height(&self, y: f32) -> bool {
        y >= self.y_min && y <= self.y_max
    }
}

/// Seeded random source used to place and recycle scene members.
pub struct Spawner {
    rng: SmallRng,
}

impl Spawner {
    /// Deterministic spawner; the same seed always produces the same scene.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Spawner seeded from the system clock.
    pub fn from_clock() -> Self {
        Self::seeded(clock_seed())
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`. Returns `min` when the range is empty.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Random f32 in `[-half, half)`.
    #[inline]
    pub fn random_symmetric(&mut self, half: f32) -> f32 {
        self.random_range(-half, half)
    }

    /// Uniform point inside `band`.
    pub fn point_in_band(&mut self, band: &SpawnBand) -> Vec3 {
        Vec3::new(
            self.random_symmetric(band.half_width),
            self.random_range(band.y_min, band.y_max),
            self.random_symmetric(band.half_depth),
        )
    }

    /// Pick one entry of `items` uniformly. `None` if `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.rng.gen_range(0..items.len())])
        }
    }
}

/// Seed derived from the wall clock, for runs without a configured seed.
pub fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_band_stays_inside() {
        let band = SpawnBand::new(4.0, 8.0..13.0, 4.0);
        let mut spawner = Spawner::seeded(1);
        for _ in 0..1_000 {
            let p = spawner.point_in_band(&band);
            assert!(band.contains(p), "{p:?} escaped {band:?}");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Spawner::seeded(99);
        let mut b = Spawner::seeded(99);
        for _ in 0..16 {
            assert_eq!(a.random(), b.random());
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut spawner = Spawner::seeded(3);
        assert_eq!(spawner.random_range(2.0, 2.0), 2.0);
        assert_eq!(spawner.random_range(5.0, 1.0), 5.0);
        assert_eq!(spawner.random_symmetric(0.0), 0.0);
    }

    #[test]
    fn test_degenerate_band_contains_its_samples() {
        let band = SpawnBand::new(0.0, 1.0..1.0, 0.0);
        let mut spawner = Spawner::seeded(5);
        let p = spawner.point_in_band(&band);
        assert_eq!(p, Vec3::new(0.0, 1.0, 0.0));
        assert!(band.contains(p));
    }

    #[test]
    fn test_pick() {
        let mut spawner = Spawner::seeded(11);
        let empty: [u32; 0] = [];
        assert!(spawner.pick(&empty).is_none());

        let colors = [1u32, 2, 3];
        for _ in 0..50 {
            let c = *spawner.pick(&colors).unwrap();
            assert!(colors.contains(&c));
        }
    }
}

//! Seeded random stream shared by the site samplers

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::Bounds;

/// Deterministic source of uniform values
///
/// Wraps a ChaCha8 generator so that the same seed and the same call
/// sequence yield bit-identical values on every platform.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    /// Create a stream from a seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed as u64),
        }
    }

    /// Next value uniformly distributed in `[0, 1)`
    #[inline]
    pub fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Next full-range integer, used to derive secondary seeds
    #[inline]
    pub fn next_int(&mut self) -> i64 {
        self.rng.gen::<i64>()
    }

    /// Next point inside `bounds`, x drawn before y
    #[inline]
    pub fn next_point(&mut self, bounds: &Bounds) -> DVec2 {
        let x = self.next_uniform() * bounds.width;
        let y = self.next_uniform() * bounds.height;
        DVec2::new(x, y)
    }
}

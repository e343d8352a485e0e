//! Uniform random site distribution
//!
//! Every site is an independent draw over the domain (white noise). Cheap,
//! but sites clump and leave gaps, which shows up as very uneven cell sizes.

use glam::DVec2;

use crate::config::Bounds;
use crate::error::{Result, SurfaceError};
use crate::random::RandomSource;

/// Draw `count` independent points inside `bounds`
///
/// Each coordinate is `uniform(0, 1) * extent`, x before y.
///
/// # Errors
///
/// Returns `InvalidConfig` if `count` is 0
///
/// # Example
///
/// ```rust
/// use rust_voronoi_surface::*;
/// use rust_voronoi_surface::generation::uniform_random;
///
/// let mut rng = RandomSource::new(42);
/// let sites = uniform_random(100, &Bounds::new(10.0, 10.0), &mut rng).unwrap();
/// assert_eq!(sites.len(), 100);
/// ```
pub fn uniform_random(count: usize, bounds: &Bounds, rng: &mut RandomSource) -> Result<Vec<DVec2>> {
    if count < 1 {
        return Err(SurfaceError::InvalidConfig(format!(
            "site count must be >= 1 (got {})",
            count
        )));
    }

    Ok((0..count).map(|_| rng.next_point(bounds)).collect())
}

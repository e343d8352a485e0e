//! Mitchell's best-candidate site distribution
//!
//! Approximates a Poisson-disk (blue noise) distribution without an explicit
//! exclusion radius: every new site is the candidate, out of a small random
//! pool, that lies farthest from all sites placed so far.
//!
//! # Complexity
//!
//! O(n² · k) distance evaluations for `n` sites and `k` candidates. That is
//! fine for the tens-to-hundreds of sites a surface uses. The candidate search
//! scans every placed site linearly.
//!
//! # References
//!
//! - Mitchell, D. P. "Spectrally Optimal Sampling for Distribution Ray Tracing" (SIGGRAPH 1991)

use glam::DVec2;

use crate::config::Bounds;
use crate::error::{Result, SurfaceError};
use crate::random::RandomSource;

/// Generate `count` sites with the best-candidate heuristic
///
/// Site 0 is a direct uniform draw. Each later site draws `candidates`
/// uniform points and keeps the one whose nearest placed site is farthest
/// away; ties keep the earliest candidate. With `candidates == 1` the
/// output is identical to [`uniform_random`](super::uniform_random) for the
/// same stream.
///
/// # Errors
///
/// Returns `InvalidConfig` if `count` or `candidates` is 0
///
/// # Example
///
/// ```rust
/// use rust_voronoi_surface::*;
/// use rust_voronoi_surface::generation::best_candidate;
///
/// let mut rng = RandomSource::new(42);
/// let sites = best_candidate(64, 10, &Bounds::new(1.0, 1.0), &mut rng).unwrap();
/// assert_eq!(sites.len(), 64);
/// ```
pub fn best_candidate(
    count: usize,
    candidates: usize,
    bounds: &Bounds,
    rng: &mut RandomSource,
) -> Result<Vec<DVec2>> {
    if count < 1 {
        return Err(SurfaceError::InvalidConfig(format!(
            "site count must be >= 1 (got {})",
            count
        )));
    }
    if candidates < 1 {
        return Err(SurfaceError::InvalidConfig(format!(
            "best-candidate pool must be >= 1 (got {})",
            candidates
        )));
    }

    let mut sites = Vec::with_capacity(count);
    sites.push(rng.next_point(bounds));

    let mut pool = Vec::with_capacity(candidates);
    for _ in 1..count {
        pool.clear();
        pool.extend((0..candidates).map(|_| rng.next_point(bounds)));

        let chosen = farthest_candidate(&pool, &sites);
        sites.push(pool[chosen]);
    }

    Ok(sites)
}

/// Distance from `point` to the closest of `placed`
///
/// Infinite when nothing has been placed yet.
pub fn min_distance(point: DVec2, placed: &[DVec2]) -> f64 {
    placed
        .iter()
        .map(|site| point.distance(*site))
        .fold(f64::INFINITY, f64::min)
}

/// Index of the candidate maximizing its distance to the nearest placed site
///
/// Only a strictly greater distance replaces the current best, so the
/// earliest candidate wins ties. `pool` must not be empty.
fn farthest_candidate(pool: &[DVec2], placed: &[DVec2]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::NEG_INFINITY;

    for (i, &candidate) in pool.iter().enumerate() {
        let distance = min_distance(candidate, placed);
        if distance > best_distance {
            best = i;
            best_distance = distance;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::uniform_random;

    #[test]
    fn test_best_candidate_count_and_bounds() {
        let bounds = Bounds::new(10.0, 10.0);
        let sites = best_candidate(40, 8, &bounds, &mut RandomSource::new(42)).unwrap();

        assert_eq!(sites.len(), 40);
        for site in &sites {
            assert!(bounds.contains(*site));
        }
    }

    #[test]
    fn test_best_candidate_determinism() {
        let bounds = Bounds::new(5.0, 5.0);
        let a = best_candidate(30, 6, &bounds, &mut RandomSource::new(9)).unwrap();
        let b = best_candidate(30, 6, &bounds, &mut RandomSource::new(9)).unwrap();

        for (p, q) in a.iter().zip(b.iter()) {
            assert_eq!(p.x.to_bits(), q.x.to_bits());
            assert_eq!(p.y.to_bits(), q.y.to_bits());
        }
    }

    /// Replays the candidate stream and checks every round picked a farthest candidate
    #[test]
    fn test_greedy_property() {
        let bounds = Bounds::new(10.0, 10.0);
        let k = 5;
        let sites = best_candidate(25, k, &bounds, &mut RandomSource::new(1234)).unwrap();

        let mut replay = RandomSource::new(1234);
        let first = replay.next_point(&bounds);
        assert_eq!(first, sites[0]);

        for i in 1..sites.len() {
            let pool: Vec<DVec2> = (0..k).map(|_| replay.next_point(&bounds)).collect();
            assert!(pool.contains(&sites[i]), "site {} must come from its candidate pool", i);

            let chosen = min_distance(sites[i], &sites[..i]);
            for candidate in &pool {
                assert!(chosen >= min_distance(*candidate, &sites[..i]));
            }
        }
    }

    #[test]
    fn test_single_candidate_matches_uniform() {
        let bounds = Bounds::new(10.0, 10.0);
        let uniform = uniform_random(3, &bounds, &mut RandomSource::new(42)).unwrap();
        let best = best_candidate(3, 1, &bounds, &mut RandomSource::new(42)).unwrap();
        assert_eq!(uniform, best);
    }

    #[test]
    fn test_better_spacing_than_uniform() {
        let bounds = Bounds::new(1.0, 1.0);
        let closest_pair = |sites: &[DVec2]| {
            (1..sites.len())
                .map(|i| min_distance(sites[i], &sites[..i]))
                .fold(f64::INFINITY, f64::min)
        };

        let uniform = uniform_random(100, &bounds, &mut RandomSource::new(7)).unwrap();
        let blue = best_candidate(100, 20, &bounds, &mut RandomSource::new(7)).unwrap();

        assert!(closest_pair(&blue) > closest_pair(&uniform));
    }

    #[test]
    fn test_tie_keeps_first_candidate() {
        let placed = [DVec2::new(0.0, 0.0)];
        let pool = [DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0), DVec2::new(0.5, 0.0)];
        assert_eq!(farthest_candidate(&pool, &placed), 0);
    }

    #[test]
    fn test_invalid_arguments() {
        let bounds = Bounds::default();
        assert!(best_candidate(0, 4, &bounds, &mut RandomSource::new(1)).is_err());
        assert!(best_candidate(4, 0, &bounds, &mut RandomSource::new(1)).is_err());
    }
}

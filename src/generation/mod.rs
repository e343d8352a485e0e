//! Site sampling and planar subdivision
//!
//! Samples the sites of a surface and partitions the plane around them using
//! a Delaunay triangulation obtained via a lifted convex hull.

mod best_candidate;
mod delaunay;
mod uniform;
mod voronoi;

pub use best_candidate::{best_candidate, min_distance};
pub use delaunay::{circumcenter, compute_delaunay, DelaunayResult};
pub use uniform::uniform_random;
pub use voronoi::{HullSubdivision, PlanarSubdivision};

use glam::DVec2;

use crate::config::{Bounds, SamplingAlgorithm};
use crate::error::Result;
use crate::random::RandomSource;

/// Sample `count` sites with the configured strategy
///
/// Sites are returned in generation order, which is their stable index.
pub fn sample_sites(
    algorithm: SamplingAlgorithm,
    count: usize,
    bounds: &Bounds,
    rng: &mut RandomSource,
) -> Result<Vec<DVec2>> {
    match algorithm {
        SamplingAlgorithm::UniformRandom => uniform_random(count, bounds, rng),
        SamplingAlgorithm::BestCandidate { candidates } => {
            best_candidate(count, candidates, bounds, rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let bounds = Bounds::new(10.0, 10.0);
        let uniform = SamplingAlgorithm::UniformRandom;
        let a = sample_sites(uniform, 5, &bounds, &mut RandomSource::new(42)).unwrap();
        let b = uniform_random(5, &bounds, &mut RandomSource::new(42)).unwrap();
        assert_eq!(a, b);

        let algorithm = SamplingAlgorithm::BestCandidate { candidates: 4 };
        let c = sample_sites(algorithm, 5, &bounds, &mut RandomSource::new(42)).unwrap();
        let d = best_candidate(5, 4, &bounds, &mut RandomSource::new(42)).unwrap();
        assert_eq!(c, d);
    }

    #[test]
    fn test_best_candidate_with_one_candidate_degenerates_to_uniform() {
        let bounds = Bounds::new(10.0, 10.0);
        let algorithm = SamplingAlgorithm::BestCandidate { candidates: 1 };
        let best = sample_sites(algorithm, 3, &bounds, &mut RandomSource::new(42)).unwrap();
        let uniform_algorithm = SamplingAlgorithm::UniformRandom;
        let mut rng = RandomSource::new(42);
        let uniform = sample_sites(uniform_algorithm, 3, &bounds, &mut rng).unwrap();
        assert_eq!(best, uniform);
    }
}

//! Example: Compare site sampling strategies
//!
//! Best-candidate sampling spreads sites further apart than uniform sampling
//! with the same seed and count.

use rust_voronoi_surface::*;
use rust_voronoi_surface::generation::min_distance;

fn spacing(sites: &[DVec2]) -> (f64, f64) {
    let distances: Vec<f64> = (0..sites.len())
        .map(|i| {
            let others: Vec<DVec2> = sites
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, s)| *s)
                .collect();
            min_distance(sites[i], &others)
        })
        .collect();

    let min = distances.iter().copied().fold(f64::INFINITY, f64::min);
    let mean = distances.iter().sum::<f64>() / distances.len() as f64;
    (min, mean)
}

fn main() {
    env_logger::init();

    println!("Site Sampling Example");
    println!("=====================\n");

    let bounds = Bounds::new(10.0, 10.0);
    let count = 200;

    let algorithms = [
        SamplingAlgorithm::UniformRandom,
        SamplingAlgorithm::BestCandidate { candidates: 2 },
        SamplingAlgorithm::BestCandidate { candidates: 10 },
        SamplingAlgorithm::BestCandidate { candidates: 30 },
    ];

    for algorithm in algorithms {
        let mut rng = RandomSource::new(42);
        let sites =
            sample_sites(algorithm, count, &bounds, &mut rng).expect("Failed to sample sites");
        let (min, mean) = spacing(&sites);

        let label = match algorithm {
            SamplingAlgorithm::UniformRandom => algorithm.name().to_string(),
            SamplingAlgorithm::BestCandidate { candidates } => {
                format!("{} (k={})", algorithm.name(), candidates)
            }
        };
        println!("{}:", label);
        println!("  Closest pair distance: {:.4}", min);
        println!("  Mean nearest-neighbor distance: {:.4}", mean);
    }
}

//! Example: Generate a cellular surface
//!
//! Runs the full pipeline and reports what happened to the sites.
//! Set `RUST_LOG=debug` to see per-stage timings.

use rust_voronoi_surface::*;

fn main() {
    env_logger::init();

    println!("Cellular Surface Generation Example");
    println!("===================================\n");

    let config = SurfaceConfigBuilder::new()
        .seed(42)
        .bounds(20.0, 10.0)
        .unwrap()
        .site_count(400)
        .unwrap()
        .algorithm(SamplingAlgorithm::BestCandidate { candidates: 10 })
        .unwrap()
        .noise_scale(3.0)
        .site_threshold(0.05)
        .fringe_amount(0.1)
        .unwrap()
        .build()
        .unwrap();

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Bounds: {} x {}", config.bounds.width, config.bounds.height);
    println!("  Sites: {} ({})", config.site_count, config.algorithm.name());
    println!("  Noise scale: {}", config.noise_scale);
    println!("  Threshold: {}", config.site_threshold);
    println!("  Fringe: {}", config.fringe_amount);
    println!();

    let surface = CellularSurface::generate(config).expect("Failed to generate surface");
    let stats = surface.stats();

    println!("Sites:");
    println!("  Kept: {}", stats.kept);
    println!("  Fringe: {}", stats.fringe);
    println!("  Below threshold: {}", stats.below_threshold);
    println!("  Open (hull): {}", stats.unbounded);
    println!("  Empty: {}", stats.empty);
    println!("  Noise seed: {}", surface.noise_seed());
    println!();

    let total_area: f64 = surface.cells().iter().map(|c| c.outline.area()).sum();
    let covered = total_area / (config.bounds.width * config.bounds.height);
    println!("Covered area: {:.1}%", covered * 100.0);

    println!("\nSample cells:");
    for cell in surface.cells().iter().take(5) {
        println!(
            "  Site {}: at ({:.2}, {:.2}), {} sides, area {:.3}",
            cell.site_index,
            cell.site.x,
            cell.site.y,
            cell.outline.len(),
            cell.outline.area()
        );
    }

    #[cfg(feature = "spatial-index")]
    {
        let center = DVec2::new(10.0, 5.0);
        let site = surface.find_site_at(center);
        let state = if surface.cell(site).is_some() { "kept" } else { "culled" };
        println!("\nCell under ({}, {}): site {} ({})", center.x, center.y, site, state);
    }

    let mesh = surface.combined_mesh();
    println!("\nCombined mesh:");
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());
}

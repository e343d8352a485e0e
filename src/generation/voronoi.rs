//! Voronoi diagram construction from a Delaunay triangulation
//!
//! Each Delaunay triangle becomes one Voronoi vertex (its circumcenter).
//! Walking the triangles around a site counter-clockwise yields the site's
//! boundary as a contiguous run of edges: Segments between consecutive
//! circumcenters, closed for interior sites, and capped by two rays for
//! sites on the convex hull.

use std::collections::HashMap;

use glam::DVec2;

use super::delaunay::{circumcenter, compute_delaunay, is_degenerate};
use crate::diagram::{Diagram, Edge};
use crate::error::{Result, SurfaceError};

/// Producer of a planar subdivision for a set of sites
///
/// Implementations must return a [`Diagram`] whose edges are grouped
/// contiguously per site in ascending site order, with each bounded cell's
/// segments forming a walk (`vert1` of one edge is `vert0` of the next, and
/// the last edge returns to the first).
pub trait PlanarSubdivision {
    /// Build the diagram for `sites` (at least one site)
    fn build(&self, sites: &[DVec2]) -> Result<Diagram>;
}

/// Voronoi subdivision computed from the lifted convex hull
///
/// Cells of sites on the convex hull of all sites are unbounded and carry
/// `RayCw`/`RayCcw` edges. When every site is collinear the cells are
/// strips separated by `Line` edges. Repeated sites own no edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct HullSubdivision;

impl PlanarSubdivision for HullSubdivision {
    fn build(&self, sites: &[DVec2]) -> Result<Diagram> {
        if sites.is_empty() {
            return Err(SurfaceError::GenerationFailed(
                "subdivision requires at least one site".into(),
            ));
        }
        if let Some(index) = sites.iter().position(|s| !s.is_finite()) {
            return Err(SurfaceError::GenerationFailed(format!(
                "site {} is not finite",
                index
            )));
        }

        if is_degenerate(sites) {
            Ok(build_collinear(sites))
        } else {
            Ok(build_from_triangulation(sites))
        }
    }
}

/// Push-style assembler that keeps the per-site grouping contract
struct DiagramBuilder {
    diagram: Diagram,
}

impl DiagramBuilder {
    fn new(sites: &[DVec2], vertices: Vec<DVec2>) -> Self {
        Self {
            diagram: Diagram {
                sites: sites.to_vec(),
                vertices,
                edges: Vec::new(),
                first_edge_by_site: Vec::with_capacity(sites.len()),
            },
        }
    }

    /// Open the next site's edge run; must be called once per site, in order
    fn begin_site(&mut self) {
        self.diagram.first_edge_by_site.push(self.diagram.edges.len());
    }

    fn push(&mut self, edge: Edge) {
        self.diagram.edges.push(edge);
    }

    fn finish(self) -> Diagram {
        self.diagram
    }
}

fn build_from_triangulation(sites: &[DVec2]) -> Diagram {
    let delaunay = compute_delaunay(sites);

    let vertices: Vec<DVec2> = delaunay
        .triangles
        .iter()
        .map(|tri| circumcenter(sites[tri[0]], sites[tri[1]], sites[tri[2]]))
        .collect();

    // For each site: the triangles around it as (next-vertex-ccw, triangle)
    // keyed by the vertex preceding the site's far edge
    let mut fans: Vec<HashMap<usize, (usize, usize)>> = vec![HashMap::new(); sites.len()];
    for (tri_idx, tri) in delaunay.triangles.iter().enumerate() {
        for corner in 0..3 {
            let site = tri[corner];
            let a = tri[(corner + 1) % 3];
            let b = tri[(corner + 2) % 3];
            fans[site].insert(a, (b, tri_idx));
        }
    }

    let mut builder = DiagramBuilder::new(sites, vertices);
    for (site_idx, fan) in fans.iter().enumerate() {
        builder.begin_site();
        if fan.is_empty() {
            continue;
        }
        push_site_edges(&mut builder, sites, site_idx, fan);
    }

    builder.finish()
}

/// Emit one site's boundary, counter-clockwise around the site
fn push_site_edges(
    builder: &mut DiagramBuilder,
    sites: &[DVec2],
    site_idx: usize,
    fan: &HashMap<usize, (usize, usize)>,
) {
    let site = sites[site_idx];

    // A hull site has exactly one fan entry whose leading vertex is never reached
    let reached: Vec<usize> = fan.values().map(|&(b, _)| b).collect();
    let mut open_starts: Vec<usize> =
        fan.keys().copied().filter(|a| !reached.contains(a)).collect();
    open_starts.sort_unstable();

    let (start, bounded) = match open_starts.first() {
        Some(&a) => (a, false),
        None => match fan.keys().min() {
            Some(&a) => (a, true),
            None => return,
        },
    };

    let mut chain = Vec::with_capacity(fan.len());
    let mut current = start;
    while let Some(&(next, tri)) = fan.get(&current) {
        chain.push(tri);
        current = next;
        if current == start || chain.len() == fan.len() {
            break;
        }
    }
    let last_vertex = current;

    if !bounded {
        let edge = sites[start] - site;
        builder.push(Edge::RayCw {
            vert0: chain[0],
            direction: DVec2::new(edge.y, -edge.x).normalize_or_zero(),
        });
    }

    for pair in chain.windows(2) {
        builder.push(Edge::Segment { vert0: pair[0], vert1: pair[1] });
    }

    let tail = chain[chain.len() - 1];
    if bounded {
        builder.push(Edge::Segment { vert0: tail, vert1: chain[0] });
    } else {
        let edge = sites[last_vertex] - site;
        builder.push(Edge::RayCcw {
            vert0: tail,
            direction: edge.perp().normalize_or_zero(),
        });
    }
}

/// Every site on one line: cells are strips bounded by perpendicular bisectors
fn build_collinear(sites: &[DVec2]) -> Diagram {
    let origin = sites[0];
    let axis = sites
        .iter()
        .map(|&s| s - origin)
        .max_by(|a, b| {
            a.length_squared()
                .partial_cmp(&b.length_squared())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(DVec2::ZERO)
        .normalize_or_zero();

    // Distinct sites ordered along the line; duplicates keep their first index
    let mut order: Vec<usize> = Vec::with_capacity(sites.len());
    for (index, site) in sites.iter().enumerate() {
        if !order.iter().any(|&o| sites[o] == *site) {
            order.push(index);
        }
    }
    order.sort_by(|&i, &j| {
        let ti = (sites[i] - origin).dot(axis);
        let tj = (sites[j] - origin).dot(axis);
        ti.partial_cmp(&tj).unwrap_or(std::cmp::Ordering::Equal)
    });

    // Bisector k separates order[k] and order[k + 1]
    let vertices: Vec<DVec2> = order
        .windows(2)
        .map(|pair| (sites[pair[0]] + sites[pair[1]]) * 0.5)
        .collect();
    let mut rank = vec![None; sites.len()];
    for (position, &index) in order.iter().enumerate() {
        rank[index] = Some(position);
    }

    let bisector = axis.perp();
    let mut builder = DiagramBuilder::new(sites, vertices);
    for site_rank in rank {
        builder.begin_site();
        let Some(position) = site_rank else {
            continue;
        };
        if position > 0 {
            builder.push(Edge::Line { vert0: position - 1, direction: -bisector });
        }
        if position + 1 < order.len() {
            builder.push(Edge::Line { vert0: position, direction: bisector });
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Bounds;
    use crate::generation::uniform_random;
    use crate::random::RandomSource;

    /// Eight hull sites on a slightly irregular ring around four interior sites
    fn ring_sites() -> Vec<DVec2> {
        let mut sites: Vec<DVec2> = (0..8)
            .map(|k| {
                let angle = k as f64 * std::f64::consts::FRAC_PI_4 + 0.1;
                let radius = 10.0 + (k % 3) as f64 * 0.5;
                DVec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect();
        sites.extend([
            DVec2::new(0.0, 0.0),
            DVec2::new(3.0, 1.0),
            DVec2::new(-2.0, 2.5),
            DVec2::new(1.0, -3.0),
        ]);
        sites
    }

    #[test]
    fn test_diagram_is_valid() {
        let bounds = Bounds::new(10.0, 10.0);
        let sites = uniform_random(60, &bounds, &mut RandomSource::new(42)).unwrap();
        let diagram = HullSubdivision.build(&sites).unwrap();

        assert_eq!(diagram.site_count(), 60);
        diagram.validate().unwrap();
    }

    #[test]
    fn test_first_edges_non_decreasing() {
        let sites = uniform_random(40, &Bounds::new(1.0, 1.0), &mut RandomSource::new(3)).unwrap();
        let diagram = HullSubdivision.build(&sites).unwrap();
        assert!(diagram.first_edge_by_site.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_bounded_cells_form_closed_walks() {
        let sites = ring_sites();
        let diagram = HullSubdivision.build(&sites).unwrap();

        let mut bounded = 0;
        for site in 0..sites.len() {
            let edges = diagram.site_edges(site).unwrap();
            if !edges.iter().all(Edge::is_bounded) {
                continue;
            }
            bounded += 1;
            for k in 0..edges.len() {
                let (Edge::Segment { vert1, .. }, Edge::Segment { vert0, .. }) =
                    (edges[k], edges[(k + 1) % edges.len()])
                else {
                    unreachable!();
                };
                assert_eq!(vert1, vert0, "site {} boundary must be contiguous", site);
            }
        }
        assert_eq!(bounded, 4);
    }

    #[test]
    fn test_hull_sites_are_unbounded() {
        let sites = ring_sites();
        let diagram = HullSubdivision.build(&sites).unwrap();

        for corner in 0..8 {
            let edges = diagram.site_edges(corner).unwrap();
            assert!(matches!(edges.first(), Some(Edge::RayCw { .. })));
            assert!(matches!(edges.last(), Some(Edge::RayCcw { .. })));
        }
    }

    #[test]
    fn test_cell_vertices_equidistant_from_neighbors() {
        let sites = ring_sites();
        let diagram = HullSubdivision.build(&sites).unwrap();

        // Every Voronoi vertex is at least as close to its own sites as to any other
        for site in 0..sites.len() {
            for edge in diagram.site_edges(site).unwrap() {
                let v = diagram.vertices[edge.vert0()];
                let own = v.distance(sites[site]);
                for other in &sites {
                    assert!(v.distance(*other) >= own - 1.0e-4);
                }
            }
        }
    }

    #[test]
    fn test_collinear_sites_produce_lines() {
        let sites = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(1.0, 1.0),
        ];
        let diagram = HullSubdivision.build(&sites).unwrap();
        diagram.validate().unwrap();

        assert!(diagram.edges.iter().all(|e| matches!(e, Edge::Line { .. })));
        // The middle site (index 2) is bounded by two lines, the ends by one
        assert_eq!(diagram.site_edges(0).unwrap().len(), 1);
        assert_eq!(diagram.site_edges(1).unwrap().len(), 1);
        assert_eq!(diagram.site_edges(2).unwrap().len(), 2);
    }

    fn assert_all_open(sites: &[DVec2]) {
        let diagram = HullSubdivision.build(sites).unwrap();
        diagram.validate().unwrap();

        for site in 0..sites.len() {
            let edges = diagram.site_edges(site).unwrap();
            assert!(edges.len() >= 2, "site {} should own a ray pair", site);
            assert!(matches!(edges.first(), Some(Edge::RayCw { .. })));
            assert!(matches!(edges.last(), Some(Edge::RayCcw { .. })));
        }
    }

    #[test]
    fn test_three_sites_are_all_unbounded() {
        assert_all_open(&[
            DVec2::new(9.32, 7.91),
            DVec2::new(5.29, 4.93),
            DVec2::new(3.57, 9.78),
        ]);
    }

    #[test]
    fn test_cocircular_ring_is_all_unbounded() {
        for k in 3..9 {
            let sites: Vec<DVec2> = (0..k)
                .map(|i| {
                    let angle = 0.3 + i as f64 * std::f64::consts::TAU / k as f64;
                    DVec2::new(angle.cos(), angle.sin()) * 4.0
                })
                .collect();
            assert_all_open(&sites);
        }
    }

    #[test]
    fn test_single_site_has_no_edges() {
        let diagram = HullSubdivision.build(&[DVec2::new(0.5, 0.5)]).unwrap();
        assert_eq!(diagram.first_edge_by_site, vec![0]);
        assert!(diagram.edges.is_empty());
    }

    #[test]
    fn test_duplicate_site_owns_no_edges() {
        let mut sites = ring_sites();
        sites.push(sites[9]);
        let diagram = HullSubdivision.build(&sites).unwrap();
        diagram.validate().unwrap();

        assert!(diagram.site_edges(12).unwrap().is_empty());
        assert!(!diagram.site_edges(9).unwrap().is_empty());
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            HullSubdivision.build(&[]),
            Err(SurfaceError::GenerationFailed(_))
        ));
    }
}

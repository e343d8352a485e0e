//! Cell Loop Extraction
//!
//! Rebuilds the closed boundary polygon of one site from its run of edges in
//! a [`Diagram`].

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::diagram::{Diagram, Edge};
use crate::error::{Result, SurfaceError};

/// Closed boundary polygon of a single cell
///
/// The last vertex connects back to the first; the closing point is not
/// repeated. Vertices follow the edge order of the diagram, which is
/// counter-clockwise for [`HullSubdivision`](crate::HullSubdivision).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellLoop {
    /// Boundary vertices in walk order
    pub vertices: Vec<DVec2>,
}

impl CellLoop {
    /// Number of boundary vertices
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the loop has no vertices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Signed area via the shoelace formula (positive when counter-clockwise)
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }

        let twice_area: f64 = (0..n)
            .map(|i| self.vertices[i].perp_dot(self.vertices[(i + 1) % n]))
            .sum();
        twice_area * 0.5
    }

    /// Unsigned polygon area
    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }
}

/// What a site's edge run describes
#[derive(Debug, Clone, PartialEq)]
pub enum CellBoundary {
    /// Every edge is a segment: a closed polygon
    Closed(CellLoop),
    /// The run contains a ray or line; `edge` is the first offending edge index
    Unbounded { edge: usize },
    /// The site owns no edges at all
    Empty,
}

impl CellBoundary {
    /// The loop, if the cell is closed
    pub fn into_loop(self) -> Option<CellLoop> {
        match self {
            CellBoundary::Closed(cell_loop) => Some(cell_loop),
            _ => None,
        }
    }

    /// Check if the cell was rejected as open
    pub fn is_unbounded(&self) -> bool {
        matches!(self, CellBoundary::Unbounded { .. })
    }
}

/// Reconstruct the boundary loop of `site`
///
/// The first segment contributes both endpoints and every later segment its
/// `vert1`, except the final one, whose `vert1` closes back onto the first
/// vertex. The loop therefore has exactly as many vertices as the run has
/// edges. Consecutive segments are assumed to share endpoints; this is the
/// diagram's contract and is not re-checked here.
///
/// Any `RayCw`, `RayCcw` or `Line` edge in the run rejects the whole cell
/// with [`CellBoundary::Unbounded`]; unbounded cells are not clipped.
///
/// # Errors
///
/// Returns `SiteNotFound` if `site` is out of range and `InvalidDiagram` if
/// its edge range is malformed.
///
/// # Example
///
/// ```rust
/// use rust_voronoi_surface::*;
/// use glam::DVec2;
///
/// let diagram = Diagram {
///     sites: vec![DVec2::new(0.5, 0.5)],
///     vertices: vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(0.5, 1.0)],
///     edges: vec![
///         Edge::Segment { vert0: 0, vert1: 1 },
///         Edge::Segment { vert0: 1, vert1: 2 },
///         Edge::Segment { vert0: 2, vert1: 0 },
///     ],
///     first_edge_by_site: vec![0],
/// };
///
/// let cell_loop = extract_loop(&diagram, 0).unwrap().into_loop().unwrap();
/// assert_eq!(cell_loop.len(), 3);
/// ```
pub fn extract_loop(diagram: &Diagram, site: usize) -> Result<CellBoundary> {
    let range = diagram.edge_range(site)?;
    let first = range.start;
    let edges = &diagram.edges[range];

    if edges.is_empty() {
        return Ok(CellBoundary::Empty);
    }
    if let Some(offset) = edges.iter().position(|edge| !edge.is_bounded()) {
        return Ok(CellBoundary::Unbounded { edge: first + offset });
    }

    let mut vertices = Vec::with_capacity(edges.len());
    for (i, edge) in edges.iter().enumerate() {
        let Edge::Segment { vert0, vert1 } = *edge else {
            return Ok(CellBoundary::Unbounded { edge: first + i });
        };
        if i == 0 {
            vertices.push(vertex(diagram, vert0)?);
        }
        if i + 1 < edges.len() {
            vertices.push(vertex(diagram, vert1)?);
        }
    }

    Ok(CellBoundary::Closed(CellLoop { vertices }))
}

fn vertex(diagram: &Diagram, index: usize) -> Result<DVec2> {
    diagram.vertices.get(index).copied().ok_or_else(|| {
        SurfaceError::InvalidDiagram(format!("vertex {} does not exist", index))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Site 0: closed square; site 1: square with a line edge; site 2: no edges
    fn mixed_diagram() -> Diagram {
        Diagram {
            sites: vec![
                DVec2::new(1.0, 1.0),
                DVec2::new(3.0, 1.0),
                DVec2::new(5.0, 1.0),
            ],
            vertices: vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(2.0, 0.0),
                DVec2::new(2.0, 2.0),
                DVec2::new(0.0, 2.0),
                DVec2::new(4.0, 0.0),
                DVec2::new(4.0, 2.0),
            ],
            edges: vec![
                Edge::Segment { vert0: 0, vert1: 1 },
                Edge::Segment { vert0: 1, vert1: 2 },
                Edge::Segment { vert0: 2, vert1: 3 },
                Edge::Segment { vert0: 3, vert1: 0 },
                Edge::Segment { vert0: 1, vert1: 4 },
                Edge::Segment { vert0: 4, vert1: 5 },
                Edge::Line { vert0: 5, direction: DVec2::Y },
                Edge::Segment { vert0: 2, vert1: 1 },
            ],
            first_edge_by_site: vec![0, 4, 8],
        }
    }

    #[test]
    fn test_closed_loop() {
        let diagram = mixed_diagram();
        let boundary = extract_loop(&diagram, 0).unwrap();

        let CellBoundary::Closed(cell_loop) = boundary else {
            panic!("site 0 should be closed");
        };
        assert_eq!(
            cell_loop.vertices,
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(2.0, 0.0),
                DVec2::new(2.0, 2.0),
                DVec2::new(0.0, 2.0),
            ]
        );
        assert_eq!(cell_loop.len(), diagram.edge_range(0).unwrap().len());
        assert!((cell_loop.area() - 4.0).abs() < 1e-12);
        assert!(cell_loop.signed_area() > 0.0);
    }

    #[test]
    fn test_line_edge_rejects_cell() {
        let diagram = mixed_diagram();
        let boundary = extract_loop(&diagram, 1).unwrap();
        assert_eq!(boundary, CellBoundary::Unbounded { edge: 6 });
        assert!(boundary.is_unbounded());
        assert!(boundary.into_loop().is_none());
    }

    #[test]
    fn test_rays_reject_cell() {
        let mut diagram = mixed_diagram();
        diagram.edges[0] = Edge::RayCw { vert0: 0, direction: DVec2::NEG_Y };
        assert_eq!(extract_loop(&diagram, 0).unwrap(), CellBoundary::Unbounded { edge: 0 });

        let mut diagram = mixed_diagram();
        diagram.edges[3] = Edge::RayCcw { vert0: 3, direction: DVec2::NEG_X };
        assert_eq!(extract_loop(&diagram, 0).unwrap(), CellBoundary::Unbounded { edge: 3 });
    }

    #[test]
    fn test_empty_range_is_distinct_from_unbounded() {
        let diagram = mixed_diagram();
        assert_eq!(extract_loop(&diagram, 2).unwrap(), CellBoundary::Empty);
    }

    #[test]
    fn test_last_site_range_ends_at_edge_count() {
        let mut diagram = mixed_diagram();
        diagram.first_edge_by_site[2] = 7;
        let CellBoundary::Closed(cell_loop) = extract_loop(&diagram, 2).unwrap() else {
            panic!("single segment run should be closed");
        };
        assert_eq!(cell_loop.vertices, vec![DVec2::new(2.0, 2.0)]);
    }

    #[test]
    fn test_site_out_of_range() {
        let diagram = mixed_diagram();
        assert_eq!(extract_loop(&diagram, 3), Err(SurfaceError::SiteNotFound(3)));
    }

    #[test]
    fn test_degenerate_area() {
        let cell_loop = CellLoop {
            vertices: vec![DVec2::ZERO, DVec2::ONE],
        };
        assert_eq!(cell_loop.area(), 0.0);
    }
}

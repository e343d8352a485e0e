//! Planar subdivision output
//!
//! A [`Diagram`] is an arena of vertices and typed edges plus a per-site
//! index into the edge list. Edges belonging to one site are stored
//! contiguously, in ascending site order, so a site's boundary is just a
//! range of the shared edge arena.

use std::ops::Range;

use glam::DVec2;

use crate::error::{Result, SurfaceError};

/// A typed edge of the subdivision
///
/// Vertex fields index into [`Diagram::vertices`]. Unbounded edges carry a
/// unit direction instead of a second vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    /// Finite edge between two vertices
    Segment { vert0: usize, vert1: usize },
    /// Half-infinite edge where the clockwise walk around the cell enters from infinity
    RayCw { vert0: usize, direction: DVec2 },
    /// Half-infinite edge where the counter-clockwise walk around the cell leaves to infinity
    RayCcw { vert0: usize, direction: DVec2 },
    /// Infinite edge through `vert0`
    Line { vert0: usize, direction: DVec2 },
}

impl Edge {
    /// Start vertex (every edge type has one)
    #[inline]
    pub fn vert0(&self) -> usize {
        match *self {
            Edge::Segment { vert0, .. }
            | Edge::RayCw { vert0, .. }
            | Edge::RayCcw { vert0, .. }
            | Edge::Line { vert0, .. } => vert0,
        }
    }

    /// True only for `Segment`
    #[inline]
    pub fn is_bounded(&self) -> bool {
        matches!(self, Edge::Segment { .. })
    }
}

/// Voronoi-style partition of the plane, one region per site
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    /// Sites in their stable index order
    pub sites: Vec<DVec2>,
    /// Shared vertex arena
    pub vertices: Vec<DVec2>,
    /// Edge arena, grouped by owning site
    pub edges: Vec<Edge>,
    /// Index of each site's first edge in `edges`
    pub first_edge_by_site: Vec<usize>,
}

impl Diagram {
    /// Number of sites
    #[inline]
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Edge index range `[first, last)` owned by `site`
    ///
    /// The last site's range ends at `edges.len()`.
    ///
    /// # Errors
    ///
    /// Returns `SiteNotFound` for an out-of-range site, `InvalidDiagram` if
    /// the first-edge table is inconsistent at that site.
    pub fn edge_range(&self, site: usize) -> Result<Range<usize>> {
        if site >= self.site_count() {
            return Err(SurfaceError::SiteNotFound(site));
        }
        let first = *self
            .first_edge_by_site
            .get(site)
            .ok_or_else(|| {
                SurfaceError::InvalidDiagram(format!("no first edge for site {}", site))
            })?;
        let last = self
            .first_edge_by_site
            .get(site + 1)
            .copied()
            .unwrap_or(self.edges.len());

        if first > last || last > self.edges.len() {
            return Err(SurfaceError::InvalidDiagram(format!(
                "edge range {}..{} of site {} is malformed ({} edges)",
                first,
                last,
                site,
                self.edges.len()
            )));
        }
        Ok(first..last)
    }

    /// Edges owned by `site`, borrowed from the arena
    pub fn site_edges(&self, site: usize) -> Result<&[Edge]> {
        let range = self.edge_range(site)?;
        Ok(&self.edges[range])
    }

    /// Check the grouping contract consumers rely on
    ///
    /// - exactly one first-edge entry per site
    /// - first-edge entries non-decreasing and within the edge list
    /// - every vertex reference inside the vertex arena
    pub fn validate(&self) -> Result<()> {
        if self.first_edge_by_site.len() != self.sites.len() {
            return Err(SurfaceError::InvalidDiagram(format!(
                "{} first-edge entries for {} sites",
                self.first_edge_by_site.len(),
                self.sites.len()
            )));
        }

        let mut previous = 0;
        for (site, &first) in self.first_edge_by_site.iter().enumerate() {
            if first < previous || first > self.edges.len() {
                return Err(SurfaceError::InvalidDiagram(format!(
                    "first edge {} of site {} breaks ascending grouping",
                    first, site
                )));
            }
            previous = first;
        }

        let vertex_count = self.vertices.len();
        for (index, edge) in self.edges.iter().enumerate() {
            let out_of_range = match *edge {
                Edge::Segment { vert0, vert1 } => vert0 >= vertex_count || vert1 >= vertex_count,
                _ => edge.vert0() >= vertex_count,
            };
            if out_of_range {
                return Err(SurfaceError::InvalidDiagram(format!(
                    "edge {} references a missing vertex",
                    index
                )));
            }
        }

        Ok(())
    }
}

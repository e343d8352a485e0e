//! Mesh generation for surface cells
//!
//! Generates engine-agnostic mesh data from cell loops.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cell::CellLoop;

/// Up axis of the world the diagram plane is laid into
pub const UP: [f32; 3] = [0.0, 1.0, 0.0];

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: Convert to `Mesh` with attributes
/// - Godot: Convert to `ArrayMesh`
/// - wgpu: Use directly as vertex buffers
///
/// Diagram coordinates `(x, y)` map to world `(x, 0, y)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellMesh {
    /// Vertex positions (3D coordinates); index 0 is the fan apex
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals (all pointing up)
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates
    // TODO: project positions onto the domain rectangle for real UVs; zero-filled for now
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl CellMesh {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append another mesh, rebasing its indices
    pub fn append(&mut self, other: &CellMesh) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|i| base + i));
    }
}

/// Map a diagram point into the world plane
#[inline]
pub fn diagram_to_world(point: DVec2) -> [f32; 3] {
    [point.x as f32, 0.0, point.y as f32]
}

/// Triangulate a cell loop as a triangle fan around its site
///
/// The apex is the generating site rather than the polygon centroid. A
/// Voronoi site always lies inside its own cell, so the fan is valid for any
/// subdivision that honors that property. Produces `loop.len() + 1`
/// vertices and one triangle `(0, i + 1, (i + 1) % n + 1)` per boundary edge,
/// keeping the loop's winding.
///
/// Returns `None` for an empty loop.
///
/// # Example
///
/// ```rust
/// use rust_voronoi_surface::*;
/// use glam::DVec2;
///
/// let cell_loop = CellLoop {
///     vertices: vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0)],
/// };
/// let mesh = triangulate_cell(&cell_loop, DVec2::new(0.25, 0.25)).unwrap();
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 0, 3, 1]);
/// ```
pub fn triangulate_cell(cell_loop: &CellLoop, site: DVec2) -> Option<CellMesh> {
    if cell_loop.is_empty() {
        return None;
    }

    let n = cell_loop.len();
    let vertex_count = n + 1;

    let mut positions = Vec::with_capacity(vertex_count);
    positions.push(diagram_to_world(site));
    positions.extend(cell_loop.vertices.iter().map(|&v| diagram_to_world(v)));

    let mut indices = Vec::with_capacity(n * 3);
    for i in 0..n {
        let next_i = (i + 1) % n;
        indices.push(0);                   // Apex
        indices.push(i as u32 + 1);        // Current vertex
        indices.push(next_i as u32 + 1);   // Next vertex
    }

    Some(CellMesh {
        positions,
        normals: vec![UP; vertex_count],
        uvs: vec![[0.0, 0.0]; vertex_count],
        indices,
    })
}

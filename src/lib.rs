//! Procedural Voronoi cellular surfaces
//!
//! A standalone library for scattering sites over a rectangle, partitioning
//! the plane into Voronoi cells and keeping a noise-selected subset of the
//! closed cells as triangle-fan meshes, suitable for use with any game engine
//! (Bevy, Godot, etc.)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_voronoi_surface::*;
//!
//! // Generate a surface
//! let config = SurfaceConfigBuilder::new()
//!     .seed(42)
//!     .bounds(10.0, 10.0).unwrap()
//!     .site_count(200).unwrap()
//!     .algorithm(SamplingAlgorithm::BestCandidate { candidates: 10 }).unwrap()
//!     .site_threshold(0.1)
//!     .build().unwrap();
//!
//! let surface = CellularSurface::generate(config).unwrap();
//!
//! // One mesh per surviving cell, keyed by site index
//! for (site_index, mesh) in surface.into_meshes() {
//!     println!("Cell {}: {} triangles", site_index, mesh.triangle_count());
//! }
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-site lookups using KD-tree
//! - `parallel` (default): Processes cells on the rayon thread pool
//! - `serde`: Enables serialization support for configuration and meshes

// Modules
pub mod error;
pub mod config;
pub mod random;
pub mod generation;
pub mod diagram;
pub mod cell;
pub mod mesh;
pub mod noise;
pub mod selection;
pub mod surface;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{SurfaceError, Result};
pub use config::{Bounds, SamplingAlgorithm, SurfaceConfig, SurfaceConfigBuilder};
pub use random::RandomSource;
pub use diagram::{Diagram, Edge};
pub use cell::{extract_loop, CellBoundary, CellLoop};
pub use mesh::{triangulate_cell, CellMesh};
pub use noise::{NoiseField, PerlinConfig, PerlinNoiseField};
pub use selection::{CellSelector, Selection};
pub use surface::{build_cells, CellStats, CellularSurface, SurfaceCell};
pub use generation::{sample_sites, HullSubdivision, PlanarSubdivision};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;

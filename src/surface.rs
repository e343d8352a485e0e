//! CellularSurface main structure and generation pipeline

use std::time::Instant;

use glam::DVec2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::cell::{extract_loop, CellBoundary, CellLoop};
use crate::config::SurfaceConfig;
use crate::diagram::Diagram;
use crate::error::{Result, SurfaceError};
use crate::generation::{sample_sites, HullSubdivision, PlanarSubdivision};
use crate::mesh::{triangulate_cell, CellMesh};
use crate::noise::{NoiseField, PerlinNoiseField};
use crate::random::RandomSource;
use crate::selection::{CellSelector, Selection};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A materialized cell: its site, boundary polygon and fan mesh
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceCell {
    /// Stable index of the generating site
    pub site_index: usize,
    /// Position of the generating site (the fan apex)
    pub site: DVec2,
    /// Closed boundary polygon
    pub outline: CellLoop,
    /// Renderable triangle fan
    pub mesh: CellMesh,
}

/// Per-run tally of what happened to each site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStats {
    /// Cells materialized
    pub kept: usize,
    /// Sites dropped by the boundary fringe
    pub fringe: usize,
    /// Sites dropped by the noise threshold
    pub below_threshold: usize,
    /// Selected sites whose cell is open (ray or line edges)
    pub unbounded: usize,
    /// Selected sites owning no edges
    pub empty: usize,
}

impl CellStats {
    /// Total number of sites accounted for
    pub fn total(&self) -> usize {
        self.kept + self.fringe + self.below_threshold + self.unbounded + self.empty
    }
}

/// What the pipeline did with one site
enum SiteOutcome {
    Emitted(SurfaceCell),
    Culled(Selection),
    Unbounded,
    Empty,
}

/// Select, extract and mesh a single site
///
/// Reads only the site's own slice of the diagram.
fn process_site<N: NoiseField>(
    diagram: &Diagram,
    selector: &CellSelector<'_, N>,
    site_index: usize,
) -> Result<SiteOutcome> {
    let site = diagram.sites[site_index];

    let selection = selector.decide(site);
    if !selection.is_kept() {
        return Ok(SiteOutcome::Culled(selection));
    }

    let outline = match extract_loop(diagram, site_index)? {
        CellBoundary::Closed(outline) => outline,
        CellBoundary::Unbounded { .. } => return Ok(SiteOutcome::Unbounded),
        CellBoundary::Empty => return Ok(SiteOutcome::Empty),
    };

    match triangulate_cell(&outline, site) {
        Some(mesh) => Ok(SiteOutcome::Emitted(SurfaceCell {
            site_index,
            site,
            outline,
            mesh,
        })),
        None => Ok(SiteOutcome::Empty),
    }
}

/// Run selection, loop extraction and meshing for every site of `diagram`
///
/// Sites are independent: with the `parallel` feature they are processed on
/// the rayon pool. Output is always in ascending site order.
pub fn build_cells<N: NoiseField>(
    diagram: &Diagram,
    selector: &CellSelector<'_, N>,
) -> Result<(Vec<SurfaceCell>, CellStats)> {
    #[cfg(feature = "parallel")]
    let outcomes: Vec<Result<SiteOutcome>> = (0..diagram.site_count())
        .into_par_iter()
        .map(|site_index| process_site(diagram, selector, site_index))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Result<SiteOutcome>> = (0..diagram.site_count())
        .map(|site_index| process_site(diagram, selector, site_index))
        .collect();

    let mut cells = Vec::new();
    let mut stats = CellStats::default();
    for outcome in outcomes {
        match outcome? {
            SiteOutcome::Emitted(cell) => {
                stats.kept += 1;
                cells.push(cell);
            }
            SiteOutcome::Culled(Selection::Fringe) => stats.fringe += 1,
            SiteOutcome::Culled(_) => stats.below_threshold += 1,
            SiteOutcome::Unbounded => stats.unbounded += 1,
            SiteOutcome::Empty => stats.empty += 1,
        }
    }

    Ok((cells, stats))
}

/// A generated cellular surface
///
/// Holds everything one pipeline run produced. Generating again with a
/// different configuration yields a new surface; nothing is updated in place.
///
/// # Examples
///
/// ```
/// use rust_voronoi_surface::*;
///
/// let config = SurfaceConfigBuilder::new()
///     .seed(42)
///     .bounds(10.0, 10.0)
///     .unwrap()
///     .site_count(80)
///     .unwrap()
///     .algorithm(SamplingAlgorithm::BestCandidate { candidates: 10 })
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let surface = CellularSurface::generate(config).unwrap();
/// for cell in surface.cells() {
///     println!("site {} -> {} triangles", cell.site_index, cell.mesh.triangle_count());
/// }
/// ```
#[derive(Clone)]
pub struct CellularSurface {
    /// Configuration used to generate this surface
    config: SurfaceConfig,

    /// Seed the noise field was built with
    noise_seed: u32,

    /// Diagram of all sampled sites (owns the site list)
    diagram: Diagram,

    /// Materialized cells in ascending site order
    cells: Vec<SurfaceCell>,

    /// What happened to each site
    stats: CellStats,

    /// Nearest-site lookup (optional, requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl CellularSurface {
    /// Generate a surface with the default subdivision and Perlin noise
    ///
    /// # Errors
    ///
    /// `InvalidConfig` before any sampling when the configuration is invalid;
    /// subdivision failures are passed through unchanged.
    pub fn generate(config: SurfaceConfig) -> Result<Self> {
        Self::generate_with(config, &HullSubdivision)
    }

    /// Generate a surface with a custom planar subdivision
    pub fn generate_with<S: PlanarSubdivision>(
        config: SurfaceConfig,
        subdivision: &S,
    ) -> Result<Self> {
        Self::generate_with_noise(config, subdivision, PerlinNoiseField::new)
    }

    /// Generate a surface with a custom subdivision and noise field
    ///
    /// `make_noise` receives the resolved noise seed: the configured override,
    /// or the next integer of the site random stream after sampling.
    pub fn generate_with_noise<S, N, F>(
        config: SurfaceConfig,
        subdivision: &S,
        make_noise: F,
    ) -> Result<Self>
    where
        S: PlanarSubdivision,
        N: NoiseField,
        F: FnOnce(u32) -> N,
    {
        config.validate()?;
        let total_start = Instant::now();

        let mut rng = RandomSource::new(config.seed);
        let sample_start = Instant::now();
        let sites = sample_sites(config.algorithm, config.site_count, &config.bounds, &mut rng)?;
        let noise_seed = config.noise_seed.unwrap_or_else(|| rng.next_int() as u32);
        log::debug!(
            "sampled {} sites ({}) in {:?}",
            sites.len(),
            config.algorithm.name(),
            sample_start.elapsed()
        );

        let subdivision_start = Instant::now();
        let diagram = subdivision.build(&sites)?;
        diagram.validate()?;
        if diagram.sites != sites {
            return Err(SurfaceError::InvalidDiagram(format!(
                "diagram sites do not match the {} sampled sites",
                sites.len()
            )));
        }
        log::debug!(
            "subdivision: {} vertices, {} edges in {:?}",
            diagram.vertices.len(),
            diagram.edges.len(),
            subdivision_start.elapsed()
        );

        let noise = make_noise(noise_seed);
        let selector = CellSelector::from_config(&noise, &config);
        let cells_start = Instant::now();
        let (cells, stats) = build_cells(&diagram, &selector)?;
        log::debug!("cells built in {:?}", cells_start.elapsed());

        log::info!(
            "surface seed={} sites={} kept={} fringe={} below_threshold={} \
             unbounded={} empty={} total={:?}",
            config.seed,
            diagram.site_count(),
            stats.kept,
            stats.fringe,
            stats.below_threshold,
            stats.unbounded,
            stats.empty,
            total_start.elapsed()
        );

        #[cfg(feature = "spatial-index")]
        let spatial_index = SpatialIndex::new(&diagram.sites);

        Ok(Self {
            config,
            noise_seed,
            diagram,
            cells,
            stats,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Get the configuration used to generate this surface
    #[inline]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Get the seed the noise field was built with
    #[inline]
    pub fn noise_seed(&self) -> u32 {
        self.noise_seed
    }

    /// All sampled sites, in index order
    #[inline]
    pub fn sites(&self) -> &[DVec2] {
        &self.diagram.sites
    }

    /// Get the number of sampled sites
    #[inline]
    pub fn site_count(&self) -> usize {
        self.diagram.site_count()
    }

    /// The planar subdivision of the sites
    #[inline]
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Materialized cells, ascending by site index
    #[inline]
    pub fn cells(&self) -> &[SurfaceCell] {
        &self.cells
    }

    /// Get the number of materialized cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Selection and extraction tally of the run
    #[inline]
    pub fn stats(&self) -> CellStats {
        self.stats
    }

    /// Get the materialized cell of a site
    ///
    /// Returns `None` if the site was culled, its cell was open, or the
    /// index is out of range.
    pub fn cell(&self, site_index: usize) -> Option<&SurfaceCell> {
        self.cells
            .binary_search_by_key(&site_index, |cell| cell.site_index)
            .ok()
            .map(|i| &self.cells[i])
    }

    /// Boundary of any site, including culled ones
    pub fn boundary(&self, site_index: usize) -> Result<CellBoundary> {
        extract_loop(&self.diagram, site_index)
    }

    /// Merge every cell mesh into one buffer
    pub fn combined_mesh(&self) -> CellMesh {
        let mut mesh = CellMesh::default();
        for cell in &self.cells {
            mesh.append(&cell.mesh);
        }
        mesh
    }

    /// Consume the surface, keeping only the `(site index, mesh)` pairs
    pub fn into_meshes(self) -> Vec<(usize, CellMesh)> {
        self.cells
            .into_iter()
            .map(|cell| (cell.site_index, cell.mesh))
            .collect()
    }

    /// Find the site whose Voronoi cell contains a position (requires spatial-index feature)
    ///
    /// The cell may not be materialized; check with [`cell`](Self::cell).
    #[cfg(feature = "spatial-index")]
    pub fn find_site_at(&self, position: DVec2) -> usize {
        self.spatial_index.find_nearest(position)
    }
}

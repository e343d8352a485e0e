//! Surface Configuration and Builder
//!
//! This module provides configuration types for deterministic cellular surface generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::DVec2;

use crate::error::{Result, SurfaceError};

/// Largest allowed fringe margin (fraction of each axis)
pub const MAX_FRINGE: f64 = 0.5;

/// Rectangular sampling domain `[0, width] x [0, height]`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Extent along the x axis
    pub width: f64,
    /// Extent along the y axis
    pub height: f64,
}

impl Bounds {
    /// Create bounds from a width and height
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Bounds as a vector `(width, height)`
    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Map a domain position into `[0, 1] x [0, 1]`
    #[inline]
    pub fn normalize(&self, position: DVec2) -> DVec2 {
        position / self.size()
    }

    /// Check whether a position lies inside the domain (edges included)
    pub fn contains(&self, position: DVec2) -> bool {
        position.x >= 0.0
            && position.y >= 0.0
            && position.x <= self.width
            && position.y <= self.height
    }

    fn validate(&self) -> Result<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(SurfaceError::InvalidConfig(format!(
                "bounds must be finite and positive (got {} x {})",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::new(1.0, 1.0)
    }
}

/// Site distribution strategy
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingAlgorithm {
    /// Independent uniform points (white noise)
    #[default]
    UniformRandom,
    /// Mitchell's best-candidate: keep the farthest of `candidates` random points per site
    BestCandidate {
        /// Candidate pool drawn for every site after the first
        candidates: usize,
    },
}

impl SamplingAlgorithm {
    /// Get a human-readable name for this algorithm
    pub fn name(self) -> &'static str {
        match self {
            SamplingAlgorithm::UniformRandom => "UniformRandom",
            SamplingAlgorithm::BestCandidate { .. } => "BestCandidate",
        }
    }

    fn validate(&self) -> Result<()> {
        if let SamplingAlgorithm::BestCandidate { candidates } = *self {
            if candidates < 1 {
                return Err(SurfaceError::InvalidConfig(format!(
                    "best-candidate pool must be >= 1 (got {})",
                    candidates
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for deterministic surface generation
///
/// The same configuration always produces the identical set of sites and
/// cell meshes. Only the configuration needs to be stored; the surface is
/// regenerated from it wholesale.
///
/// # Example
///
/// ```rust
/// use rust_voronoi_surface::*;
///
/// let config = SurfaceConfigBuilder::new()
///     .seed(42)
///     .bounds(10.0, 10.0)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: SurfaceConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config.seed, restored.seed);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    /// Seed for site sampling
    pub seed: u32,

    /// Sampling domain
    pub bounds: Bounds,

    /// Site distribution strategy
    pub algorithm: SamplingAlgorithm,

    /// Number of sites to sample
    pub site_count: usize,

    /// Explicit noise seed
    ///
    /// When `None`, the noise seed is drawn from the site random stream
    /// right after sampling, so it still follows `seed`.
    pub noise_seed: Option<u32>,

    /// Frequency multiplier applied to normalized site coordinates before sampling noise
    pub noise_scale: f64,

    /// Sites whose noise sample falls below this value are culled
    ///
    /// Noise lies in [-1, 1]: -1.0 or lower keeps every cell, above 1.0 culls all of them.
    pub site_threshold: f64,

    /// Margin (fraction of each axis) inside which sites are always culled
    pub fringe_amount: f64,
}

impl SurfaceConfig {
    /// Check every invariant the pipeline relies on
    pub fn validate(&self) -> Result<()> {
        if self.site_count < 1 {
            return Err(SurfaceError::InvalidConfig(format!(
                "site count must be >= 1 (got {})",
                self.site_count
            )));
        }
        self.algorithm.validate()?;
        self.bounds.validate()?;
        validate_fringe(self.fringe_amount)?;
        if !self.noise_scale.is_finite() {
            return Err(SurfaceError::InvalidConfig(format!(
                "noise scale must be finite (got {})",
                self.noise_scale
            )));
        }
        if self.site_threshold.is_nan() {
            return Err(SurfaceError::InvalidConfig("site threshold must not be NaN".into()));
        }
        Ok(())
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        let builder = SurfaceConfigBuilder::new();
        SurfaceConfig {
            seed: rand::random(),
            bounds: builder.bounds,
            algorithm: builder.algorithm,
            site_count: builder.site_count,
            noise_seed: None,
            noise_scale: builder.noise_scale,
            site_threshold: builder.site_threshold,
            fringe_amount: builder.fringe_amount,
        }
    }
}

fn validate_fringe(fringe: f64) -> Result<()> {
    if !(0.0..=MAX_FRINGE).contains(&fringe) {
        return Err(SurfaceError::InvalidConfig(format!(
            "fringe amount must be within [0, {}] (got {})",
            MAX_FRINGE, fringe
        )));
    }
    Ok(())
}

/// Builder for creating SurfaceConfig with validation
///
/// # Example
///
/// ```rust
/// use rust_voronoi_surface::*;
///
/// let config = SurfaceConfigBuilder::new()
///     .seed(12345)
///     .site_count(60)
///     .unwrap()
///     .algorithm(SamplingAlgorithm::BestCandidate { candidates: 10 })
///     .unwrap()
///     .fringe_amount(0.05)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.site_count, 60);
/// ```
#[derive(Debug, Clone)]
pub struct SurfaceConfigBuilder {
    seed: Option<u32>,
    bounds: Bounds,
    algorithm: SamplingAlgorithm,
    site_count: usize,
    noise_seed: Option<u32>,
    noise_scale: f64,
    site_threshold: f64,
    fringe_amount: f64,
}

impl SurfaceConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - bounds: 1 x 1
    /// - algorithm: UniformRandom
    /// - site_count: 40
    /// - noise_seed: derived from the site stream
    /// - noise_scale: 4.0
    /// - site_threshold: 0.0
    /// - fringe_amount: 0.1
    pub fn new() -> Self {
        Self {
            seed: None,
            bounds: Bounds::default(),
            algorithm: SamplingAlgorithm::default(),
            site_count: 40,
            noise_seed: None,
            noise_scale: 4.0,
            site_threshold: 0.0,
            fringe_amount: 0.1,
        }
    }

    /// Set the random seed for site sampling
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the sampling domain
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either extent is not a finite positive number
    pub fn bounds(mut self, width: f64, height: f64) -> Result<Self> {
        let bounds = Bounds::new(width, height);
        bounds.validate()?;
        self.bounds = bounds;
        Ok(self)
    }

    /// Set the site distribution strategy
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a best-candidate pool is empty
    pub fn algorithm(mut self, algorithm: SamplingAlgorithm) -> Result<Self> {
        algorithm.validate()?;
        self.algorithm = algorithm;
        Ok(self)
    }

    /// Set the number of sites
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if count is 0
    pub fn site_count(mut self, count: usize) -> Result<Self> {
        if count < 1 {
            return Err(SurfaceError::InvalidConfig(format!(
                "site count must be >= 1 (got {})",
                count
            )));
        }
        self.site_count = count;
        Ok(self)
    }

    /// Set an explicit noise seed instead of deriving it from the site stream
    ///
    /// Keeps the coverage pattern fixed while the site layout changes.
    pub fn noise_seed(mut self, seed: u32) -> Self {
        self.noise_seed = Some(seed);
        self
    }

    /// Set the noise frequency multiplier
    pub fn noise_scale(mut self, scale: f64) -> Self {
        self.noise_scale = scale;
        self
    }

    /// Set the culling threshold
    pub fn site_threshold(mut self, threshold: f64) -> Self {
        self.site_threshold = threshold;
        self
    }

    /// Set the boundary margin
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if fringe is outside [0, 0.5]
    pub fn fringe_amount(mut self, fringe: f64) -> Result<Self> {
        validate_fringe(fringe)?;
        self.fringe_amount = fringe;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<SurfaceConfig> {
        let config = SurfaceConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            bounds: self.bounds,
            algorithm: self.algorithm,
            site_count: self.site_count,
            noise_seed: self.noise_seed,
            noise_scale: self.noise_scale,
            site_threshold: self.site_threshold,
            fringe_amount: self.fringe_amount,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for SurfaceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

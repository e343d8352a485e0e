//! Noise-driven cell selection
//!
//! Decides per site whether its cell is materialized. Sites inside the
//! boundary fringe are always dropped (cells there are the ones the
//! subdivision leaves open or stretches toward the domain edge); the rest
//! survive when the noise field at their normalized position reaches the
//! threshold, which carves the surface into island-like clusters.

use glam::DVec2;

use crate::config::{Bounds, SurfaceConfig};
use crate::noise::NoiseField;

/// Outcome of a selection decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// Materialize the cell
    Keep,
    /// Site lies within the boundary fringe
    Fringe,
    /// Noise sample fell below the threshold
    BelowThreshold {
        /// The noise value that was sampled
        sample: f64,
    },
}

impl Selection {
    /// Check if the cell should be materialized
    #[inline]
    pub fn is_kept(&self) -> bool {
        matches!(self, Selection::Keep)
    }
}

/// Pure per-site selection policy
///
/// Holds only read-only state, so one selector can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct CellSelector<'a, N> {
    noise: &'a N,
    bounds: Bounds,
    noise_scale: f64,
    threshold: f64,
    fringe: f64,
}

impl<'a, N: NoiseField> CellSelector<'a, N> {
    /// Create a selector from explicit parameters
    pub fn new(
        noise: &'a N,
        bounds: Bounds,
        noise_scale: f64,
        threshold: f64,
        fringe: f64,
    ) -> Self {
        Self {
            noise,
            bounds,
            noise_scale,
            threshold,
            fringe,
        }
    }

    /// Create a selector using the selection fields of a configuration
    pub fn from_config(noise: &'a N, config: &SurfaceConfig) -> Self {
        Self::new(
            noise,
            config.bounds,
            config.noise_scale,
            config.site_threshold,
            config.fringe_amount,
        )
    }

    /// Decide whether the cell of the site at `position` is kept
    ///
    /// With normalized coordinates `(u, v)`:
    /// - `u` or `v` below `fringe` or above `1 - fringe` → [`Selection::Fringe`]
    /// - `noise(u * scale, v * scale) < threshold` → [`Selection::BelowThreshold`]
    /// - otherwise [`Selection::Keep`]
    pub fn decide(&self, position: DVec2) -> Selection {
        let uv = self.bounds.normalize(position);
        let upper = 1.0 - self.fringe;
        if uv.x < self.fringe || uv.y < self.fringe || uv.x > upper || uv.y > upper {
            return Selection::Fringe;
        }

        let sample = self
            .noise
            .evaluate(uv.x * self.noise_scale, uv.y * self.noise_scale);
        if sample < self.threshold {
            Selection::BelowThreshold { sample }
        } else {
            Selection::Keep
        }
    }
}

//! Coherent noise fields used for cell selection

mod perlin;

pub use perlin::{perlin_2d, sample_perlin_fbm};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Deterministic, continuous 2D scalar field
///
/// Values lie approximately in [-1, 1]; the same field evaluated at the same
/// coordinates always returns the same value.
pub trait NoiseField: Send + Sync {
    /// Sample the field at `(x, y)`
    fn evaluate(&self, x: f64, y: f64) -> f64;
}

/// Octave configuration for [`PerlinNoiseField`]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerlinConfig {
    /// Number of layers (at least one is always sampled)
    pub octaves: usize,
    /// Amplitude decay per octave (controls roughness)
    pub persistence: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
}

impl Default for PerlinConfig {
    fn default() -> Self {
        Self {
            octaves: 1,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Seeded Perlin noise field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerlinNoiseField {
    /// Seed for noise generation
    pub seed: u32,
    /// Octave configuration
    pub config: PerlinConfig,
}

impl PerlinNoiseField {
    /// Create a single-octave field with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            config: PerlinConfig::default(),
        }
    }

    /// Create a field with custom octaves
    pub fn with_config(seed: u32, config: PerlinConfig) -> Self {
        Self { seed, config }
    }
}

impl NoiseField for PerlinNoiseField {
    fn evaluate(&self, x: f64, y: f64) -> f64 {
        let value = sample_perlin_fbm(
            x,
            y,
            self.seed,
            self.config.octaves,
            self.config.persistence,
            self.config.lacunarity,
        );
        value.clamp(-1.0, 1.0)
    }
}

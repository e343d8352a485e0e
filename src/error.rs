//! Error types for cellular surface generation

use thiserror::Error;

/// Errors that can occur during surface generation or queries
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SurfaceError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The planar subdivision could not be built for the given sites
    #[error("generation failed: {0}")]
    GenerationFailed(String),
    /// A diagram does not satisfy the per-site edge grouping contract
    #[error("invalid diagram: {0}")]
    InvalidDiagram(String),
    /// Requested site index does not exist
    #[error("site not found: {0}")]
    SiteNotFound(usize),
}

/// Result type alias for surface operations
pub type Result<T> = std::result::Result<T, SurfaceError>;

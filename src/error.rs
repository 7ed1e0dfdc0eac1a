//! Error types for planet texture generation

use thiserror::Error;

/// Errors that can occur while generating planet textures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TextureError {
    /// A generation parameter is out of its valid range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// Raster buffers could not be allocated at the requested resolution
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),
    /// Generated buffers could not be wrapped into textures
    #[error("generation failed: {0}")]
    GenerationFailed(String),
    /// Generation was cancelled or exceeded its deadline
    #[error("generation cancelled")]
    Cancelled,
}

/// Result type alias for texture operations
pub type Result<T> = std::result::Result<T, TextureError>;

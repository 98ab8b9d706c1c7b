//! Error types for leptonica-transform

use thiserror::Error;

/// Errors that can occur during geometric transformations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] leptonica_core::Error),

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Singular matrix (non-invertible)
    #[error("singular transformation matrix")]
    SingularMatrix,
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;

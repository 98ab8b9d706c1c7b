//! Error types for leptonica-dewarp

use thiserror::Error;

/// Errors that can occur while building a dewarp model
#[derive(Debug, Error)]
pub enum DewarpError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] leptonica_core::Error),

    /// Morphology library error
    #[error("morphology error: {0}")]
    Morph(#[from] leptonica_morph::MorphError),

    /// Region library error
    #[error("region error: {0}")]
    Region(#[from] leptonica_region::RegionError),

    /// Transform library error
    #[error("transform error: {0}")]
    Transform(#[from] leptonica_transform::TransformError),

    /// Image I/O error
    #[error("I/O error: {0}")]
    Io(#[from] leptonica_io::IoError),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Too few lines survived extraction and filtering
    #[error("insufficient lines: found {found}, need at least {required}")]
    InsufficientLines { found: usize, required: usize },

    /// The lines do not span enough of the page height
    #[error("invalid line coverage: top = {top}, bottom = {bottom}, height = {height}")]
    InvalidCoverage { top: f32, bottom: f32, height: u32 },

    /// Not enough long lines with agreeing edges for a horizontal model
    #[error("no long lines: {0}")]
    NoLongLines(String),
}

/// Result type for dewarp operations
pub type DewarpResult<T> = Result<T, DewarpError>;

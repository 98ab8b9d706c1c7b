//! Leptonica - Image processing library for Rust
//!
//! This is a Rust port of the parts of the [Leptonica](http://www.leptonica.org/)
//! image processing library needed to build document dewarping models.
//!
//! # Overview
//!
//! - Core containers: `Pix`, `Pta`/`Ptaa`, `Numa`, `FPix`, `Box`/`Boxa`, `Pixa`
//! - Least-squares curve fitting and Gauss-Jordan solve
//! - Binary morphology with brick structuring elements and sequence strings
//! - Connected components and seed fill
//! - Orthogonal rotation and affine coefficient solve
//! - PNG I/O
//! - Dewarp model building from textlines or ruled lines
//!
//! # Example
//!
//! ```
//! use leptonica::{Pix, PixelDepth};
//! use leptonica::dewarp::{DewarpOptions, build_page_model};
//!
//! // A blank page has no textlines to model
//! let pix = Pix::new(640, 480, PixelDepth::Bit1).unwrap();
//! assert!(build_page_model(&pix, &DewarpOptions::default()).is_err());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use leptonica_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use leptonica_dewarp as dewarp;
pub use leptonica_io as io;
pub use leptonica_morph as morph;
pub use leptonica_region as region;
pub use leptonica_transform as transform;

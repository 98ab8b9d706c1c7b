//! leptonica-transform - Geometric transformations for Leptonica
//!
//! This crate provides:
//!
//! - Orthogonal rotations (90, 180, 270 degrees) of `Pix` and `FPix`
//! - Affine coefficients from three point correspondences

pub mod affine;
mod error;
pub mod rotate;

pub use affine::{AffineMatrix, affine_xform_coeffs};
pub use error::{TransformError, TransformResult};
pub use rotate::{rotate_90, rotate_180, rotate_orth, rotate_orth_fpix};

//! leptonica-morph - Binary morphology for image processing
//!
//! This crate provides:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Binary morphology: erosion, dilation, opening, closing
//! - Edge-safe closing with brick structuring elements
//! - Morphological sequences for chaining brick operations from a string

pub mod binary;
mod error;
pub mod sel;
pub mod sequence;

pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};

pub use binary::{
    close, close_brick, close_safe_brick, dilate, dilate_brick, erode, erode_brick, open,
    open_brick,
};
pub use sequence::{MorphOp, MorphSequence, morph_sequence};

//! Leptonica Core - Basic data structures for image processing
//!
//! This crate provides the fundamental data structures shared by the
//! other Leptonica crates:
//!
//! - [`Pix`] / [`PixMut`] - The main image container (immutable / mutable)
//! - [`Box`] / [`Boxa`] - Rectangle regions
//! - [`Pta`] / [`Ptaa`] - Point arrays, with least-squares fitting
//! - [`Numa`] - Numeric arrays
//! - [`FPix`] - Floating-point image
//! - [`Pixa`] - Arrays of images with their bounding boxes
//!
//! # See also
//!
//! C Leptonica: `pix.h`, `box.h`, `pts.h`, `environ.h` (struct definitions)

pub mod box_;
pub mod error;
pub mod fpix;
pub mod numa;
pub mod pix;
pub mod pixa;
pub mod pta;

pub use box_::{Box, Boxa};
pub use error::{Error, Result};
pub use fpix::FPix;
pub use numa::{Numa, SortOrder};
pub use pix::rop::RopOp;
pub use pix::{Pix, PixMut, PixelDepth};
pub use pixa::{Pixa, SizeRelation, SizeSelectType};
pub use pta::{Pta, Ptaa, SortBy, apply_linear_fit, apply_quadratic_fit, gauss_jordan};

/// Color channel helpers for 32-bit RGB pixels.
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
///
/// # See also
///
/// C Leptonica: color component macros in `pix.h`
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | (255 << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (
            ((pixel >> RED_SHIFT) & 0xff) as u8,
            ((pixel >> GREEN_SHIFT) & 0xff) as u8,
            ((pixel >> BLUE_SHIFT) & 0xff) as u8,
        )
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_compose_extract() {
            let p = compose_rgb(200, 16, 3);
            assert_eq!(p, 0xc810_03ff);
            assert_eq!(extract_rgb(p), (200, 16, 3));
        }
    }
}

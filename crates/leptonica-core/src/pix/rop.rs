//! Raster operations (ROP)
//!
//! Bitwise combination of two equal-sized images and rectangle fills:
//!
//! - AND, OR, XOR, subtract (binary operations on two images)
//! - Region clear and set operations
//!
//! # See also
//!
//! C Leptonica: `rop.c`, `pixAnd()` / `pixOr()` / `pixXor()` / `pixSubtract()` in `pix3.c`

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

/// Raster operation combining a source into a destination.
///
/// # See also
///
/// C Leptonica: `PIX_*` ROP constants in `pix.h`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RopOp {
    /// Source AND destination
    SrcAndDst,
    /// Source OR destination
    SrcOrDst,
    /// Source XOR destination
    SrcXorDst,
    /// (NOT source) AND destination
    Subtract,
}

impl RopOp {
    #[inline]
    fn apply(self, src: u32, dst: u32) -> u32 {
        match self {
            RopOp::SrcAndDst => src & dst,
            RopOp::SrcOrDst => src | dst,
            RopOp::SrcXorDst => src ^ dst,
            RopOp::Subtract => !src & dst,
        }
    }
}

/// Mask selecting the valid pixel bits of the last word in a row.
///
/// Returns `u32::MAX` when the row fills its last word exactly.
pub fn end_mask(width: u32, depth: PixelDepth) -> u32 {
    let used = (u64::from(width) * u64::from(depth.bits()) % 32) as u32;
    if used == 0 {
        u32::MAX
    } else {
        u32::MAX << (32 - used)
    }
}

impl Pix {
    /// Bitwise AND of two images.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions or depths.
    pub fn and(&self, other: &Pix) -> Result<Pix> {
        self.rop(other, RopOp::SrcAndDst)
    }

    /// Bitwise OR of two images.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions or depths.
    pub fn or(&self, other: &Pix) -> Result<Pix> {
        self.rop(other, RopOp::SrcOrDst)
    }

    /// Bitwise XOR of two images.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions or depths.
    pub fn xor(&self, other: &Pix) -> Result<Pix> {
        self.rop(other, RopOp::SrcXorDst)
    }

    /// Pixels ON in `self` and OFF in `other`.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions or depths.
    pub fn subtract(&self, other: &Pix) -> Result<Pix> {
        let mut pm = self.to_mut();
        pm.rop_inplace(other, RopOp::Subtract)?;
        Ok(pm.into())
    }

    /// Apply `op` with `other` as source and a copy of `self` as destination.
    ///
    /// # Errors
    ///
    /// Returns error if the images differ in size or depth.
    pub fn rop(&self, other: &Pix, op: RopOp) -> Result<Pix> {
        let mut pm = self.to_mut();
        pm.rop_inplace(other, op)?;
        Ok(pm.into())
    }
}

impl PixMut {
    /// Apply a raster operation in-place, with `other` as the source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleDepths`] or [`Error::IncompatibleSizes`]
    /// when the two images do not match.
    pub fn rop_inplace(&mut self, other: &Pix, op: RopOp) -> Result<()> {
        if self.depth() != other.depth() {
            return Err(Error::IncompatibleDepths(
                self.depth().bits(),
                other.depth().bits(),
            ));
        }
        if self.width() != other.width() || self.height() != other.height() {
            return Err(Error::IncompatibleSizes(
                self.width(),
                self.height(),
                other.width(),
                other.height(),
            ));
        }
        for (d, &s) in self.data_mut().iter_mut().zip(other.data()) {
            *d = op.apply(s, *d);
        }
        self.clear_pad_bits();
        Ok(())
    }

    /// Set a rectangular region to the maximum pixel value, clipped to the image.
    pub fn set_region(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let val = self.depth().max_value();
        let xend = x.saturating_add(w).min(self.width());
        let yend = y.saturating_add(h).min(self.height());
        for yy in y..yend {
            for xx in x..xend {
                self.set_pixel_unchecked(xx, yy, val);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(w: u32, h: u32, r: (u32, u32, u32, u32)) -> Pix {
        let mut pm = Pix::new(w, h, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_region(r.0, r.1, r.2, r.3);
        pm.into()
    }

    #[test]
    fn test_end_mask() {
        assert_eq!(end_mask(32, PixelDepth::Bit1), u32::MAX);
        assert_eq!(end_mask(33, PixelDepth::Bit1), 0x8000_0000);
        assert_eq!(end_mask(5, PixelDepth::Bit8), 0xFF00_0000);
    }

    #[test]
    fn test_xor_and_or() {
        let a = rect(50, 20, (0, 0, 30, 20));
        let b = rect(50, 20, (20, 0, 30, 20));
        assert_eq!(a.xor(&b).unwrap().count_pixels().unwrap(), 40 * 20);
        assert_eq!(a.and(&b).unwrap().count_pixels().unwrap(), 10 * 20);
        assert_eq!(a.or(&b).unwrap().count_pixels().unwrap(), 50 * 20);
        assert_eq!(a.subtract(&b).unwrap().count_pixels().unwrap(), 20 * 20);
    }

    #[test]
    fn test_rop_size_mismatch() {
        let a = rect(50, 20, (0, 0, 1, 1));
        let b = rect(51, 20, (0, 0, 1, 1));
        assert!(a.xor(&b).is_err());
    }

    #[test]
    fn test_region_is_clipped() {
        let pix = rect(10, 10, (5, 5, 100, 100));
        assert_eq!(pix.count_pixels().unwrap(), 25);
    }
}

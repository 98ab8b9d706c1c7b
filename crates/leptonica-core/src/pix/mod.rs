//! PIX - The main image container
//!
//! The `Pix` structure is the fundamental image type in Leptonica.
//! It supports 1, 2, 4, 8, 16 and 32 bpp pixel depths.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Pixels are packed MSB to LSB within each word
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.
//!
//! # See also
//!
//! - C Leptonica: `pix.h` (struct `Pix`), `pix1.c` (creation/destruction)
//! - Pixel access: `GET_DATA_*` / `SET_DATA_*` macros in `arrayaccess.h`

mod access;
pub mod rop;

pub use access::*;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
///
/// # See also
///
/// C Leptonica: `pix.h` depth field (1, 2, 4, 8, 16, 32)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary image
    Bit1 = 1,
    /// 2-bit image (4 levels)
    Bit2 = 2,
    /// 4-bit image (16 levels)
    Bit4 = 4,
    /// 8-bit grayscale
    Bit8 = 8,
    /// 16-bit grayscale
    Bit16 = 16,
    /// 32-bit RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 1, 2, 4, 8, 16, or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            2 => Ok(PixelDepth::Bit2),
            4 => Ok(PixelDepth::Bit4),
            8 => Ok(PixelDepth::Bit8),
            16 => Ok(PixelDepth::Bit16),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum pixel value representable at this depth.
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            _ => (1u32 << self.bits()) - 1,
        }
    }
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    width: u32,
    height: u32,
    depth: PixelDepth,
    /// 32-bit words per line
    wpl: u32,
    /// X resolution (ppi), 0 if unknown
    xres: i32,
    /// Y resolution (ppi), 0 if unknown
    yres: i32,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

impl PixData {
    fn duplicate(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            depth: self.depth,
            wpl: self.wpl,
            xres: self.xres,
            yres: self.yres,
            data: self.data.clone(),
        }
    }
}

/// PIX - Main image container
///
/// `Pix` is the fundamental image type in Leptonica. It uses reference
/// counting via `Arc` for cheap cloning.
///
/// # Examples
///
/// ```
/// use leptonica_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit1).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.wpl(), 20);
/// ```
///
/// # See also
///
/// C Leptonica: `struct Pix` in `pix.h`, creation via `pixCreate()` in `pix1.c`
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixCreate()` in `pix1.c`
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = Self::compute_wpl(width, depth)?;
        let data = vec![0u32; (wpl as usize) * (height as usize)];

        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                depth,
                wpl,
                xres: 0,
                yres: 0,
                data,
            }),
        })
    }

    /// Compute words per line for given width and depth.
    fn compute_wpl(width: u32, depth: PixelDepth) -> Result<u32> {
        let bits_per_line = u64::from(width) * u64::from(depth.bits());
        u32::try_from(bits_per_line.div_ceil(32)).map_err(|_| Error::InvalidDimension {
            width,
            height: 0,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the X resolution (ppi).
    #[inline]
    pub fn xres(&self) -> i32 {
        self.inner.xres
    }

    /// Get the Y resolution (ppi).
    #[inline]
    pub fn yres(&self) -> i32 {
        self.inner.yres
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get the words of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        &self.inner.data[start..start + self.inner.wpl as usize]
    }


    /// Check whether two images have the same width, height and depth.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixSizesEqual()` in `pix1.c`
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.depth() == other.depth()
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(self.inner.duplicate()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: self.inner.duplicate(),
        }
    }

    /// Count the ON pixels of a 1 bpp image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for depths other than 1.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixCountPixels()` in `pix3.c`
    pub fn count_pixels(&self) -> Result<u64> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let mask = rop::end_mask(self.width(), self.depth());
        let last = self.wpl() as usize - 1;
        let mut count = 0u64;
        for y in 0..self.height() {
            for (i, &word) in self.row_data(y).iter().enumerate() {
                let word = if i == last { word & mask } else { word };
                count += u64::from(word.count_ones());
            }
        }
        Ok(count)
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Set the X and Y resolution.
    pub fn set_resolution(&mut self, xres: i32, yres: i32) {
        self.inner.xres = xres;
        self.inner.yres = yres;
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get the words of a specific row.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        &self.inner.data[start..start + self.inner.wpl as usize]
    }

    /// Get mutable words of a specific row.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.wpl) as usize;
        let wpl = self.inner.wpl as usize;
        &mut self.inner.data[start..start + wpl]
    }

    /// Zero the bits beyond the image width in the last word of every row.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixSetPadBits()` in `pix2.c` (with val = 0)
    pub fn clear_pad_bits(&mut self) {
        let mask = rop::end_mask(self.width(), self.depth());
        if mask == u32::MAX {
            return;
        }
        let wpl = self.inner.wpl as usize;
        for row in self.inner.data.chunks_exact_mut(wpl) {
            row[wpl - 1] &= mask;
        }
    }

    /// Clear all pixels to zero.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }

    /// Set all pixels to one (all bits set), leaving the pad bits clear.
    pub fn set_all(&mut self) {
        self.inner.data.fill(0xFFFFFFFF);
        self.clear_pad_bits();
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_depth() {
        assert_eq!(PixelDepth::from_bits(1).unwrap(), PixelDepth::Bit1);
        assert_eq!(PixelDepth::from_bits(32).unwrap(), PixelDepth::Bit32);
        assert!(PixelDepth::from_bits(3).is_err());
        assert_eq!(PixelDepth::Bit8.max_value(), 255);
        assert_eq!(PixelDepth::Bit1.max_value(), 1);
    }

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200, PixelDepth::Bit8).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.wpl(), 25);
        assert!(Pix::new(0, 100, PixelDepth::Bit8).is_err());
        assert!(Pix::new(100, 0, PixelDepth::Bit1).is_err());
    }

    #[test]
    fn test_wpl_calculation() {
        assert_eq!(Pix::new(32, 1, PixelDepth::Bit1).unwrap().wpl(), 1);
        assert_eq!(Pix::new(33, 1, PixelDepth::Bit1).unwrap().wpl(), 2);
        assert_eq!(Pix::new(10, 1, PixelDepth::Bit32).unwrap().wpl(), 10);
    }

    #[test]
    fn test_pix_clone_shares_data() {
        let pix1 = Pix::new(100, 100, PixelDepth::Bit1).unwrap();
        let pix2 = pix1.clone();
        assert_eq!(pix1.ref_count(), 2);
        assert_eq!(pix1.data().as_ptr(), pix2.data().as_ptr());

        let pix3 = pix1.deep_clone();
        assert_eq!(pix3.ref_count(), 1);
        assert_ne!(pix1.data().as_ptr(), pix3.data().as_ptr());
    }

    #[test]
    fn test_try_into_mut_requires_unique() {
        let pix = Pix::new(10, 10, PixelDepth::Bit1).unwrap();
        let shared = pix.clone();
        let pix = pix.try_into_mut().unwrap_err();
        drop(shared);
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_resolution(300, 300);
        let pix: Pix = pm.into();
        assert_eq!(pix.xres(), 300);
    }

    #[test]
    fn test_set_all_keeps_pad_bits_clear() {
        let mut pm = Pix::new(40, 3, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_all();
        assert_eq!(pm.row_data(0)[1], 0xFF00_0000);
        let pix: Pix = pm.into();
        assert_eq!(pix.count_pixels().unwrap(), 120);
    }
}

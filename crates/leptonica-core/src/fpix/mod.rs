//! FPix - Floating-point image
//!
//! `FPix` is a 2D array of `f32` values. The dewarp code stores sampled
//! disparity grids in it: one value per sampling-grid point.
//!
//! # Examples
//!
//! ```
//! use leptonica_core::FPix;
//!
//! let mut fpix = FPix::new(8, 4).unwrap();
//! fpix.set_pixel(3, 2, 0.5).unwrap();
//! assert_eq!(fpix.get_pixel(3, 2).unwrap(), 0.5);
//! ```

use crate::error::{Error, Result};

/// Floating-point image
///
/// Data is stored in row-major order with no padding. The value at (x, y)
/// is at index `y * width + x`.
///
/// # See also
///
/// C Leptonica: `struct FPix` in `pix.h`, `fpixCreate()` in `fpix1.c`
#[derive(Debug, Clone, PartialEq)]
pub struct FPix {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl FPix {
    /// Create a new FPix with all values set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new FPix with all values set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(FPix {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a FPix from row-major data
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` for a zero dimension, and
    /// `Error::InvalidParameter` if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} != {width}x{height}",
                data.len()
            )));
        }
        Ok(FPix {
            width,
            height,
            data,
        })
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if the coordinates are outside.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + x as usize,
                len: self.data.len(),
            });
        }
        Ok(self.get_pixel_unchecked(x, y))
    }

    /// Set the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if the coordinates are outside.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + x as usize,
                len: self.data.len(),
            });
        }
        self.set_pixel_unchecked(x, y, value);
        Ok(())
    }

    /// Get the value at (x, y) without bounds checking beyond the slice's own
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Set the value at (x, y) without bounds checking beyond the slice's own
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.data[idx] = value;
    }

    /// All values, row-major
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// All values, row-major, mutable
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// One row of values
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[f32] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Minimum value
    pub fn min_value(&self) -> Option<f32> {
        self.data.iter().copied().reduce(f32::min)
    }

    /// Maximum value
    pub fn max_value(&self) -> Option<f32> {
        self.data.iter().copied().reduce(f32::max)
    }
}

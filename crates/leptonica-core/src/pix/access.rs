//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//! These correspond to Leptonica's `GET_DATA_*` and `SET_DATA_*` macros
//! in `arrayaccess.h`.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word. For example,
//! in a 1-bit image, pixel 0 occupies bit 31 (MSB) of the first word.
//!
//! # See also
//!
//! C Leptonica: `arrayaccess.h` (macros), `pix2.c` (`pixGetPixel` / `pixSetPixel`)

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixGetPixel()` in `pix2.c`
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or the row is too short for `x`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_data_value(self.row_data(y), x, self.depth())
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_data_value(self.row_data(y), x, self.depth())
    }

    /// Set a pixel value at (x, y).
    ///
    /// The value is masked to the pixel depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixSetPixel()` in `pix2.c`
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or the row is too short for `x`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        set_data_value(self.row_data_mut(y), x, depth, val);
    }
}

/// Read the pixel at column `x` of a packed row, for any depth.
#[inline]
pub fn get_data_value(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit1 => get_data_bit(line, x),
        PixelDepth::Bit2 => get_data_dibit(line, x),
        PixelDepth::Bit4 => get_data_qbit(line, x),
        PixelDepth::Bit8 => get_data_byte(line, x),
        PixelDepth::Bit16 => get_data_two_bytes(line, x),
        PixelDepth::Bit32 => line[x as usize],
    }
}

/// Write the pixel at column `x` of a packed row, for any depth.
#[inline]
pub fn set_data_value(line: &mut [u32], x: u32, depth: PixelDepth, val: u32) {
    match depth {
        PixelDepth::Bit1 => set_data_bit(line, x, val),
        PixelDepth::Bit2 => set_data_dibit(line, x, val),
        PixelDepth::Bit4 => set_data_qbit(line, x, val),
        PixelDepth::Bit8 => set_data_byte(line, x, val),
        PixelDepth::Bit16 => set_data_two_bytes(line, x, val),
        PixelDepth::Bit32 => line[x as usize] = val,
    }
}

/// Get a 1-bit pixel value.
///
/// # See also
///
/// C Leptonica: `GET_DATA_BIT` macro in `arrayaccess.h`
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1
}

/// Set a 1-bit pixel value (any nonzero `val` sets the bit).
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 5) as usize];
    let bit = 0x8000_0000u32 >> (x & 31);
    if val != 0 {
        *word |= bit;
    } else {
        *word &= !bit;
    }
}

/// Get a 2-bit pixel value.
#[inline]
pub fn get_data_dibit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 4) as usize] >> (2 * (15 - (x & 15)))) & 3
}

/// Set a 2-bit pixel value.
#[inline]
pub fn set_data_dibit(line: &mut [u32], x: u32, val: u32) {
    let shift = 2 * (15 - (x & 15));
    let word = &mut line[(x >> 4) as usize];
    *word = (*word & !(3 << shift)) | ((val & 3) << shift);
}

/// Get a 4-bit pixel value.
#[inline]
pub fn get_data_qbit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 3) as usize] >> (4 * (7 - (x & 7)))) & 0xf
}

/// Set a 4-bit pixel value.
#[inline]
pub fn set_data_qbit(line: &mut [u32], x: u32, val: u32) {
    let shift = 4 * (7 - (x & 7));
    let word = &mut line[(x >> 3) as usize];
    *word = (*word & !(0xf << shift)) | ((val & 0xf) << shift);
}

/// Get an 8-bit pixel value.
#[inline]
pub fn get_data_byte(line: &[u32], x: u32) -> u32 {
    (line[(x >> 2) as usize] >> (8 * (3 - (x & 3)))) & 0xff
}

/// Set an 8-bit pixel value.
#[inline]
pub fn set_data_byte(line: &mut [u32], x: u32, val: u32) {
    let shift = 8 * (3 - (x & 3));
    let word = &mut line[(x >> 2) as usize];
    *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
}

/// Get a 16-bit pixel value.
#[inline]
pub fn get_data_two_bytes(line: &[u32], x: u32) -> u32 {
    (line[(x >> 1) as usize] >> (16 * (1 - (x & 1)))) & 0xffff
}

/// Set a 16-bit pixel value.
#[inline]
pub fn set_data_two_bytes(line: &mut [u32], x: u32, val: u32) {
    let shift = 16 * (1 - (x & 1));
    let word = &mut line[(x >> 1) as usize];
    *word = (*word & !(0xffff << shift)) | ((val & 0xffff) << shift);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_packing_is_msb_first() {
        let mut line = [0u32; 2];
        set_data_bit(&mut line, 0, 1);
        set_data_bit(&mut line, 33, 1);
        assert_eq!(line[0], 0x8000_0000);
        assert_eq!(line[1], 0x4000_0000);
        assert_eq!(get_data_bit(&line, 33), 1);
        set_data_bit(&mut line, 0, 0);
        assert_eq!(line[0], 0);
    }

    #[test]
    fn test_set_get_all_depths() {
        for depth in [
            PixelDepth::Bit1,
            PixelDepth::Bit2,
            PixelDepth::Bit4,
            PixelDepth::Bit8,
            PixelDepth::Bit16,
            PixelDepth::Bit32,
        ] {
            let mut pm = Pix::new(37, 5, depth).unwrap().to_mut();
            let max = depth.max_value();
            for x in 0..37 {
                pm.set_pixel(x, 2, x % (max.min(36) + 1)).unwrap();
            }
            let pix: Pix = pm.into();
            for x in 0..37 {
                assert_eq!(pix.get_pixel(x, 2), Some(x % (max.min(36) + 1)));
                assert_eq!(pix.get_pixel(x, 1), Some(0));
            }
        }
    }

    #[test]
    fn test_out_of_bounds() {
        let mut pm = Pix::new(10, 10, PixelDepth::Bit8).unwrap().to_mut();
        assert!(pm.set_pixel(10, 0, 1).is_err());
        assert!(pm.set_pixel(0, 10, 1).is_err());
        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(10, 0), None);
    }
}

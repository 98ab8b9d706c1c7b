//! Seed fill operations
//!
//! Binary morphological reconstruction: grow a seed image inside a mask,
//! keeping every mask component that the seed touches.

use crate::conncomp::ConnectivityType;
use crate::error::{RegionError, RegionResult};
use leptonica_core::{Pix, PixelDepth};
use std::collections::VecDeque;

/// Seed fill for binary images
///
/// Returns the union of the connected components of `mask` that contain
/// at least one ON pixel of `seed`. Seed pixels outside the mask are
/// dropped. Both images must be 1 bpp and the same size.
///
/// C equivalent: `pixSeedfillBinary(NULL, seed, mask, connectivity)` in `seedfill.c`
pub fn seedfill_binary(
    seed: &Pix,
    mask: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<Pix> {
    for pix in [seed, mask] {
        if pix.depth() != PixelDepth::Bit1 {
            return Err(RegionError::UnsupportedDepth {
                expected: "1-bit",
                actual: pix.depth().bits(),
            });
        }
    }
    if !seed.sizes_equal(mask) {
        return Err(RegionError::InvalidParameters(format!(
            "seed {}x{} and mask {}x{} differ in size",
            seed.width(),
            seed.height(),
            mask.width(),
            mask.height()
        )));
    }

    let (w, h) = (mask.width(), mask.height());
    let mut out = seed.and(mask)?.to_mut();
    let mut queue = VecDeque::new();
    for y in 0..h {
        for x in 0..w {
            if out.get_pixel_unchecked(x, y) != 0 {
                queue.push_back((x, y));
            }
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        for &(dx, dy) in connectivity.offsets() {
            let (nx, ny) = (x as i32 + dx, y as i32 + dy);
            if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if out.get_pixel_unchecked(nx, ny) == 0 && mask.get_pixel_unchecked(nx, ny) != 0 {
                out.set_pixel_unchecked(nx, ny, 1);
                queue.push_back((nx, ny));
            }
        }
    }

    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_pix(w: u32, h: u32, on: &[(u32, u32)]) -> Pix {
        let mut pm = Pix::new(w, h, PixelDepth::Bit1).unwrap().to_mut();
        for &(x, y) in on {
            pm.set_pixel(x, y, 1).unwrap();
        }
        pm.into()
    }

    #[test]
    fn test_fill_reaches_whole_component() {
        // Two bars in the mask; the seed touches only the first
        let mut pm = Pix::new(20, 10, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_region(2, 2, 10, 2);
        pm.set_region(2, 6, 10, 2);
        let mask: Pix = pm.into();
        let seed = make_pix(20, 10, &[(5, 3), (15, 9)]);

        let out = seedfill_binary(&seed, &mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(out.count_pixels().unwrap(), 20);
        assert_eq!(out.get_pixel(11, 2), Some(1));
        assert_eq!(out.get_pixel(5, 6), Some(0));
        assert_eq!(out.get_pixel(15, 9), Some(0));
    }

    #[test]
    fn test_connectivity_matters() {
        let mask = make_pix(4, 4, &[(0, 0), (1, 1), (2, 2)]);
        let seed = make_pix(4, 4, &[(0, 0)]);
        let four = seedfill_binary(&seed, &mask, ConnectivityType::FourWay).unwrap();
        let eight = seedfill_binary(&seed, &mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(four.count_pixels().unwrap(), 1);
        assert_eq!(eight.count_pixels().unwrap(), 3);
    }

    #[test]
    fn test_size_mismatch() {
        let a = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        let b = Pix::new(5, 4, PixelDepth::Bit1).unwrap();
        assert!(seedfill_binary(&a, &b, ConnectivityType::FourWay).is_err());
    }
}

//! Orthogonal rotation of images and float images
//!
//! Rotations are by multiples of 90 degrees, so they are exact pixel
//! permutations. `quads` counts clockwise quarter turns.
//!
//! # See also
//!
//! C Leptonica: `rotateorth.c` (`pixRotateOrth`), `fpix2.c` (`fpixRotateOrth`)

use crate::TransformResult;
use leptonica_core::{FPix, Pix};

/// Rotate an image by 90-degree increments
///
/// # Arguments
/// * `pix` - Input image
/// * `quads` - Number of 90-degree clockwise rotations (taken mod 4)
///
/// C equivalent: `pixRotateOrth()`
pub fn rotate_orth(pix: &Pix, quads: u32) -> TransformResult<Pix> {
    match quads % 4 {
        0 => Ok(pix.deep_clone()),
        1 => rotate_90(pix, true),
        2 => rotate_180(pix),
        _ => rotate_90(pix, false),
    }
}

/// Rotate an image 90 degrees
///
/// Clockwise, pixel `(x, y)` of a `w x h` image lands at `(h - 1 - y, x)`;
/// counterclockwise at `(y, w - 1 - x)`.
pub fn rotate_90(pix: &Pix, clockwise: bool) -> TransformResult<Pix> {
    let (w, h) = (pix.width(), pix.height());
    let mut out = Pix::new(h, w, pix.depth())?.to_mut();
    out.set_resolution(pix.yres(), pix.xres());

    for y in 0..h {
        for x in 0..w {
            let (nx, ny) = rotated_90(x, y, w, h, clockwise);
            out.set_pixel_unchecked(nx, ny, pix.get_pixel_unchecked(x, y));
        }
    }
    Ok(out.into())
}

/// Rotate an image 180 degrees
pub fn rotate_180(pix: &Pix) -> TransformResult<Pix> {
    let (w, h) = (pix.width(), pix.height());
    let mut out = Pix::new(w, h, pix.depth())?.to_mut();
    out.set_resolution(pix.xres(), pix.yres());

    for y in 0..h {
        for x in 0..w {
            out.set_pixel_unchecked(w - 1 - x, h - 1 - y, pix.get_pixel_unchecked(x, y));
        }
    }
    Ok(out.into())
}

/// Rotate a float image by 90-degree increments
///
/// Same geometry as [`rotate_orth`].
///
/// C equivalent: `fpixRotateOrth()`
pub fn rotate_orth_fpix(fpix: &FPix, quads: u32) -> TransformResult<FPix> {
    let (w, h) = fpix.dimensions();
    let quads = quads % 4;
    let mut out = match quads {
        1 | 3 => FPix::new(h, w)?,
        _ => FPix::new(w, h)?,
    };

    for y in 0..h {
        for x in 0..w {
            let (nx, ny) = match quads {
                0 => (x, y),
                1 => rotated_90(x, y, w, h, true),
                2 => (w - 1 - x, h - 1 - y),
                _ => rotated_90(x, y, w, h, false),
            };
            out.set_pixel_unchecked(nx, ny, fpix.get_pixel_unchecked(x, y));
        }
    }
    Ok(out)
}

#[inline]
fn rotated_90(x: u32, y: u32, w: u32, h: u32, clockwise: bool) -> (u32, u32) {
    if clockwise {
        (h - 1 - y, x)
    } else {
        (y, w - 1 - x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptonica_core::PixelDepth;

    fn make_gray() -> Pix {
        let mut pm = Pix::new(3, 2, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..2 {
            for x in 0..3 {
                pm.set_pixel(x, y, 10 * y + x).unwrap();
            }
        }
        pm.into()
    }

    #[test]
    fn test_rotate_90_clockwise() {
        // 0 1 2        10 0
        // 10 11 12 ->  11 1
        //              12 2
        let r = rotate_orth(&make_gray(), 1).unwrap();
        assert_eq!((r.width(), r.height()), (2, 3));
        assert_eq!(r.get_pixel(0, 0), Some(10));
        assert_eq!(r.get_pixel(1, 0), Some(0));
        assert_eq!(r.get_pixel(1, 2), Some(2));
    }

    #[test]
    fn test_rotate_round_trip() {
        let pix = make_gray();
        let cw = rotate_orth(&pix, 1).unwrap();
        let back = rotate_orth(&cw, 3).unwrap();
        assert_eq!(back.data(), pix.data());
        let half = rotate_orth(&rotate_orth(&pix, 2).unwrap(), 2).unwrap();
        assert_eq!(half.data(), pix.data());
    }

    #[test]
    fn test_rotate_binary() {
        let mut pm = Pix::new(40, 3, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_pixel(39, 0, 1).unwrap();
        let r = rotate_orth(&pm.into(), 1).unwrap();
        assert_eq!((r.width(), r.height()), (3, 40));
        assert_eq!(r.get_pixel(2, 39), Some(1));
        assert_eq!(r.count_pixels().unwrap(), 1);
    }

    #[test]
    fn test_rotate_fpix_matches_pix() {
        let fpix = FPix::from_data(3, 2, vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]).unwrap();
        let cw = rotate_orth_fpix(&fpix, 1).unwrap();
        assert_eq!(cw.dimensions(), (2, 3));
        assert_eq!(cw.get_pixel(0, 0).unwrap(), 10.0);
        assert_eq!(cw.get_pixel(1, 2).unwrap(), 2.0);
        let ccw = rotate_orth_fpix(&cw, 3).unwrap();
        assert_eq!(ccw, fpix);
    }
}

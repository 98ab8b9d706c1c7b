//! Binary morphological operations
//!
//! Implements erosion, dilation, opening, and closing for 1-bpp images
//! with word-level rasterops. Pixels outside the image are treated as OFF
//! for both erosion and dilation (Leptonica's asymmetric boundary
//! condition).

use crate::{MorphError, MorphResult, Sel};
use leptonica_core::{Pix, PixMut, PixelDepth};

/// Dilate a binary image using rasterop (word-level shift-and-OR)
///
/// Dilation expands foreground regions. For each hit offset (dx, dy) in
/// the SEL, the source is shifted by that offset and OR-ed into the output:
/// `dst(x, y) |= src(x - dx, y - dy)`.
///
/// C equivalent: `pixDilate()` in `morph.c`
pub fn dilate(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;
    let h = pix.height() as i32;
    let wpl = pix.wpl() as usize;
    let mut out = Pix::new(pix.width(), pix.height(), PixelDepth::Bit1)?.to_mut();

    let src = pix.data();
    let dst = out.data_mut();
    for (dx, dy) in sel.hit_offsets() {
        for y in 0..h {
            let sy = y - dy;
            if sy < 0 || sy >= h {
                continue;
            }
            let (d, s) = (y as usize * wpl, sy as usize * wpl);
            shift_or_row(&mut dst[d..d + wpl], &src[s..s + wpl], dx);
        }
    }

    out.clear_pad_bits();
    Ok(out.into())
}

/// Erode a binary image using rasterop (word-level shift-and-AND)
///
/// Erosion shrinks foreground regions: a pixel stays ON only if every hit
/// of the SEL placed on it lands on an ON pixel,
/// `dst(x, y) = AND src(x + dx, y + dy)`. Hits that fall outside the image
/// clear the pixel.
///
/// C equivalent: `pixErode()` in `morph.c`
pub fn erode(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;
    let h = pix.height() as i32;
    let wpl = pix.wpl() as usize;
    let mut out = Pix::new(pix.width(), pix.height(), PixelDepth::Bit1)?.to_mut();
    out.set_all();

    let src = pix.data();
    let dst = out.data_mut();
    for (dx, dy) in sel.hit_offsets() {
        for y in 0..h {
            let d = y as usize * wpl;
            let sy = y + dy;
            if sy < 0 || sy >= h {
                dst[d..d + wpl].fill(0);
                continue;
            }
            let s = sy as usize * wpl;
            shift_and_row(&mut dst[d..d + wpl], &src[s..s + wpl], -dx);
        }
    }

    out.clear_pad_bits();
    Ok(out.into())
}

/// Open a binary image
///
/// Opening = Erosion followed by Dilation.
/// Removes foreground smaller than the SEL.
pub fn open(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let eroded = erode(pix, sel)?;
    dilate(&eroded, sel)
}

/// Close a binary image
///
/// Closing = Dilation followed by Erosion.
/// Fills background gaps smaller than the SEL.
pub fn close(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate(pix, sel)?;
    erode(&dilated, sel)
}

/// Dilate with a `width x height` brick, as a horizontal then vertical pass
///
/// C equivalent: `pixDilateBrick()` in `morph.c`
pub fn dilate_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    check_binary(pix)?;
    if width == 1 && height == 1 {
        return Ok(pix.clone());
    }
    let tmp = dilate_1d(pix, width, true)?;
    dilate_1d(&tmp, height, false)
}

/// Erode with a `width x height` brick, as a horizontal then vertical pass
///
/// C equivalent: `pixErodeBrick()` in `morph.c`
pub fn erode_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    check_binary(pix)?;
    if width == 1 && height == 1 {
        return Ok(pix.clone());
    }
    let tmp = erode_1d(pix, width, true)?;
    erode_1d(&tmp, height, false)
}

/// Open with a brick structuring element
///
/// C equivalent: `pixOpenBrick()` in `morph.c`
pub fn open_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    let eroded = erode_brick(pix, width, height)?;
    dilate_brick(&eroded, width, height)
}

/// Close with a brick structuring element
///
/// Foreground within half a brick of the image edge can be eroded away,
/// because the dilation cannot extend past the edge. Use
/// [`close_safe_brick`] to avoid that.
///
/// C equivalent: `pixCloseBrick()` in `morph.c`
pub fn close_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    let dilated = dilate_brick(pix, width, height)?;
    erode_brick(&dilated, width, height)
}

/// Close with a brick, padding the image first so nothing near the edge
/// is lost.
///
/// The border is the half-extent of the brick rounded up to a whole
/// number of 32-bit words, and is stripped again afterwards.
///
/// C equivalent: `pixCloseSafeBrick()` in `morph.c`
pub fn close_safe_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    check_binary(pix)?;
    if width == 1 && height == 1 {
        return Ok(pix.clone());
    }
    let maxtrans = (width / 2).max(height / 2);
    let bordsize = maxtrans.div_ceil(32) * 32;
    if bordsize == 0 {
        return close_brick(pix, width, height);
    }
    let padded = add_border(pix, bordsize)?;
    let closed = close_brick(&padded, width, height)?;
    remove_border(&closed, bordsize, pix.width(), pix.height())
}

fn dilate_1d(pix: &Pix, size: u32, horizontal: bool) -> MorphResult<Pix> {
    if size <= 1 {
        return Ok(pix.clone());
    }
    let sel = if horizontal {
        Sel::create_horizontal(size)?
    } else {
        Sel::create_vertical(size)?
    };
    dilate(pix, &sel)
}

fn erode_1d(pix: &Pix, size: u32, horizontal: bool) -> MorphResult<Pix> {
    if size <= 1 {
        return Ok(pix.clone());
    }
    let sel = if horizontal {
        Sel::create_horizontal(size)?
    } else {
        Sel::create_vertical(size)?
    };
    erode(pix, &sel)
}

/// Shift `src` by `shift` pixels and OR into `dst`.
///
/// MSB-first bit ordering: pixel 0 is bit 31 of word 0. A positive shift
/// moves content right (`dst[x] |= src[x - shift]`), a negative shift
/// moves it left. Bits shifted in from outside the row are 0.
fn shift_or_row(dst: &mut [u32], src: &[u32], shift: i32) {
    let wpl = dst.len();
    let word_shift = shift.unsigned_abs() as usize / 32;
    let bit_shift = shift.unsigned_abs() % 32;
    if word_shift >= wpl {
        return;
    }
    for (i, d) in dst.iter_mut().enumerate() {
        *d |= shifted_word(src, i, word_shift, bit_shift, shift > 0);
    }
}

/// Shift `src` by `shift` pixels and AND into `dst`.
///
/// Same shift semantics as [`shift_or_row`]; bits shifted in from outside
/// the row are 0, so they clear `dst`.
fn shift_and_row(dst: &mut [u32], src: &[u32], shift: i32) {
    let wpl = dst.len();
    let word_shift = shift.unsigned_abs() as usize / 32;
    let bit_shift = shift.unsigned_abs() % 32;
    if word_shift >= wpl {
        dst.fill(0);
        return;
    }
    for (i, d) in dst.iter_mut().enumerate() {
        *d &= shifted_word(src, i, word_shift, bit_shift, shift > 0);
    }
}

/// Word `i` of `src` shifted right (`right == true`) or left by
/// `word_shift * 32 + bit_shift` bits, with zeros shifted in.
#[inline]
fn shifted_word(src: &[u32], i: usize, word_shift: usize, bit_shift: u32, right: bool) -> u32 {
    let wpl = src.len();
    let word = |k: Option<usize>| k.filter(|&k| k < wpl).map_or(0, |k| src[k]);
    if right {
        let hi = word(i.checked_sub(word_shift));
        if bit_shift == 0 {
            return hi;
        }
        let carry = word(i.checked_sub(word_shift + 1));
        (hi >> bit_shift) | (carry << (32 - bit_shift))
    } else {
        let lo = word(Some(i + word_shift));
        if bit_shift == 0 {
            return lo;
        }
        let carry = word(Some(i + word_shift + 1));
        (lo << bit_shift) | (carry >> (32 - bit_shift))
    }
}

/// Pad a binary image with `border` OFF pixels on every side.
///
/// `border` must be a multiple of 32 so rows can be copied word by word.
fn add_border(pix: &Pix, border: u32) -> MorphResult<Pix> {
    debug_assert!(border.is_multiple_of(32), "border must be word-aligned");
    let mut out = Pix::new(
        pix.width() + 2 * border,
        pix.height() + 2 * border,
        PixelDepth::Bit1,
    )?
    .to_mut();

    let left_words = (border / 32) as usize;
    let src_wpl = pix.wpl() as usize;
    for y in 0..pix.height() {
        let row = out.row_data_mut(y + border);
        row[left_words..left_words + src_wpl].copy_from_slice(pix.row_data(y));
    }
    Ok(out.into())
}

/// Strip `border` pixels from every side, restoring a `width x height` image.
fn remove_border(pix: &Pix, border: u32, width: u32, height: u32) -> MorphResult<Pix> {
    debug_assert!(border.is_multiple_of(32), "border must be word-aligned");
    let mut out: PixMut = Pix::new(width, height, PixelDepth::Bit1)?.to_mut();

    let left_words = (border / 32) as usize;
    let dst_wpl = out.wpl() as usize;
    for y in 0..height {
        let src = pix.row_data(y + border);
        out.row_data_mut(y)
            .copy_from_slice(&src[left_words..left_words + dst_wpl]);
    }
    out.clear_pad_bits();
    Ok(out.into())
}

/// Check that the image is binary (1-bpp)
pub(crate) fn check_binary(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

//! Text line detection and filtering for dewarping
//!
//! Textlines are found by solidifying words into bars with morphology,
//! then tracing the vertical centre of every wide component. The
//! resulting centrelines are filtered by length and checked for vertical
//! coverage of the page before any model is built.

use leptonica_core::{
    Box, Numa, Pix, PixelDepth, Pixa, Pta, Ptaa, SizeRelation, SizeSelectType, SortOrder,
};
use leptonica_morph::morph_sequence;
use leptonica_region::{ConnectivityType, conncomp_pixa, seedfill_binary};
use log::{debug, warn};

use crate::debug::{DewarpDebug, NoDebug};
use crate::{DewarpError, DewarpResult};

/// Find the centres of text lines in a binary image
///
/// Returns one centreline per text line, each holding `(x, mean y)` for
/// every column the line covers. Lines appear in the raster order of
/// their first pixel. An image without text gives an empty `Ptaa`.
///
/// # Arguments
///
/// * `pix` - Input binary image (1 bpp), foreground is ink
///
/// C equivalent: `dewarpGetTextlineCenters()` in `dewarp2.c`
pub fn get_textline_centers(pix: &Pix) -> DewarpResult<Ptaa> {
    find_textline_centers(pix, &mut NoDebug)
}

pub(crate) fn find_textline_centers(pix: &Pix, dbg: &mut dyn DewarpDebug) -> DewarpResult<Ptaa> {
    check_binary(pix)?;
    let w = pix.width();

    // Solidify textlines within the x-height region, dropping ascenders
    // and descenders, then join words along each line
    let csize1 = (w / 80).max(15);
    let csize2 = (w / 30).max(40);
    let sequence = format!("o1.3 + c{csize1}.1 + o{csize1}.1 + c{csize2}.1");
    let solid = morph_sequence(pix, &sequence)?;
    dbg.image("textline_solid", &solid);

    // Remove components with long vertical runs: embedded images
    let seed = morph_sequence(&solid, "e1.50")?;
    let tall = seedfill_binary(&seed, &solid, ConnectivityType::EightWay)?;
    let filtered = solid.xor(&tall)?;
    dbg.image("textline_no_tall", &filtered);

    let (_, pixa) = conncomp_pixa(&filtered, ConnectivityType::EightWay)?;
    let pixa = pixa.select_by_size(
        100,
        4,
        SizeSelectType::IfBoth,
        SizeRelation::GreaterThanOrEqual,
    );
    debug!("{} textline components", pixa.len());
    Ok(component_centers(&pixa))
}

/// Centreline of every 8-connected component, without size selection
pub(crate) fn find_component_centers(pix: &Pix) -> DewarpResult<Ptaa> {
    check_binary(pix)?;
    let (_, pixa) = conncomp_pixa(pix, ConnectivityType::EightWay)?;
    Ok(component_centers(&pixa))
}

fn component_centers(pixa: &Pixa) -> Ptaa {
    pixa.iter()
        .map(|(mask, b)| mean_verticals(mask, b))
        .filter(|pta| !pta.is_empty())
        .collect()
}

/// Mean y of the foreground in each column of a component mask
///
/// Empty columns are skipped. Points are in full-image coordinates.
///
/// C equivalent: `dewarpGetMeanVerticals()` in `dewarp2.c`
fn mean_verticals(mask: &Pix, b: &Box) -> Pta {
    let (w, h) = (mask.width(), mask.height());
    let mut pta = Pta::with_capacity(w as usize);

    for x in 0..w {
        let mut sum_y = 0u64;
        let mut count = 0u64;
        for y in 0..h {
            if mask.get_pixel_unchecked(x, y) != 0 {
                sum_y += y as u64;
                count += 1;
            }
        }
        if count > 0 {
            let mean_y = sum_y as f32 / count as f32;
            pta.push((b.x + x as i32) as f32, b.y as f32 + mean_y);
        }
    }
    pta
}

fn check_binary(pix: &Pix) -> DewarpResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(DewarpError::UnsupportedDepth {
            expected: "1 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Horizontal extent `max x - min x + 1` of a line; 0 for an empty line
pub(crate) fn line_length(pta: &Pta) -> f32 {
    pta.range()
        .map(|(xmin, xmax, _, _)| xmax - xmin + 1.0)
        .unwrap_or(0.0)
}

/// Indices of the longest values, longest first.
///
/// Keeps the longest and every following value while it is at least
/// `fract` of the longest, stopping at the first that is shorter.
pub(crate) fn select_longest(lengths: &Numa, fract: f32) -> Vec<usize> {
    let index = lengths.sort_index(SortOrder::Decreasing);
    let Some(&first) = index.first() else {
        return Vec::new();
    };
    let minlen = fract * lengths[first];
    index
        .into_iter()
        .take_while(|&i| lengths[i] >= minlen)
        .collect()
}

/// Remove lines shorter than a fraction of the longest line
///
/// Lines are sorted longest first; the longest is kept, then each next
/// line while its length is at least `fract` of the longest. The result
/// is in that longest-first order.
///
/// # Arguments
///
/// * `pix` - The image the lines came from (only its width is used)
/// * `lines` - Line centrelines
/// * `fract` - Minimum fraction of the longest length, typically 0.8
///
/// C equivalent: `dewarpRemoveShortLines()` in `dewarp2.c`
pub fn remove_short_lines(pix: &Pix, lines: &Ptaa, fract: f32) -> Ptaa {
    let lengths: Numa = lines.iter().map(line_length).collect();
    let keep = select_longest(&lengths, fract);
    if let Some(&first) = keep.first() {
        let maxlen = lengths[first];
        if maxlen < pix.width() as f32 / 2.0 {
            warn!(
                "longest line ({maxlen}) is less than half the image width ({})",
                pix.width()
            );
        }
    }
    lines.sort_by_index(&keep)
}

/// Check that the lines cover enough of the page height
///
/// Uses the y of each line's first point. Returns `(top, bottom, valid)`;
/// valid requires a line in each half of the page and a span of at least
/// 40% of the height. An empty set is never valid.
///
/// C equivalent: `dewarpIsLineCoverageValid()` in `dewarp2.c`
pub fn is_line_coverage_valid(lines: &Ptaa, height: u32) -> (f32, f32, bool) {
    let mut top = f32::INFINITY;
    let mut bottom = f32::NEG_INFINITY;
    for pta in lines.iter() {
        if let Some(y) = pta.get_y(0) {
            top = top.min(y);
            bottom = bottom.max(y);
        }
    }
    if top > bottom {
        return (0.0, 0.0, false);
    }

    let h = height as f32;
    let valid = top < 0.5 * h && bottom > 0.5 * h && bottom - top >= 0.4 * h;
    (top, bottom, valid)
}

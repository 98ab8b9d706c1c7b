//! Page model building
//!
//! The page model comes from text lines: lines are extracted, filtered and
//! checked before the vertical and horizontal disparities are built. The
//! line model is a calibration variant that uses ruled lines instead, with
//! vertical rules giving the horizontal disparity directly.

use leptonica_core::{Pix, PixelDepth, Ptaa};
use leptonica_morph::morph_sequence;
use leptonica_transform::rotate_orth;
use log::{debug, info, warn};

use crate::debug::{DewarpDebug, NoDebug};
use crate::horizontal::build_horiz_disparity;
use crate::textline::{
    find_component_centers, find_textline_centers, is_line_coverage_valid, remove_short_lines,
};
use crate::types::{Dewarp, DewarpOptions};
use crate::vertical::build_vert_disparity;
use crate::{DewarpError, DewarpResult};

/// Fraction of the longest text line a line must reach to be used
const TEXTLINE_LENGTH_FRACT: f32 = 0.8;

/// Fraction of the longest rule a rule must reach to be used
const RULE_LENGTH_FRACT: f32 = 0.75;

/// Opening size used when the requested one is too small
const DEFAULT_OPENING_SIZE: u32 = 8;

/// Build a dewarp model for a page of text
///
/// Returns an error only when no model can be attempted: a non-binary
/// image, too few long text lines, or lines that do not cover the page.
/// Failure to build either disparity is recorded in the model flags.
///
/// # Arguments
///
/// * `pix` - Binary page image (1 bpp), foreground is text
/// * `options` - Sampling, line count and validity limits
///
/// # Example
///
/// ```
/// use leptonica_core::{Pix, PixelDepth};
/// use leptonica_dewarp::{DewarpError, DewarpOptions, build_page_model};
///
/// let pix = Pix::new(600, 800, PixelDepth::Bit1).unwrap();
/// let result = build_page_model(&pix, &DewarpOptions::default());
/// assert!(matches!(result, Err(DewarpError::InsufficientLines { found: 0, .. })));
/// ```
///
/// C equivalent: `dewarpBuildPageModel()` in `dewarp2.c`
pub fn build_page_model(pix: &Pix, options: &DewarpOptions) -> DewarpResult<Dewarp> {
    build_page_model_with_debug(pix, options, &mut NoDebug)
}

/// [`build_page_model`] reporting intermediate results to `dbg`
pub fn build_page_model_with_debug(
    pix: &Pix,
    options: &DewarpOptions,
    dbg: &mut dyn DewarpDebug,
) -> DewarpResult<Dewarp> {
    let options = options.normalized()?;
    check_binary(pix)?;
    let mut dewarp = Dewarp::new(pix.width(), pix.height(), &options);

    let lines = find_textline_centers(pix, dbg)?;
    dbg.lines("textline_centers", &lines);
    let lines = remove_short_lines(pix, &lines, TEXTLINE_LENGTH_FRACT);
    dbg.lines("long_textlines", &lines);
    check_lines(&lines, pix.height(), options.min_lines)?;

    if let Err(e) = build_vert_disparity(&mut dewarp, &lines, false, dbg) {
        info!("vertical disparity not built: {e}");
    }
    if let Err(e) = build_horiz_disparity(&mut dewarp, &lines, dbg) {
        info!("horizontal disparity not built: {e}");
    }

    dewarp.check_validity();
    debug!("page model: {}", dewarp.summary());
    Ok(dewarp)
}

/// Build a dewarp model from a page of ruled lines
///
/// Horizontal rules give the vertical disparity. Vertical rules, found on
/// the page rotated by 90 degrees, give the horizontal disparity. Errors
/// are returned for a non-binary image and when the horizontal rules fail
/// the line count or coverage check; problems with the vertical rules only
/// leave the horizontal disparity unbuilt.
///
/// # Arguments
///
/// * `pix` - Binary image of the ruled page (1 bpp)
/// * `opening_size` - Minimum rule length kept by the opening; values
///   below 3 are replaced by 8
/// * `options` - Sampling, line count and validity limits
///
/// C equivalent: `dewarpBuildLineModel()` in `dewarp2.c`
pub fn build_line_model(
    pix: &Pix,
    opening_size: u32,
    options: &DewarpOptions,
) -> DewarpResult<Dewarp> {
    build_line_model_with_debug(pix, opening_size, options, &mut NoDebug)
}

/// [`build_line_model`] reporting intermediate results to `dbg`
pub fn build_line_model_with_debug(
    pix: &Pix,
    opening_size: u32,
    options: &DewarpOptions,
    dbg: &mut dyn DewarpDebug,
) -> DewarpResult<Dewarp> {
    let options = options.normalized()?;
    check_binary(pix)?;
    let opening_size = if opening_size < 3 {
        warn!("opening size {opening_size} too small; using {DEFAULT_OPENING_SIZE}");
        DEFAULT_OPENING_SIZE
    } else {
        opening_size
    };
    let close_size = opening_size - 2;
    let mut dewarp = Dewarp::new(pix.width(), pix.height(), &options);

    // Horizontal rules
    let horiz = morph_sequence(
        pix,
        &format!("d1.3 + c{close_size}.1 + o{opening_size}.1"),
    )?;
    dbg.image("horizontal_rules", &horiz);
    let lines = find_component_centers(&horiz)?;
    let lines = remove_short_lines(&horiz, &lines, RULE_LENGTH_FRACT);
    dbg.lines("horizontal_rules", &lines);
    check_lines(&lines, pix.height(), options.min_lines)?;
    if let Err(e) = build_vert_disparity(&mut dewarp, &lines, false, dbg) {
        info!("vertical disparity not built from rules: {e}");
    }

    // Vertical rules, as horizontal rules of the rotated image
    let vert = morph_sequence(
        pix,
        &format!("d3.1 + c1.{close_size} + o1.{opening_size}"),
    )?;
    let vert = rotate_orth(&vert, 1)?;
    dbg.image("vertical_rules", &vert);
    let lines = find_component_centers(&vert)?;
    let lines = remove_short_lines(&vert, &lines, RULE_LENGTH_FRACT);
    dbg.lines("vertical_rules", &lines);
    let built = check_lines(&lines, vert.height(), options.min_lines)
        .and_then(|()| build_vert_disparity(&mut dewarp, &lines, true, dbg));
    if let Err(e) = built {
        info!("horizontal disparity not built from rules: {e}");
    }

    dewarp.check_validity();
    debug!("line model: {}", dewarp.summary());
    Ok(dewarp)
}

/// Whether the vertical and horizontal disparities of a model were built
///
/// C equivalent: `dewarpaModelStatus()` in `dewarp4.c`
pub fn query_model_status(dewarp: &Dewarp) -> (bool, bool) {
    dewarp.status()
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

/// Line count and coverage checks run before any disparity is built
fn check_lines(lines: &Ptaa, height: u32, min_lines: u32) -> DewarpResult<()> {
    if lines.len() < min_lines as usize {
        info!("{} lines found; need {min_lines}", lines.len());
        return Err(DewarpError::InsufficientLines {
            found: lines.len(),
            required: min_lines as usize,
        });
    }
    let (top, bottom, valid) = is_line_coverage_valid(lines, height);
    if !valid {
        info!("lines from {top} to {bottom} do not cover height {height}");
        return Err(DewarpError::InvalidCoverage {
            top,
            bottom,
            height,
        });
    }
    Ok(())
}

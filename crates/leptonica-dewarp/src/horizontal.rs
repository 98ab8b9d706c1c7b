//! Horizontal disparity from the left and right text margins
//!
//! The endpoints of long lines trace the page margins. Each margin is fit
//! with a quadratic in the vertical direction; the horizontal shift of each
//! margin relative to its value at the middle row is then interpolated
//! linearly across every row.

use std::ops::Range;

use leptonica_core::{FPix, Numa, Pta, Ptaa, SortBy, SortOrder, apply_quadratic_fit};
use log::debug;

use crate::debug::{DewarpDebug, NoDebug};
use crate::textline::select_longest;
use crate::types::Dewarp;
use crate::{DewarpError, DewarpResult};

/// Minimum vertical span of the left endpoints, as a fraction of height
const MIN_ENDPOINT_SPAN: f32 = 0.45;

/// A left endpoint must lie this far into the page from the leftmost one
const LEFT_EDGE_FRACT: f32 = 0.15;

/// A right endpoint must lie beyond this fraction of the rightmost one
const RIGHT_EDGE_FRACT: f32 = 0.85;

/// Fraction of the longest line in each half a margin line must reach
const HALF_LENGTH_FRACT: f32 = 0.95;

/// Minimum lines surviving in each half of the page
const MIN_HALF_LINES: usize = 3;

/// Minimum ratio of the longest lines of the two halves
const MIN_HALF_RATIO: f32 = 0.85;

/// End points of one line: `(y, x)` on the left and on the right
#[derive(Debug, Clone, Copy)]
struct Endpoints {
    left: (f32, f32),
    right: (f32, f32),
}

impl Endpoints {
    fn of(pta: &Pta) -> Option<Self> {
        let mut pts = pta.iter();
        let first = pts.next()?;
        let (mut left, mut right) = (first, first);
        for (x, y) in pts {
            if x < left.0 {
                left = (x, y);
            }
            if x > right.0 {
                right = (x, y);
            }
        }
        Some(Self {
            left: (left.1, left.0),
            right: (right.1, right.0),
        })
    }

    fn length(&self) -> f32 {
        self.right.1 - self.left.1 + 1.0
    }
}

/// Margin fit with its derived diagnostics
struct EdgeFit {
    coeffs: (f32, f32, f32),
    slope: i32,
    curvature: i32,
}

impl EdgeFit {
    fn new(pts: &Pta) -> DewarpResult<Self> {
        let (c2, c1, c0, _) = pts.get_quadratic_lsf(false)?;
        Ok(Self {
            coeffs: (c2, c1, c0),
            slope: (1000.0 * c1).round() as i32,
            curvature: (1e6 * c2).round() as i32,
        })
    }

    /// Horizontal position of the margin at each sampled row
    fn sample(&self, ny: u32, sampling: u32) -> Vec<f32> {
        let (c2, c1, c0) = self.coeffs;
        (0..ny)
            .map(|i| apply_quadratic_fit(c2, c1, c0, (i * sampling) as f32))
            .collect()
    }
}

/// Build the sampled horizontal disparity of a page model
///
/// Uses the left and right ends of the longest lines as the page margins.
/// Fails with [`DewarpError::NoLongLines`] when the lines do not reach
/// the margins well enough in both halves of the page. On error the model
/// is left unchanged.
///
/// # Arguments
///
/// * `dewarp` - Page model to fill in
/// * `lines` - Filtered line centrelines
///
/// C equivalent: `dewarpFindHorizDisparity()` in `dewarp2.c`
pub fn find_horiz_disparity(dewarp: &mut Dewarp, lines: &Ptaa) -> DewarpResult<()> {
    build_horiz_disparity(dewarp, lines, &mut NoDebug)
}

pub(crate) fn build_horiz_disparity(
    dewarp: &mut Dewarp,
    lines: &Ptaa,
    dbg: &mut dyn DewarpDebug,
) -> DewarpResult<()> {
    let (w, h) = (dewarp.width as f32, dewarp.height as f32);
    let (nx, ny) = dewarp.grid_size();
    let sampling = dewarp.sampling();

    let ends: Vec<Endpoints> = lines.iter().filter_map(Endpoints::of).collect();
    let left_ys: Numa = ends.iter().map(|e| e.left.0).collect();
    let span = match (left_ys.min(), left_ys.max()) {
        (Some((top, _)), Some((bottom, _))) => bottom - top,
        _ => 0.0,
    };
    if span < MIN_ENDPOINT_SPAN * h {
        return Err(DewarpError::NoLongLines(format!(
            "line ends span {span} of height {h}"
        )));
    }

    let ends = select_edge_lines(ends, w);
    let ends = select_long_halves(ends)?;

    let left: Pta = ends.iter().map(|e| e.left).collect();
    let right: Pta = ends.iter().map(|e| e.right).collect();
    let edges: Ptaa = [left.clone(), right.clone()].into_iter().collect();
    dbg.lines("horiz_edges", &edges);
    let left = EdgeFit::new(&left)?;
    let right = EdgeFit::new(&right)?;
    debug!(
        "edge slopes {}/{}, curvatures {}/{} from {} lines",
        left.slope,
        right.slope,
        left.curvature,
        right.curvature,
        ends.len()
    );

    let left_x = left.sample(ny, sampling);
    let right_x = right.sample(ny, sampling);
    let mid = (ny / 2) as usize;
    let (ref_left, ref_right) = (left_x[mid], right_x[mid]);

    let mut grid = FPix::new(nx, ny)?;
    for i in 0..ny as usize {
        let row: Pta = [
            (ref_left, ref_left - left_x[i]),
            (ref_right, ref_right - right_x[i]),
        ]
        .into_iter()
        .collect();
        let (a, b, _) = row.get_linear_lsf(true, true, false)?;
        for j in 0..nx {
            grid.set_pixel_unchecked(j, i as u32, a * (j * sampling) as f32 + b);
        }
    }
    dbg.disparity("horiz_disparity", &grid);

    dewarp.left_slope = left.slope;
    dewarp.right_slope = right.slope;
    dewarp.left_curvature = left.curvature;
    dewarp.right_curvature = right.curvature;
    dewarp.sampled_h_disparity = Some(grid);
    dewarp.h_success = true;
    Ok(())
}

/// Keep lines that reach close to both the left and the right margin
fn select_edge_lines(ends: Vec<Endpoints>, width: f32) -> Vec<Endpoints> {
    let xmin = ends.iter().map(|e| e.left.1).fold(f32::INFINITY, f32::min);
    let xmax = ends.iter().map(|e| e.right.1).fold(f32::NEG_INFINITY, f32::max);
    let left_limit = xmin + LEFT_EDGE_FRACT * (width - xmin);
    let right_limit = RIGHT_EDGE_FRACT * xmax;

    let n = ends.len();
    let kept: Vec<_> = ends
        .into_iter()
        .filter(|e| e.left.1 < left_limit && e.right.1 > right_limit)
        .collect();
    debug!("{} of {n} lines reach both margins", kept.len());
    kept
}

/// Keep the longest lines of the top and bottom halves of the page
///
/// Lines are ordered top to bottom and split into halves of `ceil(n/2)`
/// lines, sharing the middle line when `n` is odd. The result is the union
/// of both selections, top to bottom.
fn select_long_halves(ends: Vec<Endpoints>) -> DewarpResult<Vec<Endpoints>> {
    let ys: Pta = ends.iter().map(|e| (e.left.1, e.left.0)).collect();
    let sorted: Vec<Endpoints> = ys
        .sort_index(SortBy::Y, SortOrder::Increasing)
        .into_iter()
        .map(|i| ends[i])
        .collect();
    let n = sorted.len();
    let half = n.div_ceil(2);

    let (top, top_max) = longest_in(&sorted, 0..half);
    let (bottom, bottom_max) = longest_in(&sorted, n - half..n);
    if top.len() < MIN_HALF_LINES || bottom.len() < MIN_HALF_LINES {
        return Err(DewarpError::NoLongLines(format!(
            "{} long lines in top half, {} in bottom half",
            top.len(),
            bottom.len()
        )));
    }
    let ratio = top_max.min(bottom_max) / top_max.max(bottom_max);
    if ratio < MIN_HALF_RATIO {
        return Err(DewarpError::NoLongLines(format!(
            "longest lines of the two halves differ: {top_max} vs {bottom_max}"
        )));
    }

    let mut selected: Vec<usize> = top.into_iter().chain(bottom).collect();
    selected.sort_unstable();
    selected.dedup();
    Ok(selected.into_iter().map(|i| sorted[i]).collect())
}

/// Positions within `range` of the longest lines, with the longest length
fn longest_in(sorted: &[Endpoints], range: Range<usize>) -> (Vec<usize>, f32) {
    let start = range.start;
    let lengths: Numa = sorted[range].iter().map(Endpoints::length).collect();
    let keep = select_longest(&lengths, HALF_LENGTH_FRACT);
    let max = keep.first().map_or(0.0, |&k| lengths[k]);
    (keep.into_iter().map(|k| start + k).collect(), max)
}

//! Dewarp type definitions
//!
//! Options, the per-page [`Dewarp`] model, its summary, and read access
//! to the sampled disparity grids.

use std::fmt;

use leptonica_core::{FPix, Numa};
use log::warn;

use crate::{DewarpError, DewarpResult};

/// Smallest sampling interval accepted by the builders
pub const MIN_SAMPLING: u32 = 8;

/// Smallest line count accepted by the builders
pub const MIN_LINES: u32 = 4;

/// Options for building dewarp models
///
/// These control sampling, the line-count gate, outlier rejection and the
/// limits used to decide whether a built model is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct DewarpOptions {
    /// Sampling interval for the disparity grids (default: 30)
    ///
    /// Larger values are faster but less accurate.
    /// Minimum allowed is 8.
    pub sampling: u32,

    /// Minimum number of lines required to build a model (default: 15)
    ///
    /// Minimum allowed is 4.
    pub min_lines: u32,

    /// Lines whose curvature is further than this many median absolute
    /// deviations from the median are dropped (default: 7.0)
    pub curvature_outlier_factor: f32,

    /// Maximum line curvature in micro-units (default: 150)
    pub max_line_curvature: i32,

    /// Maximum spread of line curvatures in micro-units (default: 200)
    pub max_diff_line_curvature: i32,

    /// Maximum edge slope in milli-units (default: 80)
    pub max_edge_slope: i32,

    /// Maximum edge curvature in micro-units (default: 50)
    pub max_edge_curvature: i32,

    /// Maximum difference of left and right edge curvature in
    /// micro-units (default: 40)
    pub max_diff_edge_curvature: i32,
}

impl Default for DewarpOptions {
    fn default() -> Self {
        Self {
            sampling: 30,
            min_lines: 15,
            curvature_outlier_factor: 7.0,
            max_line_curvature: 150,
            max_diff_line_curvature: 200,
            max_edge_slope: 80,
            max_edge_curvature: 50,
            max_diff_edge_curvature: 40,
        }
    }
}

impl DewarpOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampling interval
    pub fn with_sampling(mut self, sampling: u32) -> Self {
        self.sampling = clamp_sampling(sampling);
        self
    }

    /// Set the minimum number of lines
    pub fn with_min_lines(mut self, min_lines: u32) -> Self {
        self.min_lines = clamp_min_lines(min_lines);
        self
    }

    /// Set the curvature outlier factor
    pub fn with_curvature_outlier_factor(mut self, factor: f32) -> Self {
        self.curvature_outlier_factor = factor;
        self
    }

    /// Set the maximum line curvature and curvature spread (micro-units)
    pub fn with_max_line_curvature(mut self, max_curvature: i32, max_diff: i32) -> Self {
        self.max_line_curvature = max_curvature;
        self.max_diff_line_curvature = max_diff;
        self
    }

    /// Set the edge limits: slope (milli-units), curvature and
    /// left/right curvature difference (micro-units)
    pub fn with_max_edge(mut self, max_slope: i32, max_curvature: i32, max_diff: i32) -> Self {
        self.max_edge_slope = max_slope;
        self.max_edge_curvature = max_curvature;
        self.max_diff_edge_curvature = max_diff;
        self
    }

    /// Check the options for values no build can use.
    ///
    /// # Errors
    ///
    /// Returns [`DewarpError::InvalidParameter`] for a zero sampling
    /// interval or a non-positive outlier factor.
    pub fn validate(&self) -> DewarpResult<()> {
        if self.sampling == 0 {
            return Err(DewarpError::InvalidParameter(
                "sampling must be positive".to_string(),
            ));
        }
        if self.curvature_outlier_factor.is_nan() || self.curvature_outlier_factor <= 0.0 {
            return Err(DewarpError::InvalidParameter(format!(
                "curvature outlier factor must be positive; got {}",
                self.curvature_outlier_factor
            )));
        }
        Ok(())
    }

    /// Validated copy with sampling and line count raised to their minimums
    pub(crate) fn normalized(&self) -> DewarpResult<Self> {
        self.validate()?;
        let mut options = self.clone();
        options.sampling = clamp_sampling(options.sampling);
        options.min_lines = clamp_min_lines(options.min_lines);
        Ok(options)
    }
}

fn clamp_sampling(sampling: u32) -> u32 {
    if sampling < MIN_SAMPLING {
        warn!("sampling {sampling} too small; using {MIN_SAMPLING}");
        MIN_SAMPLING
    } else {
        sampling
    }
}

fn clamp_min_lines(min_lines: u32) -> u32 {
    if min_lines < MIN_LINES {
        warn!("min_lines {min_lines} too small; using {MIN_LINES}");
        MIN_LINES
    } else {
        min_lines
    }
}

/// Dewarp model for a single page
///
/// Holds the sampled disparity grids and the diagnostics gathered while
/// building them. Built by [`crate::build_page_model`] or
/// [`crate::build_line_model`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Dewarp {
    /// Original image width
    pub(crate) width: u32,

    /// Original image height
    pub(crate) height: u32,

    /// Number of grid columns, `ceil(width / sampling)`
    pub(crate) nx: u32,

    /// Number of grid rows, `ceil(height / sampling)`
    pub(crate) ny: u32,

    /// Options the model was built with
    pub(crate) options: DewarpOptions,

    /// Number of lines used for the vertical model
    pub(crate) n_lines: u32,

    /// Sampled vertical disparity array
    pub(crate) sampled_v_disparity: Option<FPix>,

    /// Sampled horizontal disparity array
    pub(crate) sampled_h_disparity: Option<FPix>,

    /// Minimum line curvature (micro-units)
    pub(crate) min_curvature: i32,

    /// Maximum line curvature (micro-units)
    pub(crate) max_curvature: i32,

    /// Left edge slope (milli-units)
    pub(crate) left_slope: i32,

    /// Right edge slope (milli-units)
    pub(crate) right_slope: i32,

    /// Left edge curvature (micro-units)
    pub(crate) left_curvature: i32,

    /// Right edge curvature (micro-units)
    pub(crate) right_curvature: i32,

    /// Mid-y of each line used, top to bottom
    pub(crate) mid_ys: Numa,

    /// Curvature of each line used, in the order of `mid_ys`
    pub(crate) curvatures: Numa,

    /// Vertical disparity model successfully built
    pub(crate) v_success: bool,

    /// Horizontal disparity model successfully built
    pub(crate) h_success: bool,

    /// Vertical model is within the curvature limits
    pub(crate) v_valid: bool,

    /// Horizontal model is within the edge limits
    pub(crate) h_valid: bool,
}

impl Dewarp {
    /// Create an empty model for a `width x height` image
    ///
    /// The sampling interval and line count come from `options`, raised
    /// to their minimums if needed.
    pub fn new(width: u32, height: u32, options: &DewarpOptions) -> Self {
        let mut options = options.clone();
        options.sampling = clamp_sampling(options.sampling);
        options.min_lines = clamp_min_lines(options.min_lines);
        let (nx, ny) = grid_size(width, height, options.sampling);

        Self {
            width,
            height,
            nx,
            ny,
            options,
            n_lines: 0,
            sampled_v_disparity: None,
            sampled_h_disparity: None,
            min_curvature: 0,
            max_curvature: 0,
            left_slope: 0,
            right_slope: 0,
            left_curvature: 0,
            right_curvature: 0,
            mid_ys: Numa::new(),
            curvatures: Numa::new(),
            v_success: false,
            h_success: false,
            v_valid: false,
            h_valid: false,
        }
    }

    /// Get the original image width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the original image height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the sampling interval
    pub fn sampling(&self) -> u32 {
        self.options.sampling
    }

    /// Get the grid size `(nx, ny)`
    pub fn grid_size(&self) -> (u32, u32) {
        (self.nx, self.ny)
    }

    /// Get the minimum number of lines
    pub fn min_lines(&self) -> u32 {
        self.options.min_lines
    }

    /// Get the options the model was built with
    pub fn options(&self) -> &DewarpOptions {
        &self.options
    }

    /// Get the number of lines used for the vertical model
    pub fn n_lines(&self) -> u32 {
        self.n_lines
    }

    /// Check if vertical disparity model was built successfully
    pub fn v_success(&self) -> bool {
        self.v_success
    }

    /// Check if horizontal disparity model was built successfully
    pub fn h_success(&self) -> bool {
        self.h_success
    }

    /// Check if vertical model is valid for rendering
    pub fn v_valid(&self) -> bool {
        self.v_valid
    }

    /// Check if horizontal model is valid for rendering
    pub fn h_valid(&self) -> bool {
        self.h_valid
    }

    /// Success flags `(vertical, horizontal)`
    pub fn status(&self) -> (bool, bool) {
        (self.v_success, self.h_success)
    }

    /// Get the minimum line curvature in micro-units
    pub fn min_curvature(&self) -> i32 {
        self.min_curvature
    }

    /// Get the maximum line curvature in micro-units
    pub fn max_curvature(&self) -> i32 {
        self.max_curvature
    }

    /// Left and right edge slopes in milli-units
    pub fn edge_slopes(&self) -> (i32, i32) {
        (self.left_slope, self.right_slope)
    }

    /// Left and right edge curvatures in micro-units
    pub fn edge_curvatures(&self) -> (i32, i32) {
        (self.left_curvature, self.right_curvature)
    }

    /// Mid-y values of the lines used, sorted top to bottom
    pub fn mid_ys(&self) -> &Numa {
        &self.mid_ys
    }

    /// Curvatures of the lines used, in the order of [`Dewarp::mid_ys`]
    pub fn curvatures(&self) -> &Numa {
        &self.curvatures
    }

    /// Get a reference to the sampled vertical disparity array
    pub fn sampled_v_disparity(&self) -> Option<&FPix> {
        self.sampled_v_disparity.as_ref()
    }

    /// Get a reference to the sampled horizontal disparity array
    pub fn sampled_h_disparity(&self) -> Option<&FPix> {
        self.sampled_h_disparity.as_ref()
    }

    /// Vertical disparity at full-resolution `(x, y)`
    ///
    /// `None` without a vertical model or outside the sampled area.
    pub fn v_disparity_at(&self, x: f32, y: f32, interp: Interpolation) -> Option<f32> {
        let grid = self.sampled_v_disparity.as_ref()?;
        sample_disparity(grid, self.options.sampling, x, y, interp)
    }

    /// Horizontal disparity at full-resolution `(x, y)`
    ///
    /// `None` without a horizontal model or outside the sampled area.
    pub fn h_disparity_at(&self, x: f32, y: f32, interp: Interpolation) -> Option<f32> {
        let grid = self.sampled_h_disparity.as_ref()?;
        sample_disparity(grid, self.options.sampling, x, y, interp)
    }

    /// Decide whether each built direction is within the option limits
    ///
    /// A direction that was not built is never valid.
    ///
    /// C equivalent: `dewarpaTestForValidModel()` in `dewarp4.c`
    pub fn check_validity(&mut self) {
        let o = &self.options;
        self.v_valid = self.v_success
            && self.min_curvature.abs() <= o.max_line_curvature
            && self.max_curvature.abs() <= o.max_line_curvature
            && self.max_curvature - self.min_curvature <= o.max_diff_line_curvature;

        self.h_valid = self.h_success
            && self.left_slope.abs() <= o.max_edge_slope
            && self.right_slope.abs() <= o.max_edge_slope
            && self.left_curvature.abs() <= o.max_edge_curvature
            && self.right_curvature.abs() <= o.max_edge_curvature
            && (self.left_curvature - self.right_curvature).abs() <= o.max_diff_edge_curvature;
    }

    /// Snapshot of flags and diagnostics
    pub fn summary(&self) -> DewarpSummary {
        DewarpSummary {
            width: self.width,
            height: self.height,
            n_lines: self.n_lines,
            v_success: self.v_success,
            h_success: self.h_success,
            v_valid: self.v_valid,
            h_valid: self.h_valid,
            min_curvature: self.min_curvature,
            max_curvature: self.max_curvature,
            left_slope: self.left_slope,
            right_slope: self.right_slope,
            left_curvature: self.left_curvature,
            right_curvature: self.right_curvature,
        }
    }
}

/// Grid size for an image and sampling interval: `ceil(w / s)` by
/// `ceil(h / s)`
pub(crate) fn grid_size(width: u32, height: u32, sampling: u32) -> (u32, u32) {
    (width.div_ceil(sampling), height.div_ceil(sampling))
}

/// Flags and diagnostics of a [`Dewarp`] model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DewarpSummary {
    pub width: u32,
    pub height: u32,
    pub n_lines: u32,
    pub v_success: bool,
    pub h_success: bool,
    pub v_valid: bool,
    pub h_valid: bool,
    /// Micro-units
    pub min_curvature: i32,
    /// Micro-units
    pub max_curvature: i32,
    /// Milli-units
    pub left_slope: i32,
    /// Milli-units
    pub right_slope: i32,
    /// Micro-units
    pub left_curvature: i32,
    /// Micro-units
    pub right_curvature: i32,
}

impl fmt::Display for DewarpSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = |success: bool, valid: bool| match (success, valid) {
            (false, _) => "none",
            (true, false) => "built (invalid)",
            (true, true) => "built (valid)",
        };
        write!(
            f,
            "{}x{} page, {} lines: vertical {}, horizontal {}; \
             line curvature [{}, {}] micro; \
             edge slope L {} R {} milli, edge curvature L {} R {} micro",
            self.width,
            self.height,
            self.n_lines,
            state(self.v_success, self.v_valid),
            state(self.h_success, self.h_valid),
            self.min_curvature,
            self.max_curvature,
            self.left_slope,
            self.right_slope,
            self.left_curvature,
            self.right_curvature
        )
    }
}

/// How to read a sampled disparity grid between samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Value of the closest sample
    Nearest,
    /// Weighted mean of the four surrounding samples
    #[default]
    Bilinear,
}

/// Read a sampled disparity grid at full-resolution `(x, y)`
///
/// Sample `(j, i)` sits at `(j * sampling, i * sampling)`. Each sample
/// covers the `sampling` pixels after it, so the last column and row hold
/// out to `nx * sampling` and `ny * sampling`. Coordinates that are
/// negative or past that extent return `None`.
pub fn sample_disparity(
    grid: &FPix,
    sampling: u32,
    x: f32,
    y: f32,
    interp: Interpolation,
) -> Option<f32> {
    let (nx, ny) = grid.dimensions();
    if sampling == 0 || nx == 0 || ny == 0 || !x.is_finite() || !y.is_finite() {
        return None;
    }
    let s = sampling as f32;
    if x < 0.0 || y < 0.0 || x >= (nx as f32) * s || y >= (ny as f32) * s {
        return None;
    }
    let (gx, gy) = (x / s, y / s);

    match interp {
        Interpolation::Nearest => {
            let j = ((gx + 0.5).floor() as u32).min(nx - 1);
            let i = ((gy + 0.5).floor() as u32).min(ny - 1);
            Some(grid.get_pixel_unchecked(j, i))
        }
        Interpolation::Bilinear => {
            let j0 = (gx.floor() as u32).min(nx - 1);
            let i0 = (gy.floor() as u32).min(ny - 1);
            let j1 = (j0 + 1).min(nx - 1);
            let i1 = (i0 + 1).min(ny - 1);
            let fx = gx - j0 as f32;
            let fy = gy - i0 as f32;

            let v00 = grid.get_pixel_unchecked(j0, i0);
            let v10 = grid.get_pixel_unchecked(j1, i0);
            let v01 = grid.get_pixel_unchecked(j0, i1);
            let v11 = grid.get_pixel_unchecked(j1, i1);

            Some(
                v00 * (1.0 - fx) * (1.0 - fy)
                    + v10 * fx * (1.0 - fy)
                    + v01 * (1.0 - fx) * fy
                    + v11 * fx * fy,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dewarp_options_default() {
        let opts = DewarpOptions::default();
        assert_eq!(opts.sampling, 30);
        assert_eq!(opts.min_lines, 15);
        assert_eq!(opts.curvature_outlier_factor, 7.0);
        assert_eq!(opts.max_line_curvature, 150);
        assert_eq!(opts.max_diff_line_curvature, 200);
        assert_eq!(opts.max_edge_slope, 80);
        assert_eq!(opts.max_edge_curvature, 50);
        assert_eq!(opts.max_diff_edge_curvature, 40);
    }

    #[test]
    fn test_dewarp_options_builder() {
        let opts = DewarpOptions::new()
            .with_sampling(20)
            .with_min_lines(10)
            .with_curvature_outlier_factor(3.0)
            .with_max_line_curvature(100, 120)
            .with_max_edge(60, 30, 20);

        assert_eq!(opts.sampling, 20);
        assert_eq!(opts.min_lines, 10);
        assert_eq!(opts.curvature_outlier_factor, 3.0);
        assert_eq!(opts.max_diff_line_curvature, 120);
        assert_eq!(opts.max_diff_edge_curvature, 20);
    }

    #[test]
    fn test_dewarp_options_validation() {
        // Sampling minimum is 8
        let opts = DewarpOptions::new().with_sampling(5);
        assert_eq!(opts.sampling, 8);

        // Min lines minimum is 4
        let opts = DewarpOptions::new().with_min_lines(2);
        assert_eq!(opts.min_lines, 4);

        let opts = DewarpOptions {
            sampling: 0,
            ..Default::default()
        };
        assert!(opts.validate().is_err());

        let opts = DewarpOptions::new().with_curvature_outlier_factor(0.0);
        assert!(opts.validate().is_err());
        let opts = DewarpOptions::new().with_curvature_outlier_factor(f32::NAN);
        assert!(opts.validate().is_err());

        let opts = DewarpOptions {
            sampling: 3,
            min_lines: 1,
            ..Default::default()
        };
        let n = opts.normalized().unwrap();
        assert_eq!((n.sampling, n.min_lines), (8, 4));
    }

    #[test]
    fn test_dewarp_creation() {
        let opts = DewarpOptions::default();
        let dew = Dewarp::new(800, 600, &opts);

        assert_eq!(dew.width(), 800);
        assert_eq!(dew.height(), 600);
        assert_eq!(dew.sampling(), 30);
        // ceil(800 / 30), 600 / 30
        assert_eq!(dew.grid_size(), (27, 20));
        assert_eq!(dew.status(), (false, false));
        assert!(dew.sampled_v_disparity().is_none());
        assert!(dew.v_disparity_at(10.0, 10.0, Interpolation::Nearest).is_none());
    }

    #[test]
    fn test_grid_size() {
        assert_eq!(grid_size(1000, 1400, 20), (50, 70));
        assert_eq!(grid_size(810, 811, 30), (27, 28));
        assert_eq!(grid_size(9, 8, 8), (2, 1));
        // Each image pixel falls inside a sample cell
        for (w, s) in [(800u32, 30u32), (811, 30), (100, 8), (9, 8)] {
            let (nx, _) = grid_size(w, w, s);
            assert!(nx * s >= w && (nx - 1) * s < w, "w = {w}, s = {s}");
        }
    }

    #[test]
    fn test_grid_size_huge_sampling() {
        assert_eq!(grid_size(800, 600, u32::MAX), (1, 1));
        let dew = Dewarp::new(800, 600, &DewarpOptions::new().with_sampling(u32::MAX));
        assert_eq!(dew.grid_size(), (1, 1));
    }

    #[test]
    fn test_check_validity() {
        let mut dew = Dewarp::new(800, 600, &DewarpOptions::default());
        dew.check_validity();
        assert!(!dew.v_valid() && !dew.h_valid());

        dew.v_success = true;
        dew.h_success = true;
        dew.min_curvature = -40;
        dew.max_curvature = 140;
        dew.left_curvature = 30;
        dew.right_curvature = -5;
        dew.check_validity();
        assert!(dew.v_valid());
        // |30 - (-5)| = 35 <= 40
        assert!(dew.h_valid());

        dew.max_curvature = 151;
        dew.right_curvature = -11;
        dew.check_validity();
        assert!(!dew.v_valid());
        assert!(!dew.h_valid());

        dew.max_curvature = 100;
        dew.min_curvature = -101;
        dew.check_validity();
        // spread 201 > 200
        assert!(!dew.v_valid());
    }

    #[test]
    fn test_summary_display() {
        let mut dew = Dewarp::new(800, 600, &DewarpOptions::default());
        dew.v_success = true;
        dew.n_lines = 12;
        dew.check_validity();
        let summary = dew.summary();
        assert_eq!(summary.n_lines, 12);
        let text = summary.to_string();
        assert!(text.contains("800x600"));
        assert!(text.contains("vertical built (valid)"));
        assert!(text.contains("horizontal none"));
    }

    #[test]
    fn test_sample_disparity() {
        // 3 x 2 grid, sampling 10: value = 10 * i + j
        let grid = FPix::from_data(3, 2, vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]).unwrap();

        let near = |x, y| sample_disparity(&grid, 10, x, y, Interpolation::Nearest);
        let bil = |x, y| sample_disparity(&grid, 10, x, y, Interpolation::Bilinear);

        assert_eq!(near(0.0, 0.0), Some(0.0));
        assert_eq!(near(14.0, 4.0), Some(1.0));
        assert_eq!(near(15.0, 5.0), Some(12.0));
        assert_eq!(bil(20.0, 10.0), Some(12.0));
        assert!((bil(5.0, 5.0).unwrap() - 5.5).abs() < 1e-5);
        assert!((bil(15.0, 2.0).unwrap() - 3.5).abs() < 1e-5);

        // Past the last sample, inside its cell: clamped to the last column
        assert_eq!(bil(25.0, 0.0), Some(2.0));
        assert_eq!(near(29.0, 19.0), Some(12.0));

        assert_eq!(near(-1.0, 0.0), None);
        assert_eq!(bil(30.0, 0.0), None);
        assert_eq!(bil(0.0, 20.0), None);
        assert_eq!(sample_disparity(&grid, 0, 0.0, 0.0, Interpolation::Nearest), None);
    }
}

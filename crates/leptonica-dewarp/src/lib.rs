//! leptonica-dewarp - Disparity models for curved document pages
//!
//! This crate builds the model that describes how a scanned page is
//! warped. It does not apply the model to the image.
//!
//! - **Text lines** - centrelines of solidified text lines, length
//!   filtering and coverage checks
//! - **Vertical disparity** - from the curvature of the lines
//! - **Horizontal disparity** - from the left and right margins
//! - **Line model** - both disparities from a page of ruled lines
//!
//! Each disparity is sampled on a coarse grid, one value every
//! `sampling` pixels. A direction that could not be built is recorded in
//! the model flags rather than returned as an error.
//!
//! # Examples
//!
//! ```
//! use leptonica_core::{Pix, PixelDepth};
//! use leptonica_dewarp::{DewarpOptions, build_page_model};
//!
//! // Eight long dark bars stand in for text lines
//! let mut pm = Pix::new(800, 1000, PixelDepth::Bit1).unwrap().to_mut();
//! for i in 0..8 {
//!     pm.set_region(50, 100 + 110 * i, 700, 12);
//! }
//! let pix: Pix = pm.into();
//!
//! let options = DewarpOptions::new().with_min_lines(6);
//! let dewarp = build_page_model(&pix, &options).unwrap();
//! assert!(dewarp.v_success());
//! let d = dewarp.v_disparity_at(400.0, 500.0, Default::default()).unwrap();
//! assert!(d.abs() < 0.1);
//! ```

pub mod debug;
mod error;
pub mod horizontal;
pub mod model;
pub mod textline;
pub mod types;
pub mod vertical;

pub use error::{DewarpError, DewarpResult};

pub use debug::{DebugDir, DewarpDebug, NoDebug};
pub use horizontal::find_horiz_disparity;
pub use model::{
    build_line_model, build_line_model_with_debug, build_page_model, build_page_model_with_debug,
    query_model_status,
};
pub use textline::{get_textline_centers, is_line_coverage_valid, remove_short_lines};
pub use types::{
    Dewarp, DewarpOptions, DewarpSummary, Interpolation, MIN_LINES, MIN_SAMPLING,
    sample_disparity,
};
pub use vertical::find_vert_disparity;

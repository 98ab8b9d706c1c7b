//! Vertical disparity from text line curvature
//!
//! Each line is fit with a quadratic `y = c2*x^2 + c1*x + c0`. Lines whose
//! curvature is far from the median are dropped as outliers. The vertical
//! shift of every remaining line relative to its own value at the middle
//! column is then fit across lines, one quadratic per sampled column, and
//! resampled onto the disparity grid.

use leptonica_core::{FPix, Numa, Pta, Ptaa, SortOrder, apply_quadratic_fit};
use leptonica_transform::rotate_orth_fpix;
use log::debug;

use crate::debug::{DewarpDebug, NoDebug};
use crate::types::Dewarp;
use crate::{DewarpError, DewarpResult};

/// Fewest lines a vertical model can be fit from
const MIN_FIT_LINES: usize = 3;

/// Floor on the median curvature deviation: one micro-unit
const MIN_CURVATURE_DEV: f32 = 1e-6;

/// Build the sampled vertical disparity of a page model
///
/// With `rotated` set, `lines` come from the page rotated 90 degrees
/// clockwise. The grid is built in that geometry, rotated back, and stored
/// as the horizontal disparity.
///
/// On error the model is left unchanged.
///
/// # Arguments
///
/// * `dewarp` - Page model to fill in
/// * `lines` - Filtered line centrelines
/// * `rotated` - Whether the lines come from the rotated page
///
/// C equivalent: `dewarpFindVertDisparity()` in `dewarp2.c`
pub fn find_vert_disparity(dewarp: &mut Dewarp, lines: &Ptaa, rotated: bool) -> DewarpResult<()> {
    build_vert_disparity(dewarp, lines, rotated, &mut NoDebug)
}

pub(crate) fn build_vert_disparity(
    dewarp: &mut Dewarp,
    lines: &Ptaa,
    rotated: bool,
    dbg: &mut dyn DewarpDebug,
) -> DewarpResult<()> {
    let sampling = dewarp.sampling();
    let (nx, ny) = if rotated {
        (dewarp.ny, dewarp.nx)
    } else {
        (dewarp.nx, dewarp.ny)
    };

    check_line_count(lines.len())?;
    let mut fits = Vec::with_capacity(lines.len());
    for pta in lines.iter() {
        let (c2, c1, c0, _) = pta.get_quadratic_lsf(false)?;
        fits.push((c2, c1, c0));
    }

    let fits = reject_curvature_outliers(fits, dewarp.options.curvature_outlier_factor)?;
    check_line_count(fits.len())?;

    // Each line resampled at every grid column
    let sampled: Vec<Vec<f32>> = fits
        .iter()
        .map(|&(c2, c1, c0)| {
            (0..nx)
                .map(|j| apply_quadratic_fit(c2, c1, c0, (j * sampling) as f32))
                .collect()
        })
        .collect();
    let mid = (nx / 2) as usize;
    let mid_ys: Numa = sampled.iter().map(|ys| ys[mid]).collect();
    let order = mid_ys.sort_index(SortOrder::Increasing);
    let mid_ys = mid_ys.sort_by_index(&order);
    let curvatures: Numa = order.iter().map(|&i| fits[i].0).collect();

    if !rotated {
        let fitted: Ptaa = order
            .iter()
            .map(|&i| {
                (0..nx)
                    .map(|j| ((j * sampling) as f32, sampled[i][j as usize]))
                    .collect::<Pta>()
            })
            .collect();
        dbg.lines("vert_fitted_lines", &fitted);
    }

    // Per column, fit the disparity of each line against its mid-y
    let mut grid = FPix::new(nx, ny)?;
    for j in 0..nx {
        let column: Pta = order
            .iter()
            .zip(mid_ys.iter())
            .map(|(&i, mid_y)| (mid_y, mid_y - sampled[i][j as usize]))
            .collect();
        let (c2, c1, c0, _) = column.get_quadratic_lsf(false)?;
        for i in 0..ny {
            let value = apply_quadratic_fit(c2, c1, c0, (i * sampling) as f32);
            grid.set_pixel_unchecked(j, i, value);
        }
    }

    if rotated {
        let grid = rotate_orth_fpix(&grid, 3)?;
        dbg.disparity("horiz_disparity_from_lines", &grid);
        dewarp.sampled_h_disparity = Some(grid);
        dewarp.h_success = true;
        return Ok(());
    }

    dbg.disparity("vert_disparity", &grid);
    let (min_curv, max_curv) = curvature_range(&curvatures);
    debug!(
        "vertical disparity from {} lines; curvature {min_curv}..{max_curv}",
        fits.len()
    );
    dewarp.min_curvature = min_curv;
    dewarp.max_curvature = max_curv;
    dewarp.n_lines = fits.len() as u32;
    dewarp.mid_ys = mid_ys;
    dewarp.curvatures = curvatures;
    dewarp.sampled_v_disparity = Some(grid);
    dewarp.v_success = true;
    Ok(())
}

fn check_line_count(found: usize) -> DewarpResult<()> {
    if found < MIN_FIT_LINES {
        return Err(DewarpError::InsufficientLines {
            found,
            required: MIN_FIT_LINES,
        });
    }
    Ok(())
}

/// Drop fits whose curvature is more than `factor` median deviations from
/// the median curvature
///
/// The deviation is floored at [`MIN_CURVATURE_DEV`], so a single curved
/// line among straight ones is still dropped.
fn reject_curvature_outliers(
    fits: Vec<(f32, f32, f32)>,
    factor: f32,
) -> DewarpResult<Vec<(f32, f32, f32)>> {
    let curvatures: Numa = fits.iter().map(|f| f.0).collect();
    let (median, dev) = curvatures.median_dev_from_median()?;
    debug!(
        "line curvature median {:.1}, median deviation {:.1} (x 1e6)",
        1e6 * median,
        1e6 * dev
    );
    let dev = dev.max(MIN_CURVATURE_DEV);

    let n = fits.len();
    let kept: Vec<_> = fits
        .into_iter()
        .filter(|&(c2, _, _)| (c2 - median).abs() <= factor * dev)
        .collect();
    if kept.len() < n {
        debug!("removed {} curvature outliers", n - kept.len());
    }
    Ok(kept)
}

/// Min and max curvature in micro-units
fn curvature_range(curvatures: &Numa) -> (i32, i32) {
    let to_micro = |v: f32| (1e6 * v).round() as i32;
    match (curvatures.min(), curvatures.max()) {
        (Some((min, _)), Some((max, _))) => (to_micro(min), to_micro(max)),
        _ => (0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DewarpOptions;

    fn create_line(c2: f32, y0: f32, width: u32) -> Pta {
        let xc = width as f32 / 2.0;
        (0..width)
            .step_by(5)
            .map(|x| {
                let dx = x as f32 - xc;
                (x as f32, y0 + c2 * dx * dx)
            })
            .collect()
    }

    fn create_dewarp(w: u32, h: u32) -> Dewarp {
        Dewarp::new(w, h, &DewarpOptions::new().with_sampling(20).with_min_lines(4))
    }

    #[test]
    fn test_flat_lines_give_zero_disparity() {
        let mut dewarp = create_dewarp(400, 600);
        let lines: Ptaa = (0..8)
            .map(|i| create_line(0.0, 40.0 + 70.0 * i as f32, 400))
            .collect();
        find_vert_disparity(&mut dewarp, &lines, false).unwrap();

        assert!(dewarp.v_success());
        assert_eq!(dewarp.n_lines(), 8);
        assert_eq!((dewarp.min_curvature(), dewarp.max_curvature()), (0, 0));
        let grid = dewarp.sampled_v_disparity().unwrap();
        assert_eq!(grid.dimensions(), (20, 30));
        assert!(grid.data().iter().all(|v| v.abs() < 1e-3));
    }

    #[test]
    fn test_curved_lines() {
        let mut dewarp = create_dewarp(400, 600);
        // Same curvature on every line: disparity depends on x only
        let c2 = 1e-4;
        let lines: Ptaa = (0..6)
            .map(|i| create_line(c2, 50.0 + 90.0 * i as f32, 400))
            .collect();
        find_vert_disparity(&mut dewarp, &lines, false).unwrap();

        assert_eq!(dewarp.min_curvature(), 100);
        assert_eq!(dewarp.max_curvature(), 100);
        let grid = dewarp.sampled_v_disparity().unwrap();
        // Column 0 is x = 0, 200 px from the centre: y is 4 px lower there
        for i in 0..grid.height() {
            let v = grid.get_pixel(0, i).unwrap();
            assert!((v + 4.0).abs() < 0.05, "row {i}: {v}");
            assert!(grid.get_pixel(10, i).unwrap().abs() < 0.05);
        }
        let mid_ys = dewarp.mid_ys();
        assert!(mid_ys.iter().zip(mid_ys.iter().skip(1)).all(|(a, b)| a < b));
    }

    #[test]
    fn test_outlier_line_rejected() {
        let mut dewarp = create_dewarp(400, 600);
        let mut lines: Ptaa = (0..6)
            .map(|i| create_line(1e-4 + 1e-6 * i as f32, 50.0 + 90.0 * i as f32, 400))
            .collect();
        lines.push(create_line(2e-3, 580.0, 400));
        find_vert_disparity(&mut dewarp, &lines, false).unwrap();

        assert_eq!(dewarp.n_lines(), 6);
        assert!(dewarp.max_curvature() <= 105);
    }

    #[test]
    fn test_curved_line_among_flat_lines_rejected() {
        let mut dewarp = create_dewarp(400, 600);
        let mut lines: Ptaa = (0..6)
            .map(|i| create_line(0.0, 50.0 + 90.0 * i as f32, 400))
            .collect();
        lines.push(create_line(2e-3, 580.0, 400));
        find_vert_disparity(&mut dewarp, &lines, false).unwrap();

        assert_eq!(dewarp.n_lines(), 6);
        assert_eq!((dewarp.min_curvature(), dewarp.max_curvature()), (0, 0));
        let grid = dewarp.sampled_v_disparity().unwrap();
        assert!(grid.get_pixel(0, 5).unwrap().abs() < 1e-3);
        assert!(grid.data().iter().all(|v| v.abs() < 1e-3));
    }

    #[test]
    fn test_equal_curvatures_kept() {
        let fits: Vec<_> = (0..5).map(|i| (1e-4, 0.0, 10.0 * i as f32)).collect();
        assert_eq!(reject_curvature_outliers(fits, 7.0).unwrap().len(), 5);

        // Within seven micro-units of an all-equal median
        let mut fits: Vec<_> = (0..5).map(|_| (0.0, 0.0, 0.0)).collect();
        fits.push((6e-6, 0.0, 0.0));
        fits.push((8e-6, 0.0, 0.0));
        let kept = reject_curvature_outliers(fits, 7.0).unwrap();
        assert_eq!(kept.len(), 6);
        assert!(kept.iter().all(|f| f.0 < 7e-6));
    }

    #[test]
    fn test_too_few_lines() {
        let mut dewarp = create_dewarp(400, 600);
        let lines: Ptaa = (0..2).map(|i| create_line(0.0, 100.0 * i as f32, 400)).collect();
        let err = find_vert_disparity(&mut dewarp, &lines, false).unwrap_err();
        assert!(matches!(
            err,
            DewarpError::InsufficientLines { found: 2, required: 3 }
        ));
        assert!(!dewarp.v_success());
        assert!(dewarp.sampled_v_disparity().is_none());
    }

    #[test]
    fn test_rotated_fills_horizontal() {
        let mut dewarp = create_dewarp(400, 600);
        // Rotated geometry is 600 wide
        let lines: Ptaa = (0..5)
            .map(|i| create_line(0.0, 30.0 + 80.0 * i as f32, 600))
            .collect();
        find_vert_disparity(&mut dewarp, &lines, true).unwrap();

        assert!(dewarp.h_success());
        assert!(!dewarp.v_success());
        assert_eq!(dewarp.n_lines(), 0);
        let grid = dewarp.sampled_h_disparity().unwrap();
        assert_eq!(grid.dimensions(), dewarp.grid_size());
    }
}

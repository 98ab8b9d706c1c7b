//! Least-squares fitting for Pta, and the Gauss-Jordan solver behind it.
//!
//! Corresponds to functions in C Leptonica's `ptafunc1.c` and `affine.c`.

use crate::error::{Error, Result};
use crate::numa::Numa;
use crate::pta::Pta;

impl Pta {
    /// Linear least-squares fit y = ax + b.
    ///
    /// Returns `(a, b, Option<Numa>)`. The Numa contains fitted values if
    /// `fit` is true. Special cases:
    /// - `want_a=true, want_b=false`: fit through origin (b=0).
    /// - `want_a=false, want_b=true`: horizontal line (a=0).
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] with fewer than 2 points, or when all x
    /// values coincide (no unique slope).
    ///
    /// C equivalent: `ptaGetLinearLSF()` in `ptafunc1.c`
    pub fn get_linear_lsf(
        &self,
        want_a: bool,
        want_b: bool,
        fit: bool,
    ) -> Result<(f32, f32, Option<Numa>)> {
        let n = self.len();
        if n < 2 {
            return Err(Error::InsufficientData(format!(
                "linear fit needs 2 pts; found {n}"
            )));
        }
        if !want_a && !want_b {
            return Err(Error::InvalidParameter(
                "at least one of a, b must be requested".to_string(),
            ));
        }
        let xa = self.x_coords();
        let ya = self.y_coords();

        let (a, b) = if want_a && want_b {
            let (mut sx, mut sy, mut sxx, mut sxy) = (0f64, 0f64, 0f64, 0f64);
            for (&x, &y) in xa.iter().zip(ya) {
                let (x, y) = (f64::from(x), f64::from(y));
                sx += x;
                sy += y;
                sxx += x * x;
                sxy += x * y;
            }
            let factor = n as f64 * sxx - sx * sx;
            if factor == 0.0 {
                return Err(Error::InsufficientData("zero variance in x".to_string()));
            }
            let inv = 1.0 / factor;
            (
                (inv * (n as f64 * sxy - sx * sy)) as f32,
                (inv * (sxx * sy - sx * sxy)) as f32,
            )
        } else if want_a {
            let (mut sxx, mut sxy) = (0f64, 0f64);
            for (&x, &y) in xa.iter().zip(ya) {
                sxx += f64::from(x) * f64::from(x);
                sxy += f64::from(x) * f64::from(y);
            }
            if sxx == 0.0 {
                return Err(Error::InsufficientData("all x are zero".to_string()));
            }
            ((sxy / sxx) as f32, 0.0)
        } else {
            let sy: f64 = ya.iter().map(|&y| f64::from(y)).sum();
            (0.0, (sy / n as f64) as f32)
        };

        let nafit = fit.then(|| xa.iter().map(|&x| apply_linear_fit(a, b, x)).collect());
        Ok((a, b, nafit))
    }

    /// Quadratic LSF: y = c2·x² + c1·x + c0. Returns `(c2, c1, c0, Option<Numa>)`.
    ///
    /// The optional Numa holds [`apply_quadratic_fit`] evaluated at each
    /// input x, in input order.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] with fewer than 3 distinct x values, or
    /// when the normal equations are singular.
    ///
    /// C equivalent: `ptaGetQuadraticLSF()` in `ptafunc1.c`
    pub fn get_quadratic_lsf(&self, fit: bool) -> Result<(f32, f32, f32, Option<Numa>)> {
        let n = self.len();
        if n < 3 {
            return Err(Error::InsufficientData(format!(
                "quadratic fit needs 3 pts; found {n}"
            )));
        }
        let xa = self.x_coords();
        let ya = self.y_coords();

        let mut distinct = xa.to_vec();
        distinct.sort_by(f32::total_cmp);
        distinct.dedup();
        if distinct.len() < 3 {
            return Err(Error::InsufficientData(format!(
                "quadratic fit needs 3 distinct x; found {}",
                distinct.len()
            )));
        }

        let (mut sx, mut sy, mut sx2, mut sx3, mut sx4, mut sxy, mut sx2y) =
            (0f64, 0f64, 0f64, 0f64, 0f64, 0f64, 0f64);
        for (&x, &y) in xa.iter().zip(ya) {
            let (x, y) = (f64::from(x), f64::from(y));
            let x2 = x * x;
            sx += x;
            sy += y;
            sx2 += x2;
            sx3 += x2 * x;
            sx4 += x2 * x2;
            sxy += x * y;
            sx2y += x2 * y;
        }

        let mut f = vec![
            vec![sx4, sx3, sx2],
            vec![sx3, sx2, sx],
            vec![sx2, sx, n as f64],
        ];
        let mut g = vec![sx2y, sxy, sy];
        gauss_jordan(&mut f, &mut g).map_err(|_| {
            Error::InsufficientData("quadratic normal equations are singular".to_string())
        })?;

        let (c2, c1, c0) = (g[0] as f32, g[1] as f32, g[2] as f32);
        let nafit = fit.then(|| {
            xa.iter()
                .map(|&x| apply_quadratic_fit(c2, c1, c0, x))
                .collect()
        });
        Ok((c2, c1, c0, nafit))
    }
}

/// Evaluate y = ax + b at x.
///
/// C equivalent: `applyLinearFit()` in `ptafunc1.c`
pub fn apply_linear_fit(a: f32, b: f32, x: f32) -> f32 {
    a * x + b
}

/// Evaluate y = c2·x² + c1·x + c0 at x.
///
/// C equivalent: `applyQuadraticFit()` in `ptafunc1.c`
pub fn apply_quadratic_fit(c2: f32, c1: f32, c0: f32, x: f32) -> f32 {
    c2 * x * x + c1 * x + c0
}

/// Solve `a · x = b` in place by Gauss-Jordan elimination with full pivoting.
///
/// On success `b` holds the solution and `a` its inverse. At each of the n
/// steps the pivot is the largest-magnitude element among rows and columns
/// not yet pivoted; rows are swapped to bring it onto the diagonal and the
/// column interchanges are undone on the inverse at the end.
///
/// # Errors
///
/// - [`Error::InvalidParameter`] if `a` is not `n × n` with `n = b.len()`.
/// - [`Error::SingularMatrix`] if a pivot is exactly zero.
///
/// C equivalent: `gaussjordan()` in `affine.c`
pub fn gauss_jordan(a: &mut [Vec<f64>], b: &mut [f64]) -> Result<()> {
    let n = b.len();
    if a.len() != n || a.iter().any(|row| row.len() != n) {
        return Err(Error::InvalidParameter(format!(
            "matrix must be {n}x{n} to match rhs"
        )));
    }

    let mut index_r = vec![0usize; n];
    let mut index_c = vec![0usize; n];
    let mut pivoted = vec![false; n];

    for i in 0..n {
        let mut big = 0f64;
        let (mut irow, mut icol) = (0usize, 0usize);
        for j in (0..n).filter(|&j| !pivoted[j]) {
            for k in (0..n).filter(|&k| !pivoted[k]) {
                if a[j][k].abs() >= big {
                    big = a[j][k].abs();
                    irow = j;
                    icol = k;
                }
            }
        }
        pivoted[icol] = true;

        if irow != icol {
            a.swap(irow, icol);
            b.swap(irow, icol);
        }
        index_r[i] = irow;
        index_c[i] = icol;

        let pivot = a[icol][icol];
        if pivot == 0.0 {
            return Err(Error::SingularMatrix);
        }
        let pivinv = 1.0 / pivot;
        a[icol][icol] = 1.0;
        for v in a[icol].iter_mut() {
            *v *= pivinv;
        }
        b[icol] *= pivinv;

        let pivot_row = a[icol].clone();
        let pivot_b = b[icol];
        for ll in (0..n).filter(|&ll| ll != icol) {
            let dum = a[ll][icol];
            a[ll][icol] = 0.0;
            for (v, &p) in a[ll].iter_mut().zip(&pivot_row) {
                *v -= p * dum;
            }
            b[ll] -= pivot_b * dum;
        }
    }

    for l in (0..n).rev() {
        if index_r[l] != index_c[l] {
            for row in a.iter_mut() {
                row.swap(index_r[l], index_c[l]);
            }
        }
    }
    Ok(())
}
